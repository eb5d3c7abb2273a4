//! Diagnostic levels and records.

use std::fmt;
use std::str::FromStr;

use co_ir::{Pos, PosMap, PosSpan};

/// Severity of a diagnostic. Lower is more severe.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord, Default)]
pub enum DiagLevel {
    Error,
    Warn,
    #[default]
    Note,
}

impl DiagLevel {
    /// The least severe level; reporting up to it reports everything.
    pub const MAX: DiagLevel = DiagLevel::Note;

    pub const fn name(self) -> &'static str {
        match self {
            DiagLevel::Error => "error",
            DiagLevel::Warn => "warn",
            DiagLevel::Note => "note",
        }
    }
}

impl fmt::Display for DiagLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error parsing a [`DiagLevel`] name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseLevelError(pub String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown diagnostic level {:?} (expected error, warn or note)",
            self.0
        )
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for DiagLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(DiagLevel::Error),
            "warn" | "warning" => Ok(DiagLevel::Warn),
            "note" => Ok(DiagLevel::Note),
            other => Err(ParseLevelError(other.to_owned())),
        }
    }
}

/// A reported problem at a source span.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: DiagLevel,
    pub span: PosSpan,
    pub message: String,
}

impl Diagnostic {
    pub fn new(level: DiagLevel, span: impl Into<PosSpan>, message: impl Into<String>) -> Self {
        Diagnostic {
            level,
            span: span.into(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == DiagLevel::Error
    }

    /// Columns the squiggle covers.
    ///
    /// Extends to the end position when it is on the same line and not
    /// before the start; otherwise the start's own width.
    pub fn squiggle_width(&self) -> u32 {
        let PosSpan { start, end } = self.span;
        let same_line = start.line() == end.line();
        if end.is_known() && same_line && (start == end || start.is_before(end)) {
            return end.col().saturating_sub(start.col()) + end.width();
        }
        start.width()
    }

    /// Render as `file:line:col: level: message`, followed by the source
    /// line and a squiggle when the source is known.
    pub fn format(&self, posmap: &PosMap) -> String {
        let start = self.span.start;
        let mut out = format!(
            "{}: {}: {}\n",
            posmap.fmt_pos(start),
            self.level,
            self.message
        );
        if let Some(line) = source_line(posmap, start) {
            out.push_str(&line);
            out.push('\n');
            let col = start.col();
            if col > 0 {
                out.push_str(&" ".repeat((col - 1) as usize));
            }
            match self.squiggle_width() {
                0 => out.push('^'),
                w => out.push_str(&"~".repeat(w as usize)),
            }
            out.push('\n');
        }
        out
    }
}

fn source_line(posmap: &PosMap, pos: Pos) -> Option<String> {
    let source = posmap.source(pos)?;
    let bytes = source.line_bytes(pos.line()).ok()??;
    Some(String::from_utf8_lossy(bytes).into_owned())
}

#[cfg(test)]
mod tests;
