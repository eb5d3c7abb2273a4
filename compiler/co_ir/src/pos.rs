//! Bit-packed source positions.
//!
//! A [`Pos`] packs a whole source location into one `u64`:
//!
//! ```text
//!  63        44 43        24 23    12 11     0
//! +------------+------------+--------+--------+
//! |   origin   |    line    |  col   | width  |
//! |  20 bits   |  20 bits   |12 bits |12 bits |
//! +------------+------------+--------+--------+
//! ```
//!
//! `origin` indexes a [`PosMap`] slot holding the [`Source`]. Lines and
//! columns are 1-based; `0` means "unknown". Values that do not fit are
//! clamped to the field maximum rather than wrapping into a neighbour.

use std::fmt;
use std::sync::Arc;

use crate::Source;

const WIDTH_BITS: u32 = 12;
const COL_BITS: u32 = 12;
const LINE_BITS: u32 = 20;
const ORIGIN_BITS: u32 = 20;

const WIDTH_SHIFT: u32 = 0;
const COL_SHIFT: u32 = WIDTH_SHIFT + WIDTH_BITS;
const LINE_SHIFT: u32 = COL_SHIFT + COL_BITS;
const ORIGIN_SHIFT: u32 = LINE_SHIFT + LINE_BITS;

const WIDTH_MASK: u64 = (1 << WIDTH_BITS) - 1;
const COL_MASK: u64 = (1 << COL_BITS) - 1;
const LINE_MASK: u64 = (1 << LINE_BITS) - 1;
const ORIGIN_MASK: u64 = (1 << ORIGIN_BITS) - 1;

/// Packed source location: origin, line, column and width.
///
/// Layout: 8 bytes. See the module docs for the bit layout.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Pos(u64);

impl Pos {
    /// Unknown position.
    pub const NONE: Pos = Pos(0);

    pub const MAX_ORIGIN: u32 = ORIGIN_MASK as u32;
    pub const MAX_LINE: u32 = LINE_MASK as u32;
    pub const MAX_COL: u32 = COL_MASK as u32;
    pub const MAX_WIDTH: u32 = WIDTH_MASK as u32;

    /// Encode a position. Each field is clamped to its bit width.
    #[inline]
    pub const fn new(origin: u32, line: u32, col: u32, width: u32) -> Self {
        Pos(pack(origin, ORIGIN_MASK, ORIGIN_SHIFT)
            | pack(line, LINE_MASK, LINE_SHIFT)
            | pack(col, COL_MASK, COL_SHIFT)
            | pack(width, WIDTH_MASK, WIDTH_SHIFT))
    }

    /// Reinterpret a raw packed value.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Pos(raw)
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn origin(self) -> u32 {
        unpack(self.0, ORIGIN_MASK, ORIGIN_SHIFT)
    }

    #[inline]
    pub const fn line(self) -> u32 {
        unpack(self.0, LINE_MASK, LINE_SHIFT)
    }

    #[inline]
    pub const fn col(self) -> u32 {
        unpack(self.0, COL_MASK, COL_SHIFT)
    }

    #[inline]
    pub const fn width(self) -> u32 {
        unpack(self.0, WIDTH_MASK, WIDTH_SHIFT)
    }

    /// All four fields, in packing order.
    #[inline]
    pub const fn decode(self) -> (u32, u32, u32, u32) {
        (self.origin(), self.line(), self.col(), self.width())
    }

    #[inline]
    #[must_use]
    pub const fn with_origin(self, origin: u32) -> Self {
        Pos(replace(self.0, origin, ORIGIN_MASK, ORIGIN_SHIFT))
    }

    #[inline]
    #[must_use]
    pub const fn with_line(self, line: u32) -> Self {
        Pos(replace(self.0, line, LINE_MASK, LINE_SHIFT))
    }

    #[inline]
    #[must_use]
    pub const fn with_col(self, col: u32) -> Self {
        Pos(replace(self.0, col, COL_MASK, COL_SHIFT))
    }

    #[inline]
    #[must_use]
    pub const fn with_width(self, width: u32) -> Self {
        Pos(replace(self.0, width, WIDTH_MASK, WIDTH_SHIFT))
    }

    /// True unless this is [`Pos::NONE`] (or some other origin-0, line-0
    /// value, which the encoder never produces for real input).
    #[inline]
    pub const fn is_known(self) -> bool {
        self.origin() != 0 || self.line() != 0
    }

    /// Raw packed comparison. Only meaningful within one origin.
    #[inline]
    pub const fn is_before(self, other: Pos) -> bool {
        self.0 < other.0
    }

    /// Raw packed comparison. Only meaningful within one origin.
    #[inline]
    pub const fn is_after(self, other: Pos) -> bool {
        self.0 > other.0
    }

    /// Smallest single-line span covering both `self` and `other`.
    ///
    /// Both positions must be on the same line. Otherwise `self` is
    /// returned unchanged.
    #[must_use]
    pub fn union(self, other: Pos) -> Pos {
        if self.line() != other.line() {
            return self;
        }
        let start = self.col().min(other.col());
        let end = (self.col() + self.width()).max(other.col() + other.width());
        let first = if other.is_before(self) { other } else { self };
        first.with_col(start).with_width(end - start)
    }

    /// Move the start column by `delta`, shrinking or growing the width so
    /// the end stays put.
    ///
    /// `delta` is clamped so the column never goes below zero and the width
    /// never goes negative.
    #[must_use]
    pub fn with_adjusted_start(self, delta: i32) -> Pos {
        let c = i64::from(self.col());
        let w = i64::from(self.width());
        let delta = i64::from(delta);
        let delta = if delta > 0 { delta.min(w) } else { delta.max(-c) };
        // both results are within [0, MAX] by the clamp above
        let col = u32::try_from(c + delta).unwrap_or(0);
        let width = u32::try_from(w - delta).unwrap_or(0);
        self.with_col(col).with_width(width)
    }
}

#[inline]
const fn pack(v: u32, mask: u64, shift: u32) -> u64 {
    let v = v as u64;
    let v = if v > mask { mask } else { v };
    v << shift
}

#[inline]
#[expect(
    clippy::cast_possible_truncation,
    reason = "every field mask is at most 20 bits wide"
)]
const fn unpack(raw: u64, mask: u64, shift: u32) -> u32 {
    ((raw >> shift) & mask) as u32
}

#[inline]
const fn replace(raw: u64, v: u32, mask: u64, shift: u32) -> u64 {
    (raw & !(mask << shift)) | pack(v, mask, shift)
}

impl fmt::Debug for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_known() {
            return write!(f, "Pos(none)");
        }
        write!(
            f,
            "Pos({}:{}:{}+{})",
            self.origin(),
            self.line(),
            self.col(),
            self.width()
        )
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line(), self.col())
    }
}

/// A source range. `end` is inclusive unless it is [`Pos::NONE`], in which
/// case only `start` matters.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct PosSpan {
    pub start: Pos,
    pub end: Pos,
}

impl PosSpan {
    pub const NONE: PosSpan = PosSpan {
        start: Pos::NONE,
        end: Pos::NONE,
    };

    #[inline]
    pub const fn new(start: Pos, end: Pos) -> Self {
        PosSpan { start, end }
    }

    /// Span of a single position.
    #[inline]
    pub const fn at(start: Pos) -> Self {
        PosSpan {
            start,
            end: Pos::NONE,
        }
    }
}

impl From<Pos> for PosSpan {
    fn from(start: Pos) -> Self {
        PosSpan::at(start)
    }
}

/// Maps origin indices to sources.
///
/// Slot 0 is reserved so that origin 0 always means "no source".
#[derive(Clone, Debug)]
pub struct PosMap {
    sources: Vec<Option<Arc<Source>>>,
}

impl Default for PosMap {
    fn default() -> Self {
        Self::new()
    }
}

impl PosMap {
    pub fn new() -> Self {
        PosMap {
            sources: vec![None],
        }
    }

    /// Origin index for `source`, registering it on first use.
    ///
    /// Lookup is a linear scan by identity; a package has few sources.
    pub fn origin(&mut self, source: &Arc<Source>) -> u32 {
        if let Some(idx) = self
            .sources
            .iter()
            .position(|s| s.as_ref().is_some_and(|s| Arc::ptr_eq(s, source)))
        {
            return u32::try_from(idx).unwrap_or(Pos::MAX_ORIGIN);
        }
        self.sources.push(Some(Arc::clone(source)));
        u32::try_from(self.sources.len() - 1).unwrap_or(Pos::MAX_ORIGIN)
    }

    /// Source registered for `pos.origin()`, if any.
    pub fn source(&self, pos: Pos) -> Option<&Arc<Source>> {
        self.sources
            .get(pos.origin() as usize)
            .and_then(Option::as_ref)
    }

    /// Number of registered sources (excluding the reserved slot).
    pub fn len(&self) -> usize {
        self.sources.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render `file:line:col`, using `<input>` when the origin is unknown.
    pub fn fmt_pos(&self, pos: Pos) -> String {
        let filename = self.source(pos).map_or("<input>", |s| s.filename());
        format!("{filename}:{}:{}", pos.line(), pos.col())
    }
}

// Size assertions to prevent accidental regressions
#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{Pos, PosSpan};
    crate::static_assert_size!(Pos, 8);
    crate::static_assert_size!(PosSpan, 16);
}
