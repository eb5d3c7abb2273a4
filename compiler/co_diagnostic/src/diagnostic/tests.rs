use super::*;
use co_ir::Source;
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn posmap_with(text: &str) -> (PosMap, u32) {
    let mut posmap = PosMap::new();
    let source = Arc::new(Source::open_data("main.co", text));
    let origin = posmap.origin(&source);
    (posmap, origin)
}

// === Levels ===

#[test]
fn levels_order_by_severity() {
    assert!(DiagLevel::Error < DiagLevel::Warn);
    assert!(DiagLevel::Warn < DiagLevel::Note);
    assert_eq!(DiagLevel::MAX, DiagLevel::Note);
    assert_eq!(DiagLevel::default(), DiagLevel::Note);
}

#[test]
fn level_names_round_trip() {
    for level in [DiagLevel::Error, DiagLevel::Warn, DiagLevel::Note] {
        assert_eq!(level.name().parse::<DiagLevel>(), Ok(level));
    }
    assert_eq!("warning".parse::<DiagLevel>(), Ok(DiagLevel::Warn));
    assert_eq!(
        "loud".parse::<DiagLevel>(),
        Err(ParseLevelError("loud".to_owned()))
    );
}

// === Formatting ===

#[test]
fn format_without_source() {
    let posmap = PosMap::new();
    let d = Diagnostic::new(DiagLevel::Warn, Pos::new(0, 2, 7, 1), "unused variable x");
    assert_eq!(d.format(&posmap), "<input>:2:7: warn: unused variable x\n");
}

#[test]
fn format_with_squiggle() {
    let (posmap, origin) = posmap_with("fun main() {\n  x = 1 + 2.0\n}\n");
    let d = Diagnostic::new(
        DiagLevel::Error,
        Pos::new(origin, 2, 7, 5),
        "mixed types in operation +",
    );
    assert_eq!(
        d.format(&posmap),
        "main.co:2:7: error: mixed types in operation +\n  x = 1 + 2.0\n      ~~~~~\n"
    );
}

#[test]
fn format_zero_width_uses_caret() {
    let (posmap, origin) = posmap_with("abc\n");
    let d = Diagnostic::new(DiagLevel::Note, Pos::new(origin, 1, 2, 0), "here");
    assert_eq!(d.format(&posmap), "main.co:1:2: note: here\nabc\n ^\n");
}

#[test]
fn span_extends_to_end() {
    let start = Pos::new(1, 4, 3, 2);
    let end = Pos::new(1, 4, 10, 3);
    let d = Diagnostic::new(DiagLevel::Error, PosSpan::new(start, end), "x");
    assert_eq!(d.squiggle_width(), 10);

    // end on another line: fall back to the start width
    let d = Diagnostic::new(
        DiagLevel::Error,
        PosSpan::new(start, Pos::new(1, 5, 1, 1)),
        "x",
    );
    assert_eq!(d.squiggle_width(), 2);

    // end before start
    let d = Diagnostic::new(
        DiagLevel::Error,
        PosSpan::new(end, start),
        "x",
    );
    assert_eq!(d.squiggle_width(), 3);
}
