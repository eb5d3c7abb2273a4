#![allow(
    clippy::unwrap_used,
    reason = "test code uses unwrap for concise assertions"
)]

use super::*;
use pretty_assertions::assert_eq;

fn temp_file(name: &str, body: &[u8]) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("co_ir_source_{}_{name}", std::process::id()));
    let _ = std::fs::create_dir_all(&dir);
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn open_data_is_loaded() {
    let src = Source::open_data("a.co", "x = 1\n");
    assert!(src.is_loaded());
    assert_eq!(src.len(), 6);
    assert_eq!(src.filename(), "a.co");
    assert_eq!(src.body().unwrap(), b"x = 1\n");
}

#[test]
fn open_file_defers_body() {
    let path = temp_file("lazy.co", b"fun main() {}\n");
    let src = Source::open_file(&path).unwrap();
    assert!(!src.is_loaded());
    assert_eq!(src.len(), 14);
    assert_eq!(src.body().unwrap(), b"fun main() {}\n");
    assert!(src.is_loaded());
}

#[test]
fn open_missing_file_is_io_error() {
    let err = Source::open_file("/nonexistent/dir/missing.co").unwrap_err();
    assert!(matches!(err, SourceError::Io { .. }));
    assert!(err.to_string().starts_with("/nonexistent/dir/missing.co: "));
}

#[test]
fn line_offsets_and_line_bytes() {
    let src = Source::open_data("a.co", "one\ntwo\n\nfour");
    assert_eq!(src.line_offsets().unwrap(), &[0, 4, 8, 9]);
    assert_eq!(src.line_bytes(1).unwrap(), Some(&b"one"[..]));
    assert_eq!(src.line_bytes(2).unwrap(), Some(&b"two"[..]));
    assert_eq!(src.line_bytes(3).unwrap(), Some(&b""[..]));
    assert_eq!(src.line_bytes(4).unwrap(), Some(&b"four"[..]));
    assert_eq!(src.line_bytes(5).unwrap(), None);
    assert_eq!(src.line_bytes(0).unwrap(), None);
}

#[test]
fn trailing_newline_yields_empty_last_line() {
    let src = Source::open_data("a.co", "x\n");
    assert_eq!(src.line_offsets().unwrap(), &[0, 2]);
    assert_eq!(src.line_bytes(2).unwrap(), Some(&b""[..]));
}

#[test]
fn checksum_depends_on_content() {
    let a = Source::open_data("a.co", "x = 1");
    let b = Source::open_data("b.co", "x = 1");
    let c = Source::open_data("c.co", "x = 2");
    assert_eq!(a.checksum().unwrap(), b.checksum().unwrap());
    assert_ne!(a.checksum().unwrap(), c.checksum().unwrap());
    // cached
    assert_eq!(a.checksum().unwrap(), a.checksum().unwrap());
}
