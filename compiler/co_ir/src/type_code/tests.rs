use super::*;
use std::collections::HashSet;

#[test]
fn basic_codes_are_dense() {
    for (i, tc) in TypeCode::BASIC.iter().enumerate() {
        assert_eq!(usize::from(tc.code()), i);
        assert!(tc.is_basic());
        assert_eq!(TypeCode::from_basic(tc.code()), Some(*tc));
    }
    assert!(!TypeCode::Ref.is_basic());
    assert_eq!(TypeCode::from_basic(TypeCode::BASIC_END), None);
}

#[test]
fn basic_encodings_are_unique() {
    let chars: HashSet<char> = TypeCode::BASIC.iter().map(|t| t.encoding()).collect();
    assert_eq!(chars.len(), TypeCode::BASIC.len());
}

#[test]
fn ref_markers_differ() {
    assert_eq!(TypeCode::Ref.encoding(), '&');
    assert_eq!(TypeCode::MutRef.encoding(), 'M');
}

#[test]
fn numeric_queries() {
    assert!(TypeCode::Int.is_integer());
    assert!(TypeCode::U128.is_integer());
    assert!(!TypeCode::Bool.is_integer());
    assert!(TypeCode::F32.is_float());
    assert!(TypeCode::I16.is_signed());
    assert!(!TypeCode::U16.is_signed());
    assert_eq!(TypeCode::I32.size(), 4);
    assert_eq!(TypeCode::Int.size(), 0);
    assert_eq!(TypeCode::int_of_size(8, false), Some(TypeCode::U64));
    assert_eq!(TypeCode::int_of_size(3, true), None);
}

#[test]
fn public_names() {
    assert!(TypeCode::Int.is_public());
    assert!(TypeCode::Auto.is_public());
    assert!(!TypeCode::Ideal.is_public());
    assert!(!TypeCode::Nil.is_public());
    assert_eq!(TypeCode::U8.to_string(), "u8");
}
