#![allow(
    clippy::unwrap_used,
    reason = "test code uses unwrap for concise assertions"
)]

use super::*;
use crate::SymPool;

// === Classification ===

#[test]
fn prim_ops_exclude_sentinels() {
    assert!(!Tok::PrimOpsStart.is_prim_op());
    assert!(!Tok::PrimOpsEnd.is_prim_op());
    assert!(Tok::Plus.is_prim_op());
    assert!(Tok::MinusMinus.is_prim_op());
    assert!(Tok::Eq.is_prim_op());
    assert!(!Tok::Assign.is_prim_op());
    assert!(!Tok::Comma.is_prim_op());
}

#[test]
fn comparisons_are_contiguous() {
    let cmp = [Tok::Eq, Tok::NEq, Tok::Lt, Tok::LEq, Tok::Gt, Tok::GEq];
    for w in cmp.windows(2) {
        assert_eq!(w[0].code() + 1, w[1].code());
    }
    for t in cmp {
        assert!(t.is_comparison(), "{t}");
        assert!(t.is_prim_op(), "{t}");
    }
    assert!(!Tok::Excalm.is_comparison());
    assert!(!Tok::PlusPlus.is_comparison());
}

#[test]
fn compound_assign_maps_to_binop() {
    assert_eq!(Tok::PlusAssign.assign_op(), Some(Tok::Plus));
    assert_eq!(Tok::ShlAssign.assign_op(), Some(Tok::Shl));
    assert_eq!(Tok::Assign.assign_op(), None);
    assert!(Tok::HatAssign.is_assign());
    assert!(!Tok::LParen.is_assign());
}

// === Keywords ===

#[test]
fn keyword_index_round_trips() {
    for (i, &(text, tok)) in KEYWORDS.iter().enumerate() {
        let index = u8::try_from(i + 1).unwrap();
        assert_eq!(tok.keyword_index(), index, "{text}");
        assert_eq!(Tok::from_keyword_index(index), Some(tok));
        assert_eq!(tok.name(), text);
        assert_eq!(tok.code(), Tok::KEYWORDS_START + u16::from(index));
    }
    assert_eq!(Tok::from_keyword_index(0), None);
    assert_eq!(Tok::Id.keyword_index(), 0);
}

#[test]
fn first_keyword_follows_start() {
    assert_eq!(Tok::As.code(), 0x101);
    assert!(Tok::As.is_keyword());
    assert!(!Tok::FloatLit.is_keyword());
}

#[test]
fn langtok_reads_sym_flags() {
    let pool = SymPool::new();
    for (i, &(text, tok)) in KEYWORDS.iter().enumerate() {
        let sym = pool
            .add_flagged(text, u8::try_from(i + 1).unwrap())
            .unwrap();
        assert_eq!(langtok(&sym), tok);
    }
    let plain = pool.get("foo").unwrap();
    assert_eq!(langtok(&plain), Tok::Id);
}

#[test]
fn display_uses_spelling() {
    assert_eq!(Tok::RArr.to_string(), "->");
    assert_eq!(Tok::Struct.to_string(), "struct");
    assert_eq!(Tok::Id.to_string(), "identifier");
}
