#![allow(
    clippy::unwrap_used,
    reason = "test code uses unwrap for concise assertions"
)]

use super::data::{BasicType, BinOp, Field, RefType, StructType, TupleType};
use super::*;
use crate::{Pos, SymPool, Tok, TypeCode};
use pretty_assertions::assert_eq;

// === Kinds ===

#[test]
fn kind_bands_partition_all_kinds() {
    for k in NodeKind::ALL {
        let bands = [k.is_stmt(), k.is_expr(), k.is_type()];
        let n = bands.iter().filter(|&&b| b).count();
        match k {
            NodeKind::Bad | NodeKind::Field => assert_eq!(n, 0, "{k}"),
            _ => assert_eq!(n, 1, "{k}"),
        }
    }
}

#[test]
fn sub_bands() {
    assert!(NodeKind::Pkg.is_cunit());
    assert!(NodeKind::File.is_cunit());
    assert!(!NodeKind::Comment.is_cunit());
    assert!(NodeKind::Nil.is_lit());
    assert!(NodeKind::StrLit.is_lit());
    assert!(!NodeKind::Id.is_lit());
    assert!(NodeKind::PrefixOp.is_unary_op());
    assert!(NodeKind::PostfixOp.is_unary_op());
    assert!(!NodeKind::BinOp.is_unary_op());
    assert!(NodeKind::Tuple.is_list_expr());
    assert!(!NodeKind::Block.is_list_expr());
    assert!(NodeKind::If.is_expr());
    assert!(NodeKind::FunType.is_type());
}

#[test]
fn kind_from_u8() {
    for (i, k) in NodeKind::ALL.iter().enumerate() {
        assert_eq!(NodeKind::from_u8(u8::try_from(i).unwrap()), Some(*k));
    }
    assert_eq!(NodeKind::from_u8(NodeKind::TYPE_END), None);
}

// === Payloads ===

#[test]
fn zeroed_payload_matches_kind() {
    for k in NodeKind::ALL {
        let node = Node::new(k);
        assert_eq!(node.kind(), k);
        assert_eq!(node.pos, Pos::NONE);
        assert!(node.flags.is_empty());
        assert!(node.ty.is_none());
        assert!(node.tid().is_none());
    }
}

#[test]
fn zeroed_links_are_invalid() {
    let node = Node::new(NodeKind::BinOp);
    let op = node.as_binop().unwrap();
    assert_eq!(op.op, Tok::None);
    assert!(!op.left.is_valid());
    assert!(!op.right.is_valid());
}

#[test]
fn wrong_accessor_is_none() {
    let node = Node::new(NodeKind::IntLit);
    assert!(node.as_binop().is_none());
    assert!(node.as_struct_type().is_none());
    assert_eq!(node.as_int_lit(), Some(0));
    assert!(node.as_list().is_none());

    let tuple = Node::new(NodeKind::Tuple);
    assert!(tuple.as_list().is_some());
    assert!(tuple.as_cunit().is_none());
}

#[test]
fn set_tid_only_on_types() {
    let pool = SymPool::new();
    let tid = pool.get("(ib)").unwrap();
    let mut ty = Node::new(NodeKind::TupleType);
    assert!(ty.data.set_tid(tid.clone()));
    assert_eq!(ty.tid(), Some(&tid));

    let mut expr = Node::new(NodeKind::Id);
    assert!(!expr.data.set_tid(tid));
    assert!(expr.tid().is_none());
}

// === Flags ===

#[test]
fn transfer_unresolved_and_const() {
    let mut parent = NodeFlags::empty();
    parent.transfer_unresolved(NodeFlags::UNRESOLVED | NodeFlags::PUBLIC);
    assert_eq!(parent, NodeFlags::UNRESOLVED);

    parent.transfer_const(NodeFlags::CONST);
    assert!(parent.contains(NodeFlags::CONST));
}

#[test]
fn transfer_mut_requires_both_const() {
    let mut parent = NodeFlags::CONST | NodeFlags::RVALUE;
    parent.transfer_mut(NodeFlags::CONST);
    assert!(parent.contains(NodeFlags::CONST));
    parent.transfer_mut(NodeFlags::empty());
    assert_eq!(parent, NodeFlags::RVALUE);

    let mut parent = NodeFlags::CONST;
    parent.transfer_mut2(NodeFlags::CONST, NodeFlags::UNUSED);
    assert!(!parent.contains(NodeFlags::CONST));
}

#[test]
fn flags_display() {
    assert_eq!(NodeFlags::empty().to_string(), "0");
    assert_eq!(
        (NodeFlags::UNRESOLVED | NodeFlags::CONST).to_string(),
        "unresolved|const"
    );
}

// === Arena ===

fn basic(arena: &mut NodeArena, code: TypeCode) -> NodeId {
    arena
        .alloc(Node::with_data(NodeData::BasicType(BasicType {
            tid: None,
            code,
            name: None,
        })))
        .unwrap()
}

#[test]
fn alloc_hands_out_sequential_ids() {
    let mut arena = NodeArena::new();
    let a = arena.alloc_kind(NodeKind::Nil).unwrap();
    let b = arena.alloc_kind(NodeKind::IntLit).unwrap();
    assert_eq!(a.raw(), 0);
    assert_eq!(b.raw(), 1);
    assert_eq!(arena.len(), 2);
    assert_eq!(arena.kind(b), Some(NodeKind::IntLit));
    assert!(arena.get(NodeId::new(7)).is_none());
}

#[test]
fn unknown_id_is_none_through_get() {
    let mut arena = NodeArena::new();
    arena.alloc_kind(NodeKind::Nil).unwrap();
    assert!(arena.get(NodeId::new(1)).is_none());
    assert!(arena.get_mut(NodeId::new(1)).is_none());
}

#[test]
#[should_panic(expected = "index out of bounds")]
fn indexing_unknown_id_panics() {
    let arena = NodeArena::new();
    let _ = &arena[NodeId::new(0)];
}

#[test]
fn prototypes_keep_their_ids() {
    let protos = vec![Node::new(NodeKind::TypeType), Node::new(NodeKind::Nil)];
    let mut arena = NodeArena::from_prototypes(&protos);
    assert_eq!(arena[NodeId::new(1)].kind(), NodeKind::Nil);
    let next = arena.alloc_kind(NodeKind::Id).unwrap();
    assert_eq!(next.raw(), 2);
}

#[test]
fn describe_types() {
    let pool = SymPool::new();
    let mut arena = NodeArena::new();
    let int = basic(&mut arena, TypeCode::Int);
    let boolean = basic(&mut arena, TypeCode::Bool);

    let tuple = arena
        .alloc(Node::with_data(NodeData::TupleType(TupleType {
            tid: None,
            elems: [int, boolean].into_iter().collect(),
        })))
        .unwrap();
    assert_eq!(arena.describe(tuple), "(int, bool)");

    let r = arena
        .alloc(Node::with_data(NodeData::RefType(RefType {
            tid: None,
            elem: tuple,
            is_mut: true,
        })))
        .unwrap();
    assert_eq!(arena.describe(r), "mut&(int, bool)");

    let mut fa = Node::with_data(NodeData::Field(Field {
        name: Some(pool.get("a").unwrap()),
        ..Field::default()
    }));
    fa.ty = Some(int);
    let fa = arena.alloc(fa).unwrap();
    let st = arena
        .alloc(Node::with_data(NodeData::StructType(StructType {
            tid: None,
            name: None,
            fields: [fa].into_iter().collect(),
        })))
        .unwrap();
    assert_eq!(arena.describe(st), "struct{a int}");
}

#[test]
fn describe_exprs() {
    let mut arena = NodeArena::new();
    let lit = arena.alloc(Node::with_data(NodeData::IntLit(42))).unwrap();
    assert_eq!(arena.describe(lit), "42");
    let op = arena
        .alloc(Node::with_data(NodeData::BinOp(BinOp {
            op: Tok::Plus,
            left: lit,
            right: lit,
        })))
        .unwrap();
    assert_eq!(arena.describe(op), "binop +");
    let call = arena.alloc_kind(NodeKind::Call).unwrap();
    assert_eq!(arena.describe(call), "call");
    assert_eq!(arena.describe(NodeId::INVALID), "<invalid>");
}

#[test]
fn describe_deep_ref_chain() {
    let mut arena = NodeArena::new();
    let mut t = basic(&mut arena, TypeCode::U8);
    for _ in 0..50_000 {
        t = arena
            .alloc(Node::with_data(NodeData::RefType(RefType {
                tid: None,
                elem: t,
                is_mut: false,
            })))
            .unwrap();
    }
    let s = arena.describe(t);
    assert_eq!(s.len(), 50_000 + 2);
    assert!(s.ends_with("&u8"));
}
