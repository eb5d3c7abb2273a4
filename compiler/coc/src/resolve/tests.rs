#![allow(
    clippy::unwrap_used,
    reason = "test code uses unwrap for concise assertions"
)]

use super::*;
use std::sync::Arc;

use co_ir::ast::data::{Ident, Var};
use co_ir::{Node, NodeData, Pos, TypeCode};
use pretty_assertions::assert_eq;

use crate::BuildConfig;

fn context() -> BuildContext {
    let universe = Arc::new(Universe::new().unwrap());
    BuildContext::new(&universe, BuildConfig::default(), "main").unwrap()
}

fn ident(ctx: &mut BuildContext, name: &str, flags: NodeFlags) -> NodeId {
    let name = ctx.syms.get(name).unwrap();
    let mut node = Node::with_data(NodeData::Id(Ident {
        name: Some(name),
        target: None,
    }))
    .at(Pos::new(1, 1, 1, 1));
    node.flags = flags;
    ctx.arena.alloc(node).unwrap()
}

fn var(ctx: &mut BuildContext, name: &str, ty: TypeCode) -> NodeId {
    let name = ctx.syms.get(name).unwrap();
    let mut node = Node::with_data(NodeData::Var(Var {
        name: Some(name),
        ..Var::default()
    }));
    node.ty = Universe::basic_type(ty);
    ctx.arena.alloc(node).unwrap()
}

fn target(ctx: &BuildContext, id: NodeId) -> Option<NodeId> {
    ctx.arena[id].as_id().unwrap().target
}

// === Bound names ===

#[test]
fn bound_name_gets_target_and_type() {
    let mut ctx = context();
    let x = var(&mut ctx, "x", TypeCode::I32);
    let mut scope = Scope::child(ctx.universe().scope());
    scope.assign(ctx.syms.get("x").unwrap(), x).unwrap();

    let id = ident(&mut ctx, "x", NodeFlags::RVALUE);
    assert_eq!(resolve_id(&mut ctx, id, &scope), id);
    assert_eq!(target(&ctx, id), Some(x));
    assert_eq!(ctx.arena[id].ty, Universe::basic_type(TypeCode::I32));
    assert!(!ctx.arena[id].flags.contains(NodeFlags::UNRESOLVED));
}

#[test]
fn inner_binding_shadows_outer() {
    let mut ctx = context();
    let outer_x = var(&mut ctx, "x", TypeCode::I32);
    let inner_x = var(&mut ctx, "x", TypeCode::F64);
    let name = ctx.syms.get("x").unwrap();
    let mut outer = Scope::child(ctx.universe().scope());
    outer.assign(name.clone(), outer_x).unwrap();
    let mut inner = Scope::child(&Arc::new(outer));
    inner.assign(name, inner_x).unwrap();

    let id = ident(&mut ctx, "x", NodeFlags::empty());
    resolve_id(&mut ctx, id, &inner);
    assert_eq!(target(&ctx, id), Some(inner_x));
    assert_eq!(ctx.arena[id].ty, Universe::basic_type(TypeCode::F64));
}

#[test]
fn type_name_has_type_type() {
    let mut ctx = context();
    let scope = Arc::clone(ctx.universe().scope());
    let id = ident(&mut ctx, "i32", NodeFlags::RVALUE);
    assert_eq!(resolve_id(&mut ctx, id, &scope), id);
    assert_eq!(target(&ctx, id), Universe::basic_type(TypeCode::I32));
    assert_eq!(ctx.arena[id].ty, Some(Universe::TYPE_TYPE));
}

#[test]
fn id_chain_unwinds_to_final_target() {
    let mut ctx = context();
    let x = var(&mut ctx, "x", TypeCode::U8);
    let mut scope = Scope::child(ctx.universe().scope());
    scope.assign(ctx.syms.get("x").unwrap(), x).unwrap();

    let first = ident(&mut ctx, "x", NodeFlags::empty());
    resolve_id(&mut ctx, first, &scope);
    let alias = ctx.syms.get("y").unwrap();
    scope.assign(alias, first).unwrap();

    let second = ident(&mut ctx, "y", NodeFlags::empty());
    resolve_id(&mut ctx, second, &scope);
    assert_eq!(target(&ctx, second), Some(x));
    assert_eq!(ctx.arena[second].ty, Universe::basic_type(TypeCode::U8));
}

#[test]
fn existing_target_is_kept() {
    let mut ctx = context();
    let x = var(&mut ctx, "x", TypeCode::I64);
    let id = ident(&mut ctx, "true", NodeFlags::empty());
    ctx.arena[id].as_id_mut().unwrap().target = Some(x);

    let scope = Arc::clone(ctx.universe().scope());
    resolve_id(&mut ctx, id, &scope);
    assert_eq!(target(&ctx, id), Some(x));
    assert_eq!(ctx.arena[id].ty, Universe::basic_type(TypeCode::I64));
}

// === Unbound names ===

#[test]
fn unbound_name_is_flagged_unresolved() {
    let mut ctx = context();
    let scope = Scope::child(ctx.universe().scope());
    let id = ident(&mut ctx, "nope", NodeFlags::RVALUE);
    assert_eq!(resolve_id(&mut ctx, id, &scope), id);
    assert_eq!(target(&ctx, id), None);
    assert!(ctx.arena[id].flags.contains(NodeFlags::UNRESOLVED));
    assert_eq!(ctx.arena[id].ty, None);
    assert_eq!(ctx.errcount(), 0);
}

#[test]
fn resolving_later_clears_unresolved() {
    let mut ctx = context();
    let id = ident(&mut ctx, "late", NodeFlags::empty());
    let mut scope = Scope::child(ctx.universe().scope());
    resolve_id(&mut ctx, id, &scope);
    assert!(ctx.arena[id].flags.contains(NodeFlags::UNRESOLVED));

    let late = var(&mut ctx, "late", TypeCode::Bool);
    scope.assign(ctx.syms.get("late").unwrap(), late).unwrap();
    resolve_id(&mut ctx, id, &scope);
    assert!(!ctx.arena[id].flags.contains(NodeFlags::UNRESOLVED));
    assert_eq!(target(&ctx, id), Some(late));
}

// === Universe constants ===

#[test]
fn rvalue_true_simplifies_to_literal() {
    let mut ctx = context();
    let scope = Arc::clone(ctx.universe().scope());
    let id = ident(&mut ctx, "true", NodeFlags::RVALUE);
    let resolved = resolve_id(&mut ctx, id, &scope);
    assert_eq!(resolved, Universe::TRUE);
    assert_eq!(ctx.arena[resolved].as_bool_lit(), Some(true));
    assert_eq!(target(&ctx, id), Some(Universe::TRUE));
    assert_eq!(ctx.arena[id].ty, Universe::basic_type(TypeCode::Bool));
}

#[test]
fn non_rvalue_constant_keeps_the_id() {
    let mut ctx = context();
    let scope = Arc::clone(ctx.universe().scope());
    let id = ident(&mut ctx, "nil", NodeFlags::empty());
    assert_eq!(resolve_id(&mut ctx, id, &scope), id);
    assert_eq!(target(&ctx, id), Some(Universe::NIL));
    assert_eq!(ctx.arena[id].ty, Universe::basic_type(TypeCode::Nil));
}

#[test]
fn non_id_is_returned_unchanged() {
    let mut ctx = context();
    let x = var(&mut ctx, "x", TypeCode::I8);
    let scope = Scope::new();
    assert_eq!(resolve_id(&mut ctx, x, &scope), x);
    assert_eq!(ctx.arena[x].flags, NodeFlags::empty());
}
