//! Identifier resolution.
//!
//! [`resolve_id`] links an `Id` node to the node its name is bound to and
//! gives the `Id` that node's type. Identifiers that are used as values and
//! name a constant literal are replaced by the literal itself:
//!
//! ```text
//!   Id true (rvalue)  ──resolve──▶  BoolLit true : bool
//! ```

use tracing::trace;

use co_ir::{NodeFlags, NodeId, NodeKind, Scope};

use crate::{BuildContext, Universe};

/// Resolve the identifier `id` in `scope`.
///
/// An `Id` that already has a target is not looked up again. When the
/// lookup misses, the node is flagged [`NodeFlags::UNRESOLVED`] and left
/// for a later pass to report.
///
/// Returns `id`, or the constant literal it names if `id` is an rvalue.
/// Nodes that are not `Id` are returned unchanged.
pub fn resolve_id(ctx: &mut BuildContext, id: NodeId, scope: &Scope) -> NodeId {
    let Some(ident) = ctx.arena.get(id).and_then(|n| n.as_id()) else {
        return id;
    };
    let found = ident
        .target
        .or_else(|| ident.name.as_ref().and_then(|name| scope.lookup(name)));

    let Some(target) = found.map(|t| unwind(ctx, t)) else {
        trace!(?id, "unresolved identifier");
        if let Some(node) = ctx.arena.get_mut(id) {
            node.flags.insert(NodeFlags::UNRESOLVED);
        }
        return id;
    };

    let ty = type_of(ctx, target);
    let Some(node) = ctx.arena.get_mut(id) else {
        return id;
    };
    if let Some(ident) = node.as_id_mut() {
        ident.target = Some(target);
    }
    node.ty = ty;
    node.flags.remove(NodeFlags::UNRESOLVED);
    let rvalue = node.flags.contains(NodeFlags::RVALUE);
    trace!(?id, ?target, ?ty, "resolved identifier");

    if rvalue && is_constant_literal(ctx, target) {
        target
    } else {
        id
    }
}

/// Follow `Id` targets to the first node that is not an already resolved
/// `Id`. Gives up after as many steps as there are nodes, which only a
/// cycle can exceed.
fn unwind(ctx: &BuildContext, mut target: NodeId) -> NodeId {
    for _ in 0..ctx.arena.len() {
        match ctx
            .arena
            .get(target)
            .and_then(|n| n.as_id())
            .and_then(|ident| ident.target)
        {
            Some(next) if next != target => target = next,
            _ => break,
        }
    }
    target
}

/// Type of a reference to `target`: `type` for type nodes, otherwise the
/// target's own value type.
fn type_of(ctx: &BuildContext, target: NodeId) -> Option<NodeId> {
    let node = ctx.arena.get(target)?;
    if node.is_type() {
        Some(Universe::TYPE_TYPE)
    } else {
        node.ty
    }
}

fn is_constant_literal(ctx: &BuildContext, target: NodeId) -> bool {
    ctx.arena.get(target).is_some_and(|n| {
        n.flags.contains(NodeFlags::CONST)
            && matches!(
                n.kind(),
                NodeKind::Nil | NodeKind::BoolLit | NodeKind::IntLit | NodeKind::FloatLit
            )
    })
}

#[cfg(test)]
mod tests;
