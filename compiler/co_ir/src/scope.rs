//! Lexical scopes.
//!
//! A [`Scope`] maps [`Sym`]s to declaration nodes and may have a parent.
//! Lookups walk the parent chain; assignments only ever touch the scope
//! they are made on, which is how an inner binding shadows an outer one.
//!
//! Parents are shared through `Arc` so a finished scope (the universe
//! scope, a package scope) can be the parent of many children at once.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::{AllocError, NodeId, Sym};

#[derive(Clone, Debug, Default)]
pub struct Scope {
    parent: Option<Arc<Scope>>,
    bindings: FxHashMap<Sym, NodeId>,
}

impl Scope {
    /// Scope without a parent.
    pub fn new() -> Self {
        Scope::default()
    }

    /// Nested scope whose lookups fall back to `parent`.
    pub fn child(parent: &Arc<Scope>) -> Self {
        Scope {
            parent: Some(Arc::clone(parent)),
            bindings: FxHashMap::default(),
        }
    }

    pub fn parent(&self) -> Option<&Arc<Scope>> {
        self.parent.as_ref()
    }

    /// Find the nearest binding of `sym`, walking the parent chain.
    pub fn lookup(&self, sym: &Sym) -> Option<NodeId> {
        let mut scope = Some(self);
        while let Some(s) = scope {
            if let Some(&node) = s.bindings.get(sym) {
                return Some(node);
            }
            scope = s.parent.as_deref();
        }
        None
    }

    /// Binding of `sym` in this scope only.
    pub fn lookup_local(&self, sym: &Sym) -> Option<NodeId> {
        self.bindings.get(sym).copied()
    }

    /// Bind `sym` to `node` in this scope, returning the binding it replaced.
    ///
    /// Never modifies a parent.
    pub fn assign(&mut self, sym: Sym, node: NodeId) -> Result<Option<NodeId>, AllocError> {
        self.bindings
            .try_reserve(1)
            .map_err(AllocError::on("scope binding"))?;
        Ok(self.bindings.insert(sym, node))
    }

    /// Number of bindings in this scope, not counting parents.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Depth of the parent chain; 0 for a root scope.
    pub fn depth(&self) -> usize {
        let mut n = 0;
        let mut scope = self.parent.as_deref();
        while let Some(s) = scope {
            n += 1;
            scope = s.parent.as_deref();
        }
        n
    }

    /// Local bindings in unspecified order.
    pub fn bindings(&self) -> impl Iterator<Item = (&Sym, NodeId)> + '_ {
        self.bindings.iter().map(|(k, &v)| (k, v))
    }
}
