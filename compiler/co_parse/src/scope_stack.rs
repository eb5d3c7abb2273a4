//! Flat binding stack for parser-local identifiers.
//!
//! Bindings and saved scope bases are interleaved in one `Vec`:
//!
//! ```text
//!   [ x=#1  y=#2 | base:0 | x=#7 | base:3 | z=#9 ]
//!                           ^ scope 1      ^ scope 2 (current, base = 5)
//! ```
//!
//! Popping a scope truncates back to its saved base and restores the
//! outer base, so the cost does not depend on how many names the scope
//! bound. Lookup is a linear search from the top: most identifiers refer
//! to something declared nearby, and the entries stay in cache.

use co_ir::{AllocError, NodeId, Sym};

#[derive(Clone, Debug)]
enum Entry {
    Binding(Sym, NodeId),
    /// Base index of the enclosing scope.
    Base(usize),
}

#[derive(Clone, Debug, Default)]
pub struct ScopeStack {
    entries: Vec<Entry>,
    /// Index of the first entry of the current scope.
    base: usize,
    depth: usize,
}

impl ScopeStack {
    pub fn new() -> Self {
        ScopeStack::default()
    }

    /// Open a nested scope.
    pub fn push_scope(&mut self) -> Result<(), AllocError> {
        self.entries
            .try_reserve(1)
            .map_err(AllocError::on("scope stack"))?;
        self.entries.push(Entry::Base(self.base));
        self.base = self.entries.len();
        self.depth += 1;
        Ok(())
    }

    /// Close the current scope, dropping all of its bindings at once.
    ///
    /// Returns false if no scope is open.
    pub fn pop_scope(&mut self) -> bool {
        if self.depth == 0 {
            return false;
        }
        let saved = self.base - 1;
        let outer = match self.entries.get(saved) {
            Some(Entry::Base(b)) => *b,
            _ => {
                debug_assert!(false, "scope stack base does not point at a saved base");
                return false;
            }
        };
        self.entries.truncate(saved);
        self.base = outer;
        self.depth -= 1;
        true
    }

    /// Bind `sym` in the current scope.
    pub fn define(&mut self, sym: Sym, node: NodeId) -> Result<(), AllocError> {
        self.entries
            .try_reserve(1)
            .map_err(AllocError::on("scope stack"))?;
        self.entries.push(Entry::Binding(sym, node));
        Ok(())
    }

    /// Most recent binding of `sym` in any open scope.
    pub fn lookup(&self, sym: &Sym) -> Option<NodeId> {
        self.entries.iter().rev().find_map(|e| match e {
            Entry::Binding(k, v) if k == sym => Some(*v),
            _ => None,
        })
    }

    /// Binding of `sym` in the current scope only.
    pub fn lookup_local(&self, sym: &Sym) -> Option<NodeId> {
        self.entries[self.base..].iter().rev().find_map(|e| match e {
            Entry::Binding(k, v) if k == sym => Some(*v),
            _ => None,
        })
    }

    /// Number of open scopes (0 before the first `push_scope`).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Total bindings across all open scopes.
    pub fn len(&self) -> usize {
        self.entries.len() - self.depth
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
