//! Allocation failure reported by arenas, pools and scopes.

use std::collections::TryReserveError;
use std::fmt;

/// Memory for a node, symbol or binding could not be reserved.
///
/// Always recoverable: callers get it back as an `Err` instead of the
/// process aborting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocError {
    /// What was being allocated, e.g. `"node"` or `"binding"`.
    pub what: &'static str,
}

impl AllocError {
    pub fn new(what: &'static str) -> Self {
        AllocError { what }
    }

    /// Adapter for `try_reserve` results.
    pub fn on(what: &'static str) -> impl FnOnce(TryReserveError) -> Self {
        move |_| AllocError { what }
    }
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "out of memory allocating {}", self.what)
    }
}

impl std::error::Error for AllocError {}
