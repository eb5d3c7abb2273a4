//! Stack growth for recursive AST walks.
//!
//! Constant folding and AST description recurse along expression trees
//! whose depth is chosen by the input program. A chain like
//! `1 + (1 + (1 + ...))` must not be able to overflow the host stack, so
//! every recursive step goes through [`ensure_sufficient_stack`].
//!
//! On native targets the stack is grown on demand with `stacker`. On
//! `wasm32` the closure is called directly.

/// Grow when less than this many bytes of stack remain.
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first switching to a fresh stack segment if the current one
/// is nearly exhausted.
///
/// ```text
/// fn fold(&mut self, id: NodeId) -> Option<NodeId> {
///     ensure_sufficient_stack(|| self.fold_inner(id))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Bytes of stack left on the current segment, if the platform can tell.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn remaining_stack() -> Option<usize> {
    stacker::remaining_stack()
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn remaining_stack() -> Option<usize> {
    None
}
