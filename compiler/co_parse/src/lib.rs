//! Scanner and parser state for Co.
//!
//! The scanner and parser share a few pieces of state whose shape other
//! passes rely on:
//!
//! - [`ParseFlags`]: options that change scanning and parsing
//! - [`IndentStack`]: indentation levels for block detection
//! - [`CommentQueue`]: comments in scan order, for tools that keep them
//! - [`ScopeStack`]: a flat binding stack for function-local identifiers

mod comments;
mod indent;
mod scope_stack;

use bitflags::bitflags;

pub use comments::{Comment, CommentQueue};
pub use indent::{Indent, IndentStack};
pub use scope_stack::ScopeStack;

bitflags! {
    /// Options that change scanner and parser behavior.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ParseFlags: u8 {
        /// Keep comments, queueing them in a [`CommentQueue`].
        const COMMENTS = 1 << 1;
        /// Apply optimizations; the AST may no longer mirror the tokens 1:1.
        const OPT = 1 << 2;
    }
}
