//! Co IR - the data model of the Co front-end.
//!
//! - [`Pos`] / [`PosSpan`]: bit-packed source locations, [`PosMap`] maps
//!   origin indices back to [`Source`]s
//! - [`Sym`] / [`SymPool`]: interned, identity-comparable strings
//! - [`Tok`]: token vocabulary shared by scanner and parser
//! - [`Node`] / [`NodeArena`]: the AST, addressed by [`NodeId`]
//! - [`Scope`]: chained lexical bindings from [`Sym`] to [`NodeId`]
//! - [`typeid`]: structural type identity encoding
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: identifiers and type ids are [`Sym`]s, so
//!   equality is a pointer compare
//! - **Flatten Everything**: nodes refer to each other by [`NodeId`], and
//!   an arena owns them all
//! - **Fail Softly**: allocation and interning return `Result`; only
//!   compiler bugs panic

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

/// Compile-time assertion that a type fits within a byte budget.
///
/// Like [`static_assert_size!`] but only bounds the size from above, for
/// types whose exact layout depends on third-party containers.
#[macro_export]
macro_rules! static_assert_max_size {
    ($ty:ty, $max:expr) => {
        const _: () = assert!(
            ::std::mem::size_of::<$ty>() <= $max,
            concat!(stringify!($ty), " exceeds its size budget")
        );
    };
}

mod alloc;
pub mod ast;
mod pos;
mod scope;
mod source;
mod sym;
mod token;
mod type_code;
pub mod typeid;

pub use alloc::AllocError;
pub use ast::{Node, NodeArena, NodeData, NodeFlags, NodeId, NodeKind, NodeList};
pub use pos::{Pos, PosMap, PosSpan};
pub use scope::Scope;
pub use source::{Source, SourceError};
pub use sym::{Sym, SymError, SymPool, SYM_FLAGS_MAX, SYM_LEN_MAX};
pub use token::{langtok, Tok, KEYWORDS};
pub use type_code::TypeCode;
pub use typeid::TypeIdError;
