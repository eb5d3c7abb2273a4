//! Diagnostics for the Co front-end.
//!
//! A [`Diagnostic`] is a level, a source span and a message. Rendering
//! against a [`co_ir::PosMap`] adds the offending source line and a
//! squiggle under the span:
//!
//! ```text
//! main.co:3:5: error: mixed types in operation 1 + 2.0
//! x = 1 + 2.0
//!     ~~~~~~~
//! ```
//!
//! Emitting diagnostics (counting, filtering, handlers) is the build
//! context's job; this crate only describes and formats them.

mod diagnostic;

pub use diagnostic::{DiagLevel, Diagnostic, ParseLevelError};
