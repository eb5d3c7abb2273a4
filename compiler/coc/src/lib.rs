//! Co compiler front-end driver.
//!
//! - [`Universe`]: the predeclared symbols, basic types and constants,
//!   built once and shared by every build
//! - [`BuildContext`]: per-package state (sources, nodes, type table,
//!   diagnostics)
//! - [`eval()`]: compile-time evaluation of constant expressions
//! - [`resolve_id`]: binding identifiers to the nodes they name

pub mod build;
pub mod eval;
pub mod resolve;
pub mod universe;

pub use build::{BuildConfig, BuildContext, BuildError};
pub use eval::{eval, EvalFlags};
pub use resolve::resolve_id;
pub use universe::Universe;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=coc=debug` or `RUST_LOG=co_ir=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
