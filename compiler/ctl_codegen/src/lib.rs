//! C++ Backend for CTL
//!
//! Lowers checked CTL modules to C++ source text: a header stream with the
//! entry routine declarations and a body stream holding the runtime
//! preamble followed by one namespace per module.
//!
//! # Architecture
//!
//! ```text
//! CppGenerator::generate_module
//!   └─ module::emit_module
//!        ├─ plan      literal folding, initializer call scan
//!        ├─ structs
//!        ├─ function  forward declarations (functions used by initializers)
//!        ├─ constants init::render_initializer → aggregate
//!        ├─ module initializer (deferred statements)
//!        └─ function  bodies → stmt → expr → names
//! ```
//!
//! - **Type lowering** (`types.rs`): CTL type → C++ spelling, shape class
//!   and initialization strategy, dialect dependent.
//! - **Planner** (`plan.rs`, `fold.rs`): decides which constants become
//!   literal substitutions and which need the module initializer.
//! - **Aggregates** (`aggregate.rs`): direct, constructor and deferred
//!   forms of aggregate literals.
//! - **Emitters** (`stmt.rs`, `expr.rs`, `names.rs`): statements,
//!   expressions, calls with default filling, name resolution.
//!
//! # Debugging
//!
//! - `RUST_LOG=ctl_codegen=debug` - module and constant decisions
//! - `RUST_LOG=ctl_codegen=trace` - per-constant classification

mod aggregate;
mod config;
mod context;
mod error;
mod expr;
mod fold;
mod function;
mod generator;
mod init;
mod literal;
mod module;
mod names;
mod output;
mod plan;
mod runtime;
mod stmt;
mod types;

#[cfg(test)]
mod test_helpers;

pub use config::{AggregateSyntax, CodegenConfig, Precision};
pub use context::EntryRoutine;
pub use error::{CodegenError, Result};
pub use generator::{generate, CppGenerator, GeneratedCode};
pub use names::{clean_name, unqualified, RUNTIME_NAMESPACE};
pub use output::CodeWriter;
pub use runtime::preamble;
pub use types::{
    ArrayLowering, DeclMode, Declaration, InitStrategy, LoweredType, NativeShape, ShapeClass,
    TypeLowering, TypeOps,
};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing subscriber.
///
/// Does nothing unless `RUST_LOG` is set. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
