//! JSL command-line driver.
//!
//! The `jsl` binary is a thin shell over [`commands`]: it parses arguments,
//! hooks up stdout and stdin, and maps how a program stopped onto a process
//! exit code.

pub mod commands;
mod stdin_input;

pub use stdin_input::StdinInput;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber.
///
/// Only takes effect when `RUST_LOG` is set, e.g. `RUST_LOG=jsl_eval=trace`.
/// Spans (function calls, `try` bodies, block resolution) render as an
/// indented tree on stderr. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_indent_lines(true),
                )
                .with(filter)
                .init();
        }
    });
}
