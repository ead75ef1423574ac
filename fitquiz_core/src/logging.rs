//! Tracing setup shared by the fitquiz front ends.
//!
//! Log lines always go to stderr: stdout carries quiz prompts and JSON
//! results. `RUST_LOG` overrides any default level picked here.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Level used by one-shot commands
pub const DEFAULT_LEVEL: &str = "info";

/// Level used while the interactive quiz owns the terminal
pub const INTERACTIVE_LEVEL: &str = "warn";

fn filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Install the subscriber at [`DEFAULT_LEVEL`]
pub fn init() {
    init_with_level(DEFAULT_LEVEL)
}

/// Install the subscriber with a fallback level (debug, info, warn, error)
pub fn init_with_level(default_level: &str) {
    tracing_subscriber::registry()
        .with(filter(default_level))
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

/// Install a quieter subscriber for the interactive quiz
///
/// Only warnings and errors by default, without timestamps or targets, so
/// the occasional line reads like part of the conversation.
pub fn init_interactive() {
    tracing_subscriber::registry()
        .with(filter(INTERACTIVE_LEVEL))
        .with(
            fmt::layer()
                .without_time()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
