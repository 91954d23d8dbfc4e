pub mod aggregator;
pub mod calculator;
pub mod config;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod model;
pub mod parser;
pub mod server;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing/logging
///
/// Note: This function can only be called once per process. Filtering is
/// controlled through `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}
