pub mod carriers;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod feedback;
pub mod handlers;
pub mod metrics;
pub mod recommend;
pub mod server;
pub mod signals;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing/logging
///
/// Note: This function can only be called once.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}
