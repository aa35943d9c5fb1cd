pub mod catalog;
pub mod config;
pub mod decoder;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod image_utils;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod prompt;
pub mod providers;
pub mod server;
pub mod store;
pub mod validation;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing/logging
///
/// `RUST_LOG` wins over `default_level`. `log_format` is "json" for one JSON
/// object per line, anything else for human-readable output.
///
/// Note: This function can only be called once.
pub fn init_tracing(default_level: &str, log_format: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(filter);

    if log_format == "json" {
        registry
            .with(fmt::layer().json().with_target(true).with_current_span(true))
            .init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }
}
