//! Logger setup
//!
//! Progress goes to stderr through `tracing`; stdout is kept for the report.

use tracing_subscriber::{prelude::*, EnvFilter};

fn default_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(default_env_filter()),
        )
        .try_init();
}
