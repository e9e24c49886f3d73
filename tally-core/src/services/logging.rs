//! Logging setup - structured diagnostics on stderr
//!
//! The core only emits `tracing` events. Binaries call `init` once at
//! startup to decide where they go. Balances and names are never logged
//! above debug level.

use tracing_subscriber::EnvFilter;

/// Default filter when neither `RUST_LOG` nor the config sets one
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Build the filter, preferring `RUST_LOG` over the configured level
pub fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Install the stderr subscriber
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init(level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_for(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
