//! Log subscriber setup for the binary
//!
//! The library only emits `tracing` events. Installing a subscriber is left
//! to whoever embeds it; `gator-store` does it here, writing to stderr so
//! stdout stays clean JSON.

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, StorageConfig};

/// Filter from `RUST_LOG`, falling back to `default_level`
pub fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(config: &StorageConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(&config.log_level))
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = match config.log_format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    if result.is_err() {
        tracing::trace!("log subscriber already installed");
    }
}
