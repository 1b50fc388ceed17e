//! Tracing subscriber setup.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_level` applies. `format` is
/// either `"text"` (human-readable, ANSI colors) or `"json"` (one object per line).
///
/// # Errors
///
/// Returns an error if `default_level` is not a valid filter directive or a
/// global subscriber is already installed.
pub fn init_tracing(default_level: &str, format: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level)?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if format == "json" {
        builder
            .json()
            .with_current_span(false)
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {e}"))?;
    } else {
        builder
            .with_target(true)
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {e}"))?;
    }

    Ok(())
}
