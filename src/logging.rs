// src/logging.rs

use tracing_subscriber::EnvFilter;

use crate::error::{Result, RiskError};

/// Installs a `fmt` subscriber filtered by `RUST_LOG`, falling back to `default_level`.
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| RiskError::Config(format!("cannot install log subscriber: {e}")))
}
