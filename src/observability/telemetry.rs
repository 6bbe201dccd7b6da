use tracing_subscriber::{fmt, EnvFilter};
use crate::contract::lib::{Error, Result};

/// Installs the global `tracing` subscriber. Filter comes from `RUST_LOG`,
/// `info` when unset. Fails if a subscriber is already installed.
pub fn init() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|_| Error::TracingError())
}
