// src/utils/logging.rs
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global tracing subscriber.
/// Filters come from `RUST_LOG`, falling back to "info" for this crate and
/// "warn" for the HTTP stack so page scans stay readable.
pub fn setup_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hyper=warn,reqwest=warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr) // stdout is reserved for the JSON sample
        .init();

    tracing::debug!("Logging setup complete.");
}
