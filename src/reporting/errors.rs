// 3rd party crates
use thiserror::Error;

/// Custom error type for metrics emission setup. These only occur at startup.
#[derive(Debug, Error)]
pub enum ReportingError {
    #[error("failed to set up the statsd exporter: {0}")]
    Exporter(String),

    #[error("failed to bind the statsd debug listener: {0}")]
    Listener(#[from] std::io::Error),
}
