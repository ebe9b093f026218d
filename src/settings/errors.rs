// 3rd party crates
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid log level: {0}. Must be one of: error, warn, info, debug, trace")]
    InvalidLogLevel(String),

    #[error("check_interval must be greater than 0, got {0}")]
    InvalidCheckInterval(u64),

    #[error("Unknown provider '{0}'. Must be one of: dyn, ns1")]
    UnknownProvider(String),

    #[error("Provider '{0}' is enabled but has no configuration section")]
    MissingProviderConfig(String),

    #[error("Unsupported tag format '{0}'. Only 'datadog' is supported")]
    InvalidTagFormat(String),
}
