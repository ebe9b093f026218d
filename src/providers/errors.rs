// 3rd party crates
use thiserror::Error;

// Project imports
use crate::providers::dynect::qps::QpsError;

/// Custom error type for provider metric collection.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("failed to retrieve {what}: {message}")]
    Retrieval { what: String, message: String },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("invalid header value: {0}")]
    InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),

    #[error(transparent)]
    Qps(#[from] QpsError),
}

impl ProviderError {
    pub(crate) fn retrieval(what: impl ToString, message: impl ToString) -> Self {
        ProviderError::Retrieval {
            what: what.to_string(),
            message: message.to_string(),
        }
    }
}
