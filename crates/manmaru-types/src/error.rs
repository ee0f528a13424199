use std::time::Duration;

use thiserror::Error;

use crate::llm::LlmError;

/// Errors from relay operations (initialize / exchange).
#[derive(Debug, Error)]
pub enum RelayError {
    /// The caller's input was rejected before any transcript mutation.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The inference endpoint failed or returned an unusable response.
    #[error(transparent)]
    Inference(#[from] LlmError),

    /// The inference call exceeded the configured deadline and was cancelled.
    #[error("inference call exceeded {0:?}")]
    Timeout(Duration),

    /// The session store failed to load or save a transcript.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors from session store operations (used by trait definitions in manmaru-core).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session store unavailable")]
    Unavailable,

    #[error("session store error: {0}")]
    Backend(String),
}

/// Errors from loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(String),

    #[error("failed to parse config file: {0}")]
    Parse(String),

    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}
