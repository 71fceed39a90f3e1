/*!
 * Error types for the tolk application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to the translation endpoint
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The request failed on the wire or the endpoint answered with a
    /// non-success status
    #[error("Network error: {}", describe_network(.status_code, .message))]
    NetworkError {
        /// HTTP status, when the endpoint answered at all
        status_code: Option<u16>,
        message: String,
    },

    /// The response body did not have the expected nested-array shape
    #[error("Failed to parse API response: {0}")]
    ParseError(String),
}

fn describe_network(status_code: &Option<u16>, message: &str) -> String {
    match status_code {
        Some(code) => format!("HTTP {} - {}", code, message),
        None => message.to_string(),
    }
}

impl ProviderError {
    /// Failure before any response arrived
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError {
            status_code: None,
            message: message.into(),
        }
    }

    /// Non-success HTTP status with the body the endpoint returned
    pub fn http_status(status_code: u16, message: impl Into<String>) -> Self {
        Self::NetworkError {
            status_code: Some(status_code),
            message: message.into(),
        }
    }

    /// True for failures that happened on the wire rather than in decoding
    pub fn is_network(&self) -> bool {
        matches!(self, Self::NetworkError { .. })
    }

    /// HTTP status of a rejected request
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::NetworkError { status_code, .. } => *status_code,
            Self::ParseError(_) => None,
        }
    }
}

/// Errors raised by the durable key-value store
#[derive(Error, Debug)]
pub enum StorageError {
    /// SQLite failure
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored value could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem failure while preparing the database location
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Lock poisoned or data directory unavailable
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the translation endpoint
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Local quota denial, raised without contacting the network
    #[error("Rate limit exceeded: at most {max_requests} requests per {window_secs}s")]
    RateLimitExceeded {
        /// Requests allowed per window
        max_requests: u32,
        /// Window length in seconds
        window_secs: u64,
    },

    /// Input the application refuses to process
    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    /// Batch run requested with nothing queued
    #[error("Batch queue is empty")]
    BatchEmpty,

    /// Persisting state failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the translation endpoint
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Error from persistence
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
