//! Error types for Quill.
//!
//! Errors never cross the dispatcher boundary: [`crate::dispatch::Dispatcher`]
//! converts every provider-side failure into a fallback result. They exist so
//! adapters can report *why* a call failed, which ends up in the result
//! metadata and in the logs.

use thiserror::Error;

use crate::models::ProviderKind;

/// Primary error type for all Quill operations.
#[derive(Error, Debug)]
pub enum QuillError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Missing credentials for provider {0}")]
    MissingCredentials(ProviderKind),

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Degenerate response from {provider}: {length} characters")]
    DegenerateResponse { provider: ProviderKind, length: usize },

    #[error("Unexpected response from {provider}: {message}")]
    UnexpectedResponse {
        provider: ProviderKind,
        message: String,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Broad error category, mirroring how the gateway reacts to a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Model unknown or provider uncredentialed. Silent fallback.
    ConfigurationGap,
    /// Network, timeout, non-200 or malformed body. Fallback, logged.
    TransientProviderFailure,
    /// Remote call succeeded but the output was too short to use.
    DegenerateResponse,
    /// Malformed request. Surfaced to the caller as a client error.
    InputValidation,
}

impl QuillError {
    /// Create an API error from a status code and body.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create an unexpected-response error for a provider.
    pub fn unexpected(provider: ProviderKind, message: impl Into<String>) -> Self {
        Self::UnexpectedResponse {
            provider,
            message: message.into(),
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ModelNotFound(_) | Self::MissingCredentials(_) | Self::Configuration(_) => {
                ErrorCategory::ConfigurationGap
            }
            Self::DegenerateResponse { .. } => ErrorCategory::DegenerateResponse,
            Self::InvalidArgument(_) => ErrorCategory::InputValidation,
            Self::Api { .. }
            | Self::Network(_)
            | Self::Io(_)
            | Self::Serialization(_)
            | Self::Timeout(_)
            | Self::UnexpectedResponse { .. } => ErrorCategory::TransientProviderFailure,
        }
    }

    /// Whether a caller should ever see this error as a failed request.
    pub fn is_client_error(&self) -> bool {
        self.category() == ErrorCategory::InputValidation
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, QuillError>;
