//! Error types for the CardForge application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire CardForge application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ForgeError {
    /// The generative provider rejected or failed a request.
    #[error("Provider error{}: {message}", .status.map(|s| format!(" ({s})")).unwrap_or_default())]
    Provider {
        status: Option<u16>,
        message: String,
    },

    /// The provider answered, but the payload we need was absent.
    #[error("Missing content: {0}")]
    MissingContent(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "JSON", "data URI", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The request did not complete within the allowed time.
    #[error("Timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ForgeError {
    /// Creates a Provider error without an HTTP status.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            status: None,
            message: message.into(),
        }
    }

    /// Creates a Provider error carrying an HTTP status code.
    pub fn provider_status(status: u16, message: impl Into<String>) -> Self {
        Self::Provider {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Creates a MissingContent error
    pub fn missing_content(message: impl Into<String>) -> Self {
        Self::MissingContent(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a Provider error
    pub fn is_provider(&self) -> bool {
        matches!(self, Self::Provider { .. })
    }

    /// Check if this is a Timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

impl From<serde_json::Error> for ForgeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<base64::DecodeError> for ForgeError {
    fn from(err: base64::DecodeError) -> Self {
        Self::Serialization {
            format: "base64".to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_display() {
        let err = ForgeError::provider_status(429, "rate limited");
        assert_eq!(err.to_string(), "Provider error (429): rate limited");

        let err = ForgeError::provider("connection refused");
        assert_eq!(err.to_string(), "Provider error: connection refused");
    }

    #[test]
    fn test_json_error_converts_to_serialization() {
        let err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let forge_err: ForgeError = err.into();
        assert!(matches!(
            forge_err,
            ForgeError::Serialization { ref format, .. } if format == "JSON"
        ));
    }
}
