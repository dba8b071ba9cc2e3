//! Error types and result aliases for storelink operations.
//!
//! Provides a unified error type that covers every failure a lookup can
//! surface, with actionable messages for the CLI and status codes for the
//! request/response layer.

use thiserror::Error;

/// Unified error type for all storelink operations
#[derive(Error, Debug)]
pub enum StoreError {
    // Resolution errors
    #[error("Unsupported Microsoft Store link or ID: '{input}'")]
    InvalidInput { input: String },

    // Request errors
    #[error("{message}")]
    MissingField { field: String, message: String },

    // Upstream errors
    #[error("Upstream error: {message}")]
    Upstream {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // Config errors
    #[error("Failed to parse storelink.toml: {message}")]
    TomlParse { message: String },

    #[error("Configuration field '{field}' is invalid: {reason}")]
    ConfigValidation { field: String, reason: String },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for storelink operations
pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// Create an upstream error from any error type
    pub fn upstream<E>(message: String, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Upstream {
            message,
            source: Some(Box::new(source)),
        }
    }

    /// Create a missing-field error for a request document
    pub fn missing_field(field: &str, message: &str) -> Self {
        Self::MissingField {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// HTTP-style status code used when the error is returned as a response document
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::InvalidInput { .. } | StoreError::MissingField { .. } => 400,
            StoreError::Upstream { .. } => 502,
            _ => 500,
        }
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            StoreError::InvalidInput { .. } => Some(
                "Pass a 12-character product id or an apps.microsoft.com / microsoft.com store link",
            ),
            StoreError::Upstream { .. } => {
                Some("Check your internet connection or the configured upstream endpoint")
            },
            StoreError::TomlParse { .. } | StoreError::ConfigValidation { .. } => {
                Some("Fix storelink.toml or the STORELINK_* environment variables")
            },
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_status_codes() {
        let invalid = StoreError::InvalidInput {
            input: "nope".to_string(),
        };
        assert_eq!(invalid.status_code(), 400);

        let missing = StoreError::missing_field("url", "Missing input");
        assert_eq!(missing.status_code(), 400);
        assert_eq!(missing.to_string(), "Missing input");

        let upstream = StoreError::Upstream {
            message: "connection refused".to_string(),
            source: None,
        };
        assert_eq!(upstream.status_code(), 502);
    }

    #[test]
    fn test_upstream_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
        let err = StoreError::upstream("listing fetch failed".to_string(), io);

        assert!(err.source().is_some());
        assert!(err.suggestion().is_some());
    }
}
