//! Unified error system for enrollment sessions
//!
//! A single error type shared by every collaborator interface. The session
//! controller never returns these to its caller; it folds them into a
//! finalized outcome.

use serde::{Deserialize, Serialize};

/// Unified error type for all enrollment operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum EnrollmentError {
    /// Camera access refused or restricted
    #[error("Permission denied: {message}")]
    PermissionDenied {
        /// Error message describing the permission issue
        message: String,
    },

    /// Session token acquisition failed or returned nothing usable
    #[error("Session token error: {message}")]
    SessionToken {
        /// Error message describing the token failure
        message: String,
    },

    /// Submission transport failure or unexpected server response
    #[error("Network error: {message}")]
    Network {
        /// Error message describing the network issue
        message: String,
    },

    /// Invalid input such as an empty capture payload
    #[error("Invalid: {message}")]
    Invalid {
        /// Error message describing the invalid input
        message: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message describing the serialization failure
        message: String,
    },

    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {message}")]
    Config {
        /// Error message describing the configuration problem
        message: String,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Error message describing the internal error
        message: String,
    },
}

impl EnrollmentError {
    /// Create a permission denied error
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied {
            message: message.into(),
        }
    }

    /// Create a session token error
    pub fn session_token(message: impl Into<String>) -> Self {
        Self::SessionToken {
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// The human-readable message without the category prefix.
    ///
    /// This is what ends up in front of the user as the session's last message.
    pub fn message(&self) -> &str {
        match self {
            Self::PermissionDenied { message }
            | Self::SessionToken { message }
            | Self::Network { message }
            | Self::Invalid { message }
            | Self::Serialization { message }
            | Self::Config { message }
            | Self::Internal { message } => message,
        }
    }
}

/// Standard Result type for enrollment operations
pub type Result<T> = std::result::Result<T, EnrollmentError>;

impl From<serde_json::Error> for EnrollmentError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

impl From<toml::de::Error> for EnrollmentError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(err.to_string())
    }
}

impl From<std::io::Error> for EnrollmentError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => Self::permission_denied(err.to_string()),
            _ => Self::internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_error_creation() {
        let err = EnrollmentError::network("connection reset");
        assert_matches!(err, EnrollmentError::Network { .. });
        assert_eq!(err.to_string(), "Network error: connection reset");
        assert_eq!(err.message(), "connection reset");
    }

    #[test]
    fn test_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_matches!(
            EnrollmentError::from(json_err),
            EnrollmentError::Serialization { .. }
        );

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "camera");
        assert_matches!(
            EnrollmentError::from(io_err),
            EnrollmentError::PermissionDenied { .. }
        );
    }
}
