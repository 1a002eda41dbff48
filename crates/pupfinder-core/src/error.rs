//! Error types for PupFinder.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire PupFinder client.
///
/// Variants are split by the stage that failed so that callers can surface
/// each failure distinctly (search vs. detail lookup vs. match).
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum PupError {
    /// A catalog operation was attempted without a valid session
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The login call was rejected or could not be completed
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Login form values failed local validation
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// The search stage failed; no detail call was issued
    #[error("Search failed: {0}")]
    SearchFailed(String),

    /// The detail lookup stage failed
    #[error("Dog lookup failed: {0}")]
    DetailFailed(String),

    /// Match submission or match resolution failed
    #[error("Match failed: {0}")]
    MatchFailed(String),

    /// A match was requested with an empty favorites set
    #[error("must have at least one favorite")]
    NoFavorites,

    /// The remote logout call failed
    #[error("Logout failed: {0}")]
    LogoutFailed(String),

    /// Search criteria were rejected before any request was built
    #[error("Invalid search criteria: {0}")]
    InvalidCriteria(String),

    /// HTTP transport error (connection failure or non-success status)
    #[error("Transport error: {message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PupError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Transport error
    pub fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Transport {
            status,
            message: message.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an InvalidCriteria error
    pub fn invalid_criteria(message: impl Into<String>) -> Self {
        Self::InvalidCriteria(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotAuthenticated error
    pub fn is_not_authenticated(&self) -> bool {
        matches!(self, Self::NotAuthenticated)
    }

    /// Check if this is a NoFavorites precondition error
    pub fn is_no_favorites(&self) -> bool {
        matches!(self, Self::NoFavorites)
    }

    /// Check if this is a transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Returns the HTTP status carried by a transport error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }

    /// Short text suitable for a dismissible user notification.
    ///
    /// Stage errors map to a fixed headline; the detailed cause stays in the
    /// `Display` output for logs.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotAuthenticated => "Please log in first".to_string(),
            Self::Authentication(_) => "Login failed".to_string(),
            Self::InvalidCredentials(reason) => reason.clone(),
            Self::SearchFailed(_) => "Search failed".to_string(),
            Self::DetailFailed(_) => "Failed to load dogs".to_string(),
            Self::MatchFailed(_) => "Match failed".to_string(),
            Self::NoFavorites => "must have at least one favorite".to_string(),
            Self::LogoutFailed(_) => "Logout failed".to_string(),
            Self::InvalidCriteria(reason) => reason.clone(),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for PupError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for PupError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for PupError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for PupError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, PupError>`.
pub type Result<T> = std::result::Result<T, PupError>;
