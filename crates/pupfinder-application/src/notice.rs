//! User-facing notifications.

use pupfinder_core::{PupError, Result};

/// A dismissible message produced at the end of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self::Success(message.into())
    }

    /// Logs the full error and keeps only its user-facing text.
    pub fn from_error(error: &PupError) -> Self {
        tracing::warn!("Operation failed: {}", error);
        Self::Error(error.user_message())
    }

    /// `Success(on_success(value))` or the error notice.
    pub fn from_result<T, F>(result: &Result<T>, on_success: F) -> Self
    where
        F: FnOnce(&T) -> String,
    {
        match result {
            Ok(value) => Self::Success(on_success(value)),
            Err(e) => Self::from_error(e),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) | Self::Error(message) => message,
        }
    }
}
