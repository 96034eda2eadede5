//! Error handling for DoseBuddy
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for DoseBuddy application
#[derive(Error, Debug)]
pub enum DoseBuddyError {
    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Backend API error: {0}")]
    Backend(#[from] BackendError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Prediction backend specific errors
///
/// Every variant is a transport-level failure. An endpoint that answers
/// `success: false` is not an error; it is carried in the response type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Backend request failed: {0}")]
    RequestFailed(String),

    #[error("Backend timeout")]
    Timeout,

    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),

    #[error("Backend service unavailable")]
    ServiceUnavailable,
}

/// Result type alias for DoseBuddy operations
pub type Result<T> = std::result::Result<T, DoseBuddyError>;

/// Result type alias for backend operations
pub type BackendResult<T> = std::result::Result<T, BackendError>;

impl DoseBuddyError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            DoseBuddyError::Telegram(_) => true,
            DoseBuddyError::Backend(_) => true,
            DoseBuddyError::Config(_) => false,
            DoseBuddyError::Http(_) => true,
            DoseBuddyError::Serialization(_) => false,
            DoseBuddyError::Io(_) => true,
            DoseBuddyError::UrlParse(_) => false,
            DoseBuddyError::InvalidInput(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DoseBuddyError::Config(_) => ErrorSeverity::Critical,
            DoseBuddyError::Backend(_) => ErrorSeverity::Warning,
            DoseBuddyError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
