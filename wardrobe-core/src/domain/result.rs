//! Result and error types for the core library

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core library error type
///
/// Payloads are plain strings so an error can be cloned and handed to every
/// caller waiting on the same in-flight login.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No response was received (DNS, refused connection, timeout, ...)
    #[error("Network error: {0}")]
    Network(String),

    #[error("Not authenticated: {0}")]
    Unauthenticated(String),

    #[error("Access denied: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Server error (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    /// The sign-in response did not carry a usable numeric user id
    #[error("Incomplete user data received from the server")]
    IncompleteUserData,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid session data: {0}")]
    InvalidSession(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(String),
}

impl Error {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Broad failure category, used for user-facing notifications
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Network(_) => ErrorCategory::NetworkUnreachable,
            Error::Unauthenticated(_)
            | Error::Forbidden(_)
            | Error::NotFound(_)
            | Error::Server { .. } => ErrorCategory::ServerRejected,
            Error::Validation(_) => ErrorCategory::MalformedInput,
            Error::IncompleteUserData | Error::InvalidSession(_) => {
                ErrorCategory::InvalidSessionData
            }
            Error::Storage(_) | Error::Config(_) | Error::Json(_) => ErrorCategory::Local,
        }
    }

    /// HTTP status that produced this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Unauthenticated(_) => Some(401),
            Error::Forbidden(_) => Some(403),
            Error::NotFound(_) => Some(404),
            Error::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    NetworkUnreachable,
    ServerRejected,
    MalformedInput,
    InvalidSessionData,
    Local,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorCategory::NetworkUnreachable => "Server unreachable",
            ErrorCategory::ServerRejected => "Request rejected",
            ErrorCategory::MalformedInput => "Invalid input",
            ErrorCategory::InvalidSessionData => "Session problem",
            ErrorCategory::Local => "Local error",
        };
        f.write_str(label)
    }
}

/// Classification of a failed HTTP response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureClass {
    Unauthenticated,
    Forbidden,
    NotFound,
    Generic,
}

impl FailureClass {
    /// Classify a non-success status code
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => FailureClass::Unauthenticated,
            403 => FailureClass::Forbidden,
            404 => FailureClass::NotFound,
            _ => FailureClass::Generic,
        }
    }

    /// Build the error for this class
    pub fn into_error(self, status: u16, message: String) -> Error {
        match self {
            FailureClass::Unauthenticated => Error::Unauthenticated(message),
            FailureClass::Forbidden => Error::Forbidden(message),
            FailureClass::NotFound => Error::NotFound(message),
            FailureClass::Generic => Error::Server { status, message },
        }
    }
}
