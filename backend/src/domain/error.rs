//! Domain-level error types.
//!
//! These errors are transport agnostic. The HTTP adapter maps the
//! [`ErrorCode`] to a status and decides how much of the message a client
//! may see.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ports::UserPersistenceError;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// The requested resource does not exist.
    NotFound,
    /// The request clashes with existing state, such as a duplicate id.
    Conflict,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

impl ErrorCode {
    /// Whether the failure was raised deliberately with a client-facing reason.
    pub fn is_classified(self) -> bool {
        !matches!(self, Self::InternalError)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidRequest => "invalid_request",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::InternalError => "internal_error",
        };
        f.write_str(name)
    }
}

/// Domain error: a category plus the reason raised alongside it.
///
/// # Examples
/// ```
/// use users_api::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("User with id 9 not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.message(), "User with id 9 not found");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    message: String,
}

impl Error {
    /// Create a new error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Reason supplied when the error was raised.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

impl From<UserPersistenceError> for Error {
    fn from(err: UserPersistenceError) -> Self {
        Self::internal(err.to_string())
    }
}
