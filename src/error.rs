//! Error types for docgate
//!
//! Policy denials are not errors. They come back as `Decision { allowed: false, .. }`
//! and only turn into [`Error::Forbidden`] at the boundary via `Decision::into_result`.

use thiserror::Error;

/// The main error type for docgate operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The request itself is malformed. Fixing the input and retrying may succeed.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// A delegation edge names a role that is not defined.
    #[error("role '{referenced_by}' lists unknown assignable role '{role}'")]
    UnknownRole { role: String, referenced_by: String },

    /// Two role definitions share the same id.
    #[error("duplicate role definition '{role}'")]
    DuplicateRole { role: String },

    /// Configuration could not be read or parsed.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Generic boundary signal for a denied decision. Carries no detail.
    #[error("forbidden")]
    Forbidden,
}

/// Coarse classification used by callers to decide whether to retry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    Configuration,
    Forbidden,
}

impl Error {
    pub fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidInput { message: message.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Error::Config { message: message.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidInput { .. } => ErrorKind::InvalidInput,
            Error::UnknownRole { .. } | Error::DuplicateRole { .. } | Error::Config { .. } => {
                ErrorKind::Configuration
            }
            Error::Forbidden => ErrorKind::Forbidden,
        }
    }

    /// Only malformed input is worth retrying after the caller fixes the request.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::InvalidInput
    }
}

/// Result type alias for docgate operations
pub type Result<T> = std::result::Result<T, Error>;
