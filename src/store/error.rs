//! Errors reported by a remote content store.

use thiserror::Error;

/// Failure of a remote content store call.
///
/// The display form is the upstream message, unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The path does not exist on the target branch.
    #[error("{0}")]
    NotFound(String),

    /// The credential was missing, invalid, or lacks access.
    #[error("{0}")]
    Unauthorized(String),

    /// The store's rate limit is exhausted.
    #[error("{0}")]
    RateLimited(String),

    /// The path cannot address content inside the repository.
    #[error("{0}")]
    InvalidPath(String),

    /// Anything else: transport failures, unexpected statuses, bad bodies.
    #[error("{0}")]
    Unknown(String),
}

impl StoreError {
    /// Classify an unsuccessful upstream response.
    ///
    /// `rate_limit_exhausted` is true when the response carried
    /// `x-ratelimit-remaining: 0` or a `retry-after` header.
    pub fn from_status(status: u16, rate_limit_exhausted: bool, message: String) -> Self {
        match status {
            404 => StoreError::NotFound(message),
            401 => StoreError::Unauthorized(message),
            403 | 429 if rate_limit_exhausted => StoreError::RateLimited(message),
            429 => StoreError::RateLimited(message),
            403 => StoreError::Unauthorized(message),
            _ => StoreError::Unknown(message),
        }
    }

    /// The upstream message carried by this error.
    pub fn message(&self) -> &str {
        match self {
            StoreError::NotFound(msg)
            | StoreError::Unauthorized(msg)
            | StoreError::RateLimited(msg)
            | StoreError::InvalidPath(msg)
            | StoreError::Unknown(msg) => msg,
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        StoreError::Unknown(e.to_string())
    }
}
