//! Error types for gitgallery.

use thiserror::Error;

use crate::store::StoreError;

/// Common error type for gitgallery.
#[derive(Error, Debug)]
pub enum GalleryError {
    /// The remote content store rejected or failed the request.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// An upload request arrived without a `file` part.
    #[error("no file was provided")]
    MissingFile,

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for gitgallery operations.
pub type Result<T> = std::result::Result<T, GalleryError>;
