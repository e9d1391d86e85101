//! API handlers.

pub mod albums;
pub mod files;

pub use albums::*;
pub use files::*;

use crate::gallery::GalleryService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Gallery operations against the configured repository.
    pub gallery: GalleryService,
}

impl AppState {
    /// Create a new application state.
    pub fn new(gallery: GalleryService) -> Self {
        Self { gallery }
    }
}
