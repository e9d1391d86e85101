//! Album gallery operations over a content store.

pub mod service;
pub mod types;

pub use service::{album_marker_path, upload_path, GalleryService, ALBUM_MARKER};
pub use types::{Album, RepositoryRef, UploadOutcome, UploadRequest};
