//! gitgallery - photo albums stored in a GitHub repository.
//!
//! A thin HTTP gateway: every endpoint is a single call against the
//! repository's contents API, reshaped into a small JSON response.

pub mod config;
pub mod error;
pub mod gallery;
pub mod logging;
pub mod store;
pub mod web;

pub use config::Config;
pub use error::{GalleryError, Result};
pub use gallery::{Album, GalleryService, RepositoryRef, UploadOutcome, UploadRequest};
pub use store::{ContentStore, Entry, EntryType, FileWrite, GitHubContentStore, StoreError};
pub use web::WebServer;
