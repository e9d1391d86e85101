//! Remote content store access.
//!
//! The gateway never owns any data: every listing and every write is a
//! single call against a [`ContentStore`], bound to one repository and one
//! branch at construction time.

pub mod error;
pub mod github;
pub mod types;

use async_trait::async_trait;
use serde_json::Value;

pub use error::StoreError;
pub use github::{encode_path, GitHubContentStore};
pub use types::{Entry, EntryType, FileWrite};

/// Path-addressed read and write of repository content.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Get the content at `path` (empty for the repository root).
    ///
    /// Directories yield an array of entries, files a single object. The
    /// value is returned as the store produced it.
    async fn get_content(&self, path: &str) -> Result<Value, StoreError>;

    /// Create the file at `write.path`, or overwrite it if it exists.
    async fn put_file(&self, write: &FileWrite) -> Result<Value, StoreError>;
}
