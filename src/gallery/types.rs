//! Gallery domain types.

use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::config::GitHubConfig;
use crate::store::{encode_path, Entry, StoreError};

/// Fixed coordinates of the backing repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Target branch.
    pub branch: String,
    /// Raw content base URL.
    pub raw_base_url: String,
}

impl RepositoryRef {
    /// Build from the GitHub section of the configuration.
    pub fn from_config(config: &GitHubConfig) -> Self {
        Self {
            owner: config.owner.clone(),
            repo: config.repo.clone(),
            branch: config.branch.clone(),
            raw_base_url: config.raw_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Raw-content URL of the file at `path` on the target branch.
    ///
    /// Path segments are percent-encoded the same way the contents API
    /// encodes them.
    pub fn raw_url(&self, path: &str) -> Result<String, StoreError> {
        Ok(format!(
            "{}/{}/{}/{}/{}",
            self.raw_base_url,
            self.owner,
            self.repo,
            self.branch,
            encode_path(path)?
        ))
    }
}

/// A top-level directory of the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Album {
    /// Directory name.
    pub name: String,
    /// API locator of the directory.
    pub url: String,
    /// Files in the album (only populated on request).
    pub files: Vec<Entry>,
}

impl Album {
    /// Project a directory entry onto an album with no files.
    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            name: entry.name.clone(),
            url: entry.url.clone(),
            files: Vec::new(),
        }
    }
}

/// A file upload as received from a client.
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    /// File bytes; `None` when the request had no file part.
    pub content: Option<Vec<u8>>,
    /// Name the client gave the file part.
    pub original_name: Option<String>,
    /// Album to place the file in.
    pub album: Option<String>,
    /// Name to store the file under inside the album.
    pub filename: Option<String>,
}

impl UploadRequest {
    /// Create a request for `content` with the given original name.
    pub fn new(content: Vec<u8>, original_name: impl Into<String>) -> Self {
        Self {
            content: Some(content),
            original_name: Some(original_name.into()),
            ..Default::default()
        }
    }

    /// Place the file in an album.
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    /// Store the file under a different name.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadOutcome {
    /// Path the file was written to.
    pub path: String,
    /// Raw-content URL of the file.
    pub url: String,
    /// Store response, unmodified.
    pub data: Value,
}
