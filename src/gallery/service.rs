//! Gallery service.
//!
//! Each operation maps to exactly one kind of store call: listings read
//! content, uploads and album creation write a single file. Nothing is
//! cached between calls.

use serde_json::Value;
use std::sync::Arc;

use super::types::{Album, RepositoryRef, UploadOutcome, UploadRequest};
use crate::store::{ContentStore, Entry, FileWrite, StoreError};
use crate::{GalleryError, Result};

/// Name of the placeholder file that keeps an empty album directory alive.
pub const ALBUM_MARKER: &str = ".gitkeep";

/// Path an upload is written to.
///
/// With an album the file goes to `{album}/{filename or original}`; without
/// one it goes to the original name at the repository root and `filename`
/// is ignored. Empty values count as absent.
pub fn upload_path(album: Option<&str>, filename: Option<&str>, original: &str) -> String {
    match non_empty(album) {
        Some(album) => format!("{}/{}", album, non_empty(filename).unwrap_or(original)),
        None => original.to_string(),
    }
}

/// Path of the marker file for album `name`.
pub fn album_marker_path(name: &str) -> String {
    format!("{}/{}", name, ALBUM_MARKER)
}

/// Check that `name` can be used as an album directory.
///
/// Nested names such as `trips/2024` are accepted.
pub fn validate_album_name(name: &str) -> Result<()> {
    let invalid = |msg: &str| Err(GalleryError::Validation(msg.to_string()));

    if name.trim().is_empty() {
        return invalid("album name must not be empty");
    }
    if name.chars().any(char::is_control) {
        return invalid("album name must not contain control characters");
    }
    if name.starts_with('/') {
        return invalid("album name must be relative");
    }
    if name
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return invalid("album name contains an invalid path segment");
    }
    Ok(())
}

/// Check that `path` stays inside the repository.
///
/// Empty segments are tolerated (the store drops them); `.` and `..` are not.
pub fn validate_content_path(path: &str) -> Result<()> {
    if path.chars().any(char::is_control) {
        return Err(GalleryError::Validation(
            "path must not contain control characters".to_string(),
        ));
    }
    if path.split('/').any(|segment| segment == "." || segment == "..") {
        return Err(GalleryError::Validation(format!(
            "path '{}' contains an invalid path segment",
            path
        )));
    }
    Ok(())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Gateway between the HTTP layer and the content store.
#[derive(Clone)]
pub struct GalleryService {
    store: Arc<dyn ContentStore>,
    repository: RepositoryRef,
}

impl GalleryService {
    /// Create a service over `store` for the given repository.
    pub fn new(store: Arc<dyn ContentStore>, repository: RepositoryRef) -> Self {
        Self { store, repository }
    }

    /// Repository this service writes to.
    pub fn repository(&self) -> &RepositoryRef {
        &self.repository
    }

    /// List the content at `path` (repository root when absent).
    ///
    /// The store's response is passed through as is: an array for a
    /// directory, an object for a file.
    pub async fn list_contents(&self, path: Option<&str>) -> Result<Value> {
        let path = path.unwrap_or("");
        validate_content_path(path)?;
        Ok(self.store.get_content(path).await?)
    }

    /// Upload a file, overwriting any existing file at the same path.
    pub async fn upload(&self, request: UploadRequest) -> Result<UploadOutcome> {
        let content = request.content.ok_or(GalleryError::MissingFile)?;

        let original = non_empty(request.original_name.as_deref())
            .or_else(|| non_empty(request.filename.as_deref()))
            .ok_or_else(|| GalleryError::Validation("uploaded file has no name".to_string()))?
            .to_string();

        if let Some(album) = non_empty(request.album.as_deref()) {
            validate_album_name(album)?;
        }
        validate_content_path(&original)?;
        if let Some(filename) = non_empty(request.filename.as_deref()) {
            validate_content_path(filename)?;
        }

        let path = upload_path(
            request.album.as_deref(),
            request.filename.as_deref(),
            &original,
        );
        let url = self.repository.raw_url(&path)?;
        let write = FileWrite::new(path.clone(), format!("Upload {}", original), content);

        tracing::info!(path = %path, bytes = write.content.len(), "Uploading file");
        let data = self.store.put_file(&write).await?;

        Ok(UploadOutcome { path, url, data })
    }

    /// Create an album by writing an empty marker file into it.
    ///
    /// Creating an album that already exists rewrites its marker.
    pub async fn create_album(&self, name: &str) -> Result<Value> {
        validate_album_name(name)?;

        let write = FileWrite::new(
            album_marker_path(name),
            format!("Create album: {}", name),
            Vec::new(),
        );

        tracing::info!(album = %name, "Creating album");
        Ok(self.store.put_file(&write).await?)
    }

    /// List top-level directories as albums.
    ///
    /// `files` stays empty unless `include_files` is set, in which case each
    /// album is listed with one extra store call and its regular files
    /// (without the marker) are attached.
    pub async fn list_albums(&self, include_files: bool) -> Result<Vec<Album>> {
        let root = self.list_entries("").await?;

        let mut albums = Vec::new();
        for entry in root.iter().filter(|e| e.is_dir()) {
            let mut album = Album::from_entry(entry);
            if include_files {
                album.files = self
                    .list_entries(&entry.path)
                    .await?
                    .into_iter()
                    .filter(|e| e.is_file() && e.name != ALBUM_MARKER)
                    .collect();
            }
            albums.push(album);
        }

        Ok(albums)
    }

    /// Directory listing at `path`, decoded into entries.
    async fn list_entries(&self, path: &str) -> Result<Vec<Entry>> {
        let value = self.store.get_content(path).await?;
        if !value.is_array() {
            return Err(StoreError::Unknown(format!("'{}' is not a directory", path)).into());
        }
        serde_json::from_value(value).map_err(|e| {
            StoreError::Unknown(format!("unexpected directory listing: {}", e)).into()
        })
    }
}
