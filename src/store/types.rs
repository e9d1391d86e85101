//! Types shared by content store implementations.

use base64::Engine;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Kind of a repository entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Regular file.
    File,
    /// Directory.
    Dir,
    /// Symbolic link.
    Symlink,
    /// Git submodule.
    Submodule,
}

/// A path-addressed object in the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Entry {
    /// Last path segment.
    pub name: String,
    /// Path relative to the repository root.
    pub path: String,
    /// File or directory.
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// API locator for the entry.
    #[serde(default)]
    pub url: String,
    /// Direct download locator (files only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    /// Size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Blob SHA.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}

impl Entry {
    /// Whether this entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.entry_type == EntryType::Dir
    }

    /// Whether this entry is a regular file.
    pub fn is_file(&self) -> bool {
        self.entry_type == EntryType::File
    }
}

/// A create-or-update request for a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileWrite {
    /// Target path relative to the repository root.
    pub path: String,
    /// Commit message.
    pub message: String,
    /// Raw file content.
    pub content: Vec<u8>,
}

impl FileWrite {
    /// Create a new file write.
    pub fn new(path: impl Into<String>, message: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            content,
        }
    }

    /// Content encoded as standard padded base64.
    pub fn encoded_content(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_deserialize_github_listing_item() {
        let value = json!({
            "name": "vacation",
            "path": "vacation",
            "sha": "abc123",
            "size": 0,
            "url": "https://api.github.com/repos/o/r/contents/vacation?ref=main",
            "html_url": "https://github.com/o/r/tree/main/vacation",
            "git_url": "https://api.github.com/repos/o/r/git/trees/abc123",
            "download_url": null,
            "type": "dir"
        });

        let entry: Entry = serde_json::from_value(value).unwrap();
        assert_eq!(entry.name, "vacation");
        assert!(entry.is_dir());
        assert!(!entry.is_file());
        assert_eq!(entry.download_url, None);
        assert_eq!(entry.sha.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_entry_serialize_uses_type_key() {
        let entry = Entry {
            name: "a.png".to_string(),
            path: "trip/a.png".to_string(),
            entry_type: EntryType::File,
            url: "u".to_string(),
            download_url: None,
            size: Some(3),
            sha: None,
        };

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["type"], "file");
        assert_eq!(value["size"], 3);
        assert!(value.get("download_url").is_none());
        assert!(value.get("sha").is_none());
    }

    #[test]
    fn test_encoded_content() {
        let write = FileWrite::new("a.txt", "Upload a.txt", b"hello".to_vec());
        assert_eq!(write.encoded_content(), "aGVsbG8=");
    }

    #[test]
    fn test_encoded_content_empty() {
        let write = FileWrite::new("album/.gitkeep", "Create album: album", Vec::new());
        assert_eq!(write.encoded_content(), "");
    }
}
