//! Request DTOs for Web API.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::validation::album_name;

/// Query parameters for `GET /api/files`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListFilesQuery {
    /// Repository path to list (root when omitted).
    pub path: Option<String>,
}

/// Query parameters for `GET /api/albums`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListAlbumsQuery {
    /// Populate each album's `files` with its regular files.
    #[serde(default)]
    pub include_files: bool,
}

/// Album creation request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAlbumRequest {
    /// Album (directory) name.
    #[validate(length(min = 1, max = 255), custom(function = "album_name"))]
    pub name: String,
}

/// Multipart form accepted by `POST /api/upload` (documentation only).
#[derive(Debug, ToSchema)]
pub struct UploadForm {
    /// File to upload.
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    /// Album to place the file in.
    pub album: Option<String>,
    /// Name to store the file under inside the album.
    pub filename: Option<String>,
}
