//! Response DTOs for Web API.

use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::gallery::UploadOutcome;

/// Response of `POST /api/upload`.
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    /// Always true.
    pub success: bool,
    /// Raw-content URL of the uploaded file.
    pub url: String,
    /// Store response, unmodified.
    #[schema(value_type = Object)]
    pub data: Value,
}

impl From<UploadOutcome> for UploadResponse {
    fn from(outcome: UploadOutcome) -> Self {
        Self {
            success: true,
            url: outcome.url,
            data: outcome.data,
        }
    }
}

/// Response of `POST /api/album`.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateAlbumResponse {
    /// Always true.
    pub success: bool,
    /// Store response, unmodified.
    #[schema(value_type = Object)]
    pub data: Value,
}

impl CreateAlbumResponse {
    /// Wrap a store response.
    pub fn new(data: Value) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
