//! File handlers for Web API.

use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use serde_json::Value;
use std::sync::Arc;

use crate::gallery::UploadRequest;
use crate::web::dto::{ListFilesQuery, UploadForm, UploadResponse};
use crate::web::error::{ApiError, ErrorBody};
use crate::web::handlers::AppState;

/// GET /api/files - List repository content.
///
/// Returns the store's listing verbatim: an array for a directory, an
/// object for a single file.
#[utoipa::path(
    get,
    path = "/api/files",
    tag = "files",
    params(ListFilesQuery),
    responses(
        (status = 200, description = "Repository content, passed through from the store"),
        (status = 404, description = "Path not found", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn list_files(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListFilesQuery>,
) -> Result<Json<Value>, ApiError> {
    let data = state.gallery.list_contents(query.path.as_deref()).await?;
    Ok(Json(data))
}

/// POST /api/upload - Upload a file.
///
/// Request body: multipart/form-data with a "file" part and optional
/// "album" and "filename" fields.
#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "files",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File uploaded", body = UploadResponse),
        (status = 400, description = "Missing file or invalid form", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut request = UploadRequest::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::warn!("Failed to read multipart field: {}", e);
        ApiError::bad_request("Invalid multipart data")
    })? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" => {
                request.original_name = field.file_name().map(|s| s.to_string());
                request.content = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| {
                            tracing::warn!("Failed to read file content: {}", e);
                            ApiError::bad_request("Failed to read file")
                        })?
                        .to_vec(),
                );
            }
            "album" | "filename" => {
                let value = field.text().await.map_err(|e| {
                    tracing::warn!("Failed to read form field {}: {}", name, e);
                    ApiError::bad_request(format!("Invalid {}", name))
                })?;
                if name == "album" {
                    request.album = Some(value);
                } else {
                    request.filename = Some(value);
                }
            }
            _ => {}
        }
    }

    let outcome = state.gallery.upload(request).await?;
    Ok(Json(outcome.into()))
}
