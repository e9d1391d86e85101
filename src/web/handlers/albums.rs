//! Album handlers for Web API.

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::gallery::Album;
use crate::web::dto::{CreateAlbumRequest, CreateAlbumResponse, ListAlbumsQuery, ValidatedJson};
use crate::web::error::{ApiError, ErrorBody};
use crate::web::handlers::AppState;

/// POST /api/album - Create an album.
///
/// Writes an empty `.gitkeep` into the new directory. Creating an existing
/// album succeeds and rewrites the marker.
#[utoipa::path(
    post,
    path = "/api/album",
    tag = "albums",
    request_body = CreateAlbumRequest,
    responses(
        (status = 200, description = "Album created", body = CreateAlbumResponse),
        (status = 400, description = "Invalid album name", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn create_album(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<CreateAlbumRequest>,
) -> Result<Json<CreateAlbumResponse>, ApiError> {
    let data = state.gallery.create_album(&req.name).await?;
    Ok(Json(CreateAlbumResponse::new(data)))
}

/// GET /api/albums - List albums.
#[utoipa::path(
    get,
    path = "/api/albums",
    tag = "albums",
    params(ListAlbumsQuery),
    responses(
        (status = 200, description = "Top-level directories", body = Vec<Album>),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn list_albums(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListAlbumsQuery>,
) -> Result<Json<Vec<Album>>, ApiError> {
    let albums = state.gallery.list_albums(query.include_files).await?;
    Ok(Json(albums))
}
