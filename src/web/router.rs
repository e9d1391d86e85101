//! Router configuration for Web API.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::dto::{CreateAlbumRequest, CreateAlbumResponse, UploadForm, UploadResponse};
use super::error::{ErrorBody, ErrorCode};
use super::handlers::{self, create_album, list_albums, list_files, upload_file, AppState};
use super::middleware::create_cors_layer;
use crate::config::ServerConfig;
use crate::gallery::Album;
use crate::store::{Entry, EntryType};

/// OpenAPI document for the gallery API.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::files::list_files,
        handlers::files::upload_file,
        handlers::albums::create_album,
        handlers::albums::list_albums
    ),
    components(schemas(
        Album,
        Entry,
        EntryType,
        UploadForm,
        UploadResponse,
        CreateAlbumRequest,
        CreateAlbumResponse,
        ErrorBody,
        ErrorCode
    )),
    tags(
        (name = "files", description = "Repository content and uploads"),
        (name = "albums", description = "Top-level album directories")
    )
)]
pub struct ApiDoc;

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, config: &ServerConfig) -> Router {
    let api_routes = Router::new()
        .route("/files", get(list_files))
        .route("/upload", post(upload_file))
        .route("/album", post(create_album))
        .route("/albums", get(list_albums))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes()));

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(&config.cors_origins)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Create the Swagger UI router serving the OpenAPI document.
pub fn create_swagger_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
