//! Validation utilities for Web API DTOs.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::gallery::service::validate_album_name;
use crate::web::error::ApiError;

/// A JSON extractor that validates the request body.
///
/// Deserialization failures become `BAD_REQUEST`, validation failures a
/// `VALIDATION_ERROR` with field-level details.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid JSON: {}", e)))?;

        value.validate().map_err(ApiError::from_validation_errors)?;

        Ok(ValidatedJson(value))
    }
}

/// Validate that a string is usable as an album directory name.
pub fn album_name(value: &str) -> Result<(), validator::ValidationError> {
    validate_album_name(value).map_err(|e| {
        let message = match e {
            crate::GalleryError::Validation(msg) => msg,
            other => other.to_string(),
        };
        validator::ValidationError::new("album_name").with_message(message.into())
    })
}
