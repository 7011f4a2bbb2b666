//! Request extractors that report failures through [`AppError`].

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use proxyhub_core::types::DbId;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON body that has been decoded and then checked with
/// [`validator::Validate`].
///
/// Decode failures become [`AppError::BadRequest`]; rule violations become
/// [`AppError::Validation`] with per-field details. Both map to 400.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| {
                tracing::warn!(error = %rejection.body_text(), "Invalid request body");
                AppError::BadRequest(format!("invalid request body: {}", rejection.body_text()))
            })?;

        value.validate().map_err(|errors| {
            tracing::warn!(error = %errors, "Request validation failed");
            AppError::from(errors)
        })?;

        Ok(ValidatedJson(value))
    }
}

/// A `{id}` path segment parsed as a [`DbId`].
///
/// A non-numeric segment is rejected with 400 before the handler body runs.
pub struct ClientId(pub DbId);

impl<S> FromRequestParts<S> for ClientId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<DbId>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: PathRejection| {
                tracing::warn!(error = %rejection.body_text(), "Invalid proxy client id");
                AppError::BadRequest("invalid proxy client id".to_string())
            })?;
        Ok(ClientId(id))
    }
}
