//! Extractors that turn framework rejections into [`AppError`]s, so that
//! malformed input gets the same JSON error shape as every other failure.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use pis_core::error::CoreError;
use pis_core::types::DbId;
use pis_core::validation::parse_path_id;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON request body. Syntax and type errors become validation errors.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::Core(CoreError::validation(rejection.body_text()))),
        }
    }
}

/// A positive integer `{id}` path segment.
pub struct IdPath(pub DbId);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        Ok(Self(parse_path_id(&raw)?))
    }
}
