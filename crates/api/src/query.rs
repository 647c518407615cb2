//! Query-string extractors for list endpoints.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use pis_core::error::CoreError;
use pis_core::product::ProductListQuery;

use crate::error::AppError;

/// Validated `GET /products` query (`?page&limit&search&categoryIds`).
///
/// The raw string is read as ordered key/value pairs so that repeated
/// `categoryIds` keys survive; see [`ProductListQuery::from_pairs`].
#[derive(Debug)]
pub struct ProductListParams(pub ProductListQuery);

impl<S> FromRequestParts<S> for ProductListParams
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::Core(CoreError::validation(rejection.body_text())))?;

        Ok(Self(ProductListQuery::from_pairs(&pairs)?))
    }
}
