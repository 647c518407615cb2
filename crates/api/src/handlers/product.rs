//! Handlers for the `/products` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use pis_core::pagination::Paginated;
use pis_core::product::CreateProductInput;
use pis_db::models::product::{CreatedProduct, ProductListItem};

use crate::error::AppResult;
use crate::extract::{IdPath, JsonBody};
use crate::query::ProductListParams;
use crate::state::AppState;

/// POST /api/products
///
/// Validates the payload, then creates the product and its category links
/// in one transaction.
pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateProductInput>,
) -> AppResult<(StatusCode, Json<CreatedProduct>)> {
    let product = input.into_new_product()?;
    let created = state.products.create(&product).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/products
pub async fn list(
    State(state): State<AppState>,
    ProductListParams(query): ProductListParams,
) -> AppResult<Json<Paginated<ProductListItem>>> {
    let page = state.products.list(&query).await?;
    Ok(Json(page))
}

/// DELETE /api/products/{id}
///
/// Soft delete: the product is marked inactive and disappears from listings.
pub async fn delete(State(state): State<AppState>, IdPath(id): IdPath) -> AppResult<StatusCode> {
    state.products.soft_delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
