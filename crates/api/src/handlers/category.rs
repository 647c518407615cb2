//! Handlers for the `/categories` resource.

use axum::extract::State;
use axum::Json;
use pis_db::models::category::Category;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/categories
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    let categories = state.categories.list().await?;
    Ok(Json(categories))
}
