pub mod category;
pub mod health;
pub mod product;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /products                 list (GET), create (POST)
/// /products/{id}            soft delete (DELETE)
/// /categories               list (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product::router())
        .nest("/categories", category::router())
}
