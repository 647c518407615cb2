use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::product;
use crate::state::AppState;

/// Product routes mounted at `/products`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// DELETE /{id}    -> delete (soft)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(product::list).post(product::create))
        .route("/{id}", delete(product::delete))
}
