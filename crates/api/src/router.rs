//! Shared application router builder.
//!
//! Provides [`build_app_router`] so both the production binary (`main.rs`)
//! and integration tests (`tests/common/mod.rs`) use the exact same middleware
//! stack.

use std::any::Any;
use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::extract::DefaultBodyLimit;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::error::AppError;
use crate::middleware::admission::handle_middleware_error;
use crate::middleware::error_detail::expose_error_detail;
use crate::routes;
use crate::state::AppState;

/// Largest accepted request body.
const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Build the full application [`Router`] with all middleware layers.
///
/// The middleware stack is applied bottom-up:
///
/// 1. CORS
/// 2. Set request ID on incoming requests
/// 3. Structured request/response tracing
/// 4. Propagate request ID to response
/// 5. Error detail exposure (non-production only)
/// 6. Panic recovery (catch panics, return 500 JSON)
/// 7. Body size limit
/// 8. Admission control and request timeout (503 / 408 JSON)
pub fn build_app_router(state: AppState) -> Router {
    let config = state.config.clone();
    let cors = build_cors_layer(&config);
    let request_id_header = HeaderName::from_static("x-request-id");

    let routes = Router::new()
        // Banner and health check at root level (not under /api).
        .merge(routes::health::router())
        .nest("/api", routes::api_routes())
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(route_not_found)
        // -- Middleware stack (applied bottom-up) --
        // Admission control: fail fast instead of queueing without bound.
        // Admitted requests are bounded by the request timeout.
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .load_shed()
                .layer(GlobalConcurrencyLimitLayer::new(config.db.admission_limit()))
                .timeout(Duration::from_secs(config.request_timeout_secs)),
        )
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        // Panic recovery: catch panics and return 500 JSON.
        .layer(CatchPanicLayer::custom(handle_panic));

    // Every AppError response passes through here, including shed,
    // timed-out and panicked requests.
    let routes = if config.exposes_error_detail() {
        routes.layer(axum::middleware::map_response(expose_error_detail))
    } else {
        routes
    };

    routes
        // Propagate request ID to response.
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        // Structured request/response tracing.
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Set request ID on incoming requests.
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        // CORS.
        .layer(cors)
        // Shared state.
        .with_state(state)
}

/// Fallback for unmatched paths.
async fn route_not_found() -> AppError {
    AppError::NotFound("Route not found".into())
}

/// Fallback for a known path hit with a method it does not serve.
async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Render a handler panic as a regular 500 error body.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };

    AppError::InternalError(format!("Handler panicked: {message}")).into_response()
}

/// Build the CORS middleware layer from server configuration.
///
/// Panics if a configured origin is not a valid header value. The router is
/// built once at startup, so a bad `CORS_ORIGINS` stops the process there.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .map(|o| {
            o.parse()
                .unwrap_or_else(|e| panic!("Invalid CORS origin '{o}': {e}"))
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}
