//! Fail-fast admission control and the request deadline.
//!
//! Requests beyond the configured in-flight limit (pooled connections plus
//! the bounded wait queue) are shed with 503 instead of queueing. Admitted
//! requests that outlive the request timeout are answered with 408.

use axum::response::{IntoResponse, Response};
use pis_core::error::CoreError;
use tower::load_shed::error::Overloaded;
use tower::timeout::error::Elapsed;
use tower::BoxError;

use crate::error::AppError;

/// Error handler for the load-shedding and timeout stack.
pub async fn handle_middleware_error(err: BoxError) -> Response {
    if err.is::<Overloaded>() {
        tracing::warn!("Request shed: in-flight limit reached");
        return AppError::Core(CoreError::Unavailable("in-flight request limit reached".into()))
            .into_response();
    }
    if err.is::<Elapsed>() {
        return AppError::Timeout.into_response();
    }

    AppError::InternalError(format!("Unhandled middleware error: {err}")).into_response()
}
