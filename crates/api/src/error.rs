use std::error::Error as _;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pis_core::error::CoreError;
use serde::Serialize;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `pis_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No route matched the request.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The path exists but does not accept this method.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The request did not finish within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// JSON body of every non-2xx response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub message: String,
    /// Individual rule violations, present on validation failures only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    /// Internal error chain; `null` unless the deployment exposes it.
    pub stack: Option<String>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: None,
            stack: None,
        }
    }
}

/// Attached to error responses so a later layer can reveal the internal
/// error chain. See [`crate::middleware::error_detail`].
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub body: ErrorBody,
    pub detail: String,
}

const INTERNAL_MESSAGE: &str = "An internal error occurred";
const UNAVAILABLE_MESSAGE: &str = "Service temporarily unavailable";

impl AppError {
    /// Status and client-facing body for this error. 5xx variants are
    /// logged here with full detail.
    fn classify(&self) -> (StatusCode, ErrorBody) {
        match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    ErrorBody::new(format!("{entity} with id {id} not found")),
                ),
                CoreError::Validation(messages) => (
                    StatusCode::BAD_REQUEST,
                    ErrorBody {
                        errors: Some(messages.clone()),
                        ..ErrorBody::new("Validation error")
                    },
                ),
                // Conflicts are the caller's fault (e.g. a duplicate name),
                // so they surface as a plain client error.
                CoreError::Conflict(msg) => (StatusCode::BAD_REQUEST, ErrorBody::new(msg.clone())),
                CoreError::Unavailable(msg) => {
                    tracing::error!(error = %msg, "Service unavailable");
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        ErrorBody::new(UNAVAILABLE_MESSAGE),
                    )
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ErrorBody::new(INTERNAL_MESSAGE),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorBody::new(msg.clone())),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorBody::new(msg.clone())),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                ErrorBody::new("Method not allowed"),
            ),
            AppError::Timeout => {
                tracing::warn!("Request exceeded the configured timeout");
                (StatusCode::REQUEST_TIMEOUT, ErrorBody::new("Request timed out"))
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new(INTERNAL_MESSAGE),
                )
            }
        }
    }

    /// The error and all of its sources, one per line.
    pub fn detail(&self) -> String {
        let mut detail = self.to_string();
        let mut source = self.source();
        while let Some(err) = source {
            detail.push_str("\ncaused by: ");
            detail.push_str(&err.to_string());
            source = err.source();
        }
        detail
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Core(core) = &self {
            if core.is_client_error() {
                tracing::debug!(error = %core, "Request rejected");
            }
        }
        let (status, body) = self.classify();
        let report = ErrorReport {
            body: body.clone(),
            detail: self.detail(),
        };

        let mut response = (status, axum::Json(body)).into_response();
        response.extensions_mut().insert(report);
        response
    }
}

/// Classify a sqlx error into an HTTP status and body.
///
/// - `RowNotFound` maps to 404.
/// - Pool exhaustion (`PoolTimedOut`) maps to 503.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, ErrorBody) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            ErrorBody::new("Resource not found"),
        ),
        sqlx::Error::PoolTimedOut => {
            tracing::error!(error = %err, "Timed out waiting for a database connection");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorBody::new(UNAVAILABLE_MESSAGE),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new(INTERNAL_MESSAGE),
            )
        }
    }
}
