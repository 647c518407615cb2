//! Reveal internal error detail in non-production deployments.
//!
//! [`AppError`](crate::error::AppError) always renders `"stack": null` and
//! attaches an [`ErrorReport`] extension. When this middleware is installed
//! it re-renders such responses with `stack` filled from the report.

use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::ErrorReport;

/// `map_response` middleware: copy the error chain into the body.
pub async fn expose_error_detail(mut response: Response) -> Response {
    let Some(report) = response.extensions_mut().remove::<ErrorReport>() else {
        return response;
    };

    let ErrorReport { mut body, detail } = report;
    body.stack = Some(detail);

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(axum::http::header::CONTENT_LENGTH);
    let rendered = Json(body).into_response();
    let (rendered_parts, rendered_body) = rendered.into_parts();
    parts.headers.extend(rendered_parts.headers);

    Response::from_parts(parts, rendered_body)
}
