//! Pre-request media-type guard.

use axum::body::HttpBody;
use axum::extract::Request;
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use jsonapi_core::negotiate;

/// Runs before every handler. Ordered checks, first failure wins:
///
/// 1. the client must accept the JSON:API media type, else 406;
/// 2. a request carrying a body must declare exactly that type, else 415;
/// 3. any Content-Type parameter other than `charset` is 415.
///
/// Rejections short-circuit with an empty body; the catch-all layer formats
/// them into error documents on the way out.
pub async fn media_type_guard(req: Request, next: Next) -> Response {
    let accept = req
        .headers()
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok());
    if !negotiate::accepts_jsonapi(accept) {
        return StatusCode::NOT_ACCEPTABLE.into_response();
    }

    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    if has_request_body(&req) && !content_type.is_some_and(negotiate::content_type_is_jsonapi) {
        return StatusCode::UNSUPPORTED_MEDIA_TYPE.into_response();
    }
    if content_type.is_some_and(negotiate::has_disallowed_params) {
        return StatusCode::UNSUPPORTED_MEDIA_TYPE.into_response();
    }

    next.run(req).await
}

/// A request carries a body when its stream reports a non-zero size; for
/// streams of unknown size the headers decide.
fn has_request_body(req: &Request) -> bool {
    let hint = req.body().size_hint();
    if hint.lower() > 0 {
        return true;
    }
    if hint.upper() == Some(0) {
        return false;
    }
    let declared_len = req
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());
    matches!(declared_len, Some(n) if n > 0)
        || req.headers().contains_key(header::TRANSFER_ENCODING)
}
