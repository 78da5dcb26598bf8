//! Centralized error mapping: every status in [400, 600) leaves the router
//! as a JSON:API error document.

use std::sync::Arc;

use axum::body::to_bytes;
use axum::extract::Request;
use axum::http::{header, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use jsonapi_core::{normalized_error, BodyShape, ErrorDocument, ErrorObject, MEDIA_TYPE};

use crate::config::GatewayConfig;
use crate::fault::Fault;

/// Upper bound when buffering a failed response body for normalization.
const ERROR_BODY_CAP: usize = 64 * 1024;

/// Fallback wire form should document serialization ever fail.
const EMPTY_DOCUMENT: &str = r#"{"errors":[]}"#;

/// Catch-all handler: buffers the body of any error response, normalizes it
/// together with fault state into one error object, logs it, and rewrites
/// the response as an error document with the JSON:API content type.
///
/// Responses that already carry an error document pass through untouched.
pub async fn error_document_layer(
    config: Arc<GatewayConfig>,
    req: Request,
    next: Next,
) -> Response {
    let response = next.run(req).await;

    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }
    if is_error_document(&response) {
        return response;
    }

    let (parts, body) = response.into_parts();
    let bytes = to_bytes(body, ERROR_BODY_CAP).await.unwrap_or_default();
    let content_type = parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    let shape = BodyShape::classify(content_type, &bytes);
    let fault = parts.extensions.get::<Fault>().map(|f| f.0.as_str());

    let normalized = normalized_error(status, &shape, fault);
    let mut error = ErrorObject::new().with_status(status);
    if let Some(title) = normalized.title {
        error = error.with_title(title);
    }
    if let Some(detail) = normalized.detail {
        error = error.with_detail(detail);
    }
    if let Some(source) = normalized.source {
        error = error.with_source(source);
    }

    tracing::error!(
        progname = %config.progname,
        id = %error.id,
        status = status.as_u16(),
        title = error.title.as_deref().unwrap_or(""),
        detail = error.detail.as_deref().unwrap_or(""),
        "request failed"
    );

    // Documents are built from plain strings; the fast path cannot fail.
    let document = ErrorDocument::single(error);
    let text = serde_json::to_string(&document).unwrap_or_else(|_| EMPTY_DOCUMENT.to_owned());

    (
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static(MEDIA_TYPE))],
        text,
    )
        .into_response()
}

/// Default produced representation: success responses that negotiated the
/// generic JSON type are re-labelled as JSON:API. A handler that set any
/// other explicit type keeps it.
pub async fn default_media_type(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    if response.status().is_success() && produces_generic_json(&response) {
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(MEDIA_TYPE));
    }
    response
}

fn is_error_document(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with(MEDIA_TYPE))
}

fn produces_generic_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| {
            ct.parse::<mime::Mime>()
                .is_ok_and(|m| m.essence_str() == "application/json")
        })
}
