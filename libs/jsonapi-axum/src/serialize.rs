//! Last-step response serialization with graceful degradation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Render a response body as JSON text.
///
/// This is the last step before bytes leave the process: a value that cannot
/// be represented in JSON degrades to a client-visible 400 instead of
/// crossing the boundary as a crash.
pub fn serialize_response_body<T: Serialize>(body: &T) -> Result<String, SerializeRejection> {
    serde_json::to_string(body).map_err(SerializeRejection)
}

/// Rejection raised when a response body cannot be rendered as JSON.
#[derive(Debug, Error)]
#[error("Unserializable entities in the response body")]
pub struct SerializeRejection(#[source] pub serde_json::Error);

impl IntoResponse for SerializeRejection {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "response body failed to serialize");
        (
            StatusCode::BAD_REQUEST,
            "Unserializable entities in the response body",
        )
            .into_response()
    }
}
