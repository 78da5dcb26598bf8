//! The [`JsonApiBody`] extractor.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value};
use thiserror::Error;

/// Extracts the request body as a JSON value.
///
/// An absent or zero-size body yields an empty object rather than an error,
/// so handlers never need to special-case bodyless requests. Malformed JSON
/// is terminal: the request is aborted with 400 and a plain-text message,
/// which the catch-all layer later folds into an error document.
#[derive(Debug, Clone)]
pub struct JsonApiBody(pub Value);

impl<S> FromRequest<S> for JsonApiBody
where
    S: Send + Sync,
{
    type Rejection = BodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await?;
        if bytes.is_empty() {
            return Ok(Self(Value::Object(Map::new())));
        }
        let value = serde_json::from_slice(&bytes).map_err(BodyRejection::Malformed)?;
        Ok(Self(value))
    }
}

/// Rejection for the [`JsonApiBody`] extractor.
#[derive(Debug, Error)]
pub enum BodyRejection {
    #[error("Malformed JSON in the request body")]
    Malformed(#[source] serde_json::Error),

    #[error("failed to buffer request body")]
    Buffer(#[from] BytesRejection),
}

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Malformed(_) => (
                StatusCode::BAD_REQUEST,
                "Malformed JSON in the request body",
            )
                .into_response(),
            Self::Buffer(rejection) => rejection.into_response(),
        }
    }
}
