//! JSON:API error objects and the error document wrapper.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single JSON:API error object.
///
/// Every instance carries a fresh occurrence id so clients can correlate a
/// reported failure with server logs. Optional fields are omitted from the
/// wire form when absent, never emitted as null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[cfg_attr(
    feature = "utoipa",
    schema(title = "ErrorObject", description = "JSON:API error object")
)]
pub struct ErrorObject {
    /// Unique identifier for this occurrence of the error.
    pub id: String,
    /// Short, human-readable summary of the problem.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// HTTP status code applicable to this problem, as a string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Reference to the offending part of the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ErrorSource>,
}

/// Pointer to the request fragment an error refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "utoipa", schema(title = "ErrorSource"))]
pub struct ErrorSource {
    /// JSON Pointer into the request document (e.g. "/data/attributes/name").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pointer: Option<String>,
    /// Name of the query parameter that caused the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
}

impl ErrorObject {
    /// Create an error object with a fresh occurrence id and no other fields.
    ///
    /// Id generation is concurrency-safe and never replayable: two objects
    /// built from identical inputs still differ in `id`.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: None,
            detail: None,
            status: None,
            source: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Record the HTTP status in its string form.
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status.as_u16().to_string());
        self
    }

    pub fn with_source(mut self, source: ErrorSource) -> Self {
        self.source = Some(source);
        self
    }
}

impl Default for ErrorObject {
    fn default() -> Self {
        Self::new()
    }
}

/// The JSON:API error document: one or more error objects under `errors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "utoipa", schema(title = "ErrorDocument"))]
pub struct ErrorDocument {
    pub errors: Vec<ErrorObject>,
}

impl ErrorDocument {
    pub fn new(errors: Vec<ErrorObject>) -> Self {
        Self { errors }
    }

    /// Wrap a single error object, the common case for the gateway.
    pub fn single(error: ErrorObject) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_objects_have_distinct_ids() {
        let a = ErrorObject::new();
        let b = ErrorObject::new();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn identical_inputs_differ_only_in_id() {
        let build = || {
            ErrorObject::new()
                .with_title("Not Found")
                .with_detail("no such widget")
                .with_status(StatusCode::NOT_FOUND)
        };
        let a = build();
        let b = build();
        assert_ne!(a.id, b.id);
        assert_eq!(a.title, b.title);
        assert_eq!(a.detail, b.detail);
        assert_eq!(a.status, b.status);
        assert_eq!(a.source, b.source);
    }

    #[test]
    fn status_is_recorded_as_decimal_string() {
        let err = ErrorObject::new().with_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.status.as_deref(), Some("422"));
    }

    #[test]
    fn absent_fields_are_omitted_from_the_wire_form() {
        let err = ErrorObject::new().with_status(StatusCode::BAD_REQUEST);
        let json = serde_json::to_value(&err).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("id"));
        assert!(obj.contains_key("status"));
        assert!(!obj.contains_key("title"));
        assert!(!obj.contains_key("detail"));
        assert!(!obj.contains_key("source"));
    }

    #[test]
    fn field_set_survives_a_round_trip() {
        let err = ErrorObject::new()
            .with_title("Invalid Widget")
            .with_status(StatusCode::UNPROCESSABLE_ENTITY)
            .with_source(ErrorSource {
                pointer: Some("/data/attributes/name".to_owned()),
                parameter: None,
            });

        let text = serde_json::to_string(&ErrorDocument::single(err.clone())).unwrap();
        let decoded: ErrorDocument = serde_json::from_str(&text).unwrap();
        assert_eq!(decoded.errors.len(), 1);
        assert_eq!(decoded.errors[0], err);
        // detail was absent going in and must come back absent, not null
        assert!(decoded.errors[0].detail.is_none());
    }
}
