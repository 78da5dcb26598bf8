//! Error normalization: derive `{title, detail, source}` from whatever state
//! a failed response happens to be in.
//!
//! A failing response body can be a structured error a handler set
//! deliberately, a framework-default text, or nothing at all; an uncaught
//! fault may ride alongside it. The precedence below resolves that
//! ambiguity and is fixed: exactly one branch decides the outcome.

use http::StatusCode;
use serde_json::{Map, Value};

use crate::document::ErrorSource;
use crate::negotiate;

/// Markup emitted for a missing route by HTML-first stacks. Scrubbed from
/// error details so clients never receive markup inside a JSON document.
pub const HTML_NOT_FOUND_BODY: &str = "<h1>Not Found</h1>";

/// A response body classified into the shapes the normalizer distinguishes.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyShape {
    /// A JSON object a handler set deliberately as a detailed error.
    Structured(Map<String, Value>),
    /// A JSON array; only its first element participates in normalization.
    Sequence(Vec<Value>),
    /// Plain text, or any non-container JSON value.
    Scalar(String),
    Empty,
}

impl BodyShape {
    /// Classify raw body bytes, taking the declared Content-Type into
    /// account: only JSON-shaped types are parsed, everything else is text.
    pub fn classify(content_type: Option<&str>, bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return Self::Empty;
        }
        if content_type.is_some_and(negotiate::is_json_content_type) {
            match serde_json::from_slice::<Value>(bytes) {
                Ok(Value::Object(map)) => return Self::Structured(map),
                Ok(Value::Array(items)) => return Self::Sequence(items),
                Ok(Value::String(text)) => return Self::Scalar(text),
                Ok(Value::Null) => return Self::Empty,
                Ok(other) => return Self::Scalar(other.to_string()),
                // Mislabelled JSON falls through to the text reading.
                Err(_) => {}
            }
        }
        Self::Scalar(String::from_utf8_lossy(bytes).into_owned())
    }

    /// First element of the body viewed as a sequence; a scalar body counts
    /// as a one-element sequence of itself.
    fn first(&self) -> Option<String> {
        match self {
            Self::Sequence(items) => items.first().and_then(text_of),
            Self::Scalar(text) if !text.is_empty() => Some(text.clone()),
            _ => None,
        }
    }
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Normalized `{title, detail, source}` parts, ready for the document builder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorParts {
    pub title: Option<String>,
    pub detail: Option<String>,
    pub source: Option<ErrorSource>,
}

/// Derive error parts from the response status, the classified body, and an
/// optional out-of-band fault message.
///
/// Precedence, first match wins:
/// 1. a structured body passes through unchanged;
/// 2. 404 with a first body element: `Not Found`, detail scrubbed when the
///    element is the literal HTML marker;
/// 3. a fault: `Unknown Error` with the fault message as detail;
/// 4. a first body element becomes the detail, no title;
/// 5. nothing: both absent.
pub fn normalized_error(status: StatusCode, body: &BodyShape, fault: Option<&str>) -> ErrorParts {
    if let BodyShape::Structured(map) = body {
        return ErrorParts {
            title: string_field(map, "title"),
            detail: string_field(map, "detail"),
            source: map
                .get("source")
                .and_then(|value| serde_json::from_value(value.clone()).ok()),
        };
    }

    if status == StatusCode::NOT_FOUND {
        if let Some(first) = body.first() {
            let detail = (first != HTML_NOT_FOUND_BODY).then_some(first);
            return ErrorParts {
                title: Some("Not Found".to_owned()),
                detail,
                source: None,
            };
        }
    }

    if let Some(message) = fault {
        return ErrorParts {
            title: Some("Unknown Error".to_owned()),
            detail: Some(message.to_owned()),
            source: None,
        };
    }

    ErrorParts {
        title: None,
        detail: body.first(),
        source: None,
    }
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_owned)
}
