//! Core JSON:API wire contract (pure data model, no HTTP framework dependencies).
//!
//! Holds the media-type negotiation rules, the error-object/error-document
//! model, and the normalization logic that turns an arbitrary failed response
//! into `{title, detail, source}` parts. Framework glue lives in
//! `jsonapi-axum`.

pub mod document;
pub mod negotiate;
pub mod normalize;

pub use document::{ErrorDocument, ErrorObject, ErrorSource};
pub use negotiate::MEDIA_TYPE;
pub use normalize::{normalized_error, BodyShape, ErrorParts};
