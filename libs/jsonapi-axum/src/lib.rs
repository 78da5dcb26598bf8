//! Axum integration for the JSON:API gateway: content-negotiation guard,
//! request-body extractor, and the catch-all error-document layer.
//!
//! The single entry point is [`JsonApiDefaults::jsonapi_defaults`], which
//! installs the whole pipeline on a router. Handlers then only need to set a
//! status and (optionally) a body; every error status in [400, 600) leaves
//! the process as a well-formed JSON:API error document.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::middleware::from_fn;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;

pub mod body;
pub mod config;
pub mod error_layer;
pub mod fault;
pub mod guard;
pub mod serialize;

pub use body::{BodyRejection, JsonApiBody};
pub use config::GatewayConfig;
pub use fault::{Fault, HandlerError, HandlerResult};
pub use jsonapi_core::MEDIA_TYPE;
pub use serialize::{serialize_response_body, SerializeRejection};

/// The JSON:API media type as a ready-made header value.
pub fn media_type_header() -> HeaderValue {
    HeaderValue::from_static(MEDIA_TYPE)
}

/// One-time router setup: wires the gateway onto every route.
///
/// No static-file serving and no session/CSRF machinery are ever installed
/// (see [`GatewayConfig`]), and panics never reach the transport as a
/// default error page.
pub trait JsonApiDefaults {
    /// Install the media-type guard, the produced-type default, panic
    /// capture, and the catch-all error-document handler.
    fn jsonapi_defaults(self, config: GatewayConfig) -> Self;
}

impl<S> JsonApiDefaults for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn jsonapi_defaults(self, config: GatewayConfig) -> Self {
        let config = Arc::new(config);

        // Layer order, innermost first: the guard must short-circuit before
        // any handler runs, and its rejections must still flow out through
        // the document formatter; panic capture sits between the two so a
        // fault response is formatted like any other error.
        self.layer(from_fn(guard::media_type_guard))
            .layer(from_fn(error_layer::default_media_type))
            .layer(CatchPanicLayer::custom(
                fault::panic_to_fault as fault::PanicResponder,
            ))
            .layer(from_fn(move |req, next| {
                error_layer::error_document_layer(config.clone(), req, next)
            }))
    }
}
