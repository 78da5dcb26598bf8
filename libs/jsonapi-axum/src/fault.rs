//! Out-of-band fault state: how uncaught application errors reach the
//! catch-all handler.
//!
//! A fault rides on the response as an extension instead of in the body, so
//! the error-document layer can distinguish "handler wrote an error body"
//! from "something blew up" and pick the right normalization branch.

use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Message of an uncaught application fault, attached to the response.
#[derive(Debug, Clone)]
pub struct Fault(pub String);

/// Signature accepted by `CatchPanicLayer::custom`.
pub type PanicResponder = fn(Box<dyn Any + Send + 'static>) -> Response;

/// Convert a caught panic into a bare 500 carrying the panic message as a
/// [`Fault`], to be formatted by the error-document layer downstream.
pub fn panic_to_fault(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(text) = err.downcast_ref::<String>() {
        text.clone()
    } else if let Some(text) = err.downcast_ref::<&str>() {
        (*text).to_owned()
    } else {
        "unhandled panic".to_owned()
    };
    tracing::error!(panic = %message, "request handler panicked");

    let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
    response.extensions_mut().insert(Fault(message));
    response
}

/// Wrapper turning any application error into a 500 whose message rides the
/// fault channel. Lets handlers use `?` on arbitrary error types.
#[derive(Debug)]
pub struct HandlerError(pub anyhow::Error);

/// Result type for fallible handlers behind the gateway.
pub type HandlerResult<T> = Result<T, HandlerError>;

impl<E> From<E> for HandlerError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "request failed");
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response.extensions_mut().insert(Fault(self.0.to_string()));
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_payloads_become_fault_messages() {
        let response = panic_to_fault(Box::new("division by zero"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let fault = response.extensions().get::<Fault>().unwrap();
        assert_eq!(fault.0, "division by zero");
    }

    #[test]
    fn opaque_panic_payloads_get_a_fixed_message() {
        let response = panic_to_fault(Box::new(42_u32));
        let fault = response.extensions().get::<Fault>().unwrap();
        assert_eq!(fault.0, "unhandled panic");
    }

    #[test]
    fn handler_errors_carry_their_message() {
        let err = HandlerError::from(anyhow::anyhow!("backend unavailable"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let fault = response.extensions().get::<Fault>().unwrap();
        assert_eq!(fault.0, "backend unavailable");
    }
}
