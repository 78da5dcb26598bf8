//! Widgets resource: routes, handlers, and in-memory state.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use jsonapi_axum::{
    media_type_header, serialize_response_body, GatewayConfig, JsonApiBody, JsonApiDefaults,
    SerializeRejection,
};
use parking_lot::RwLock;
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

use crate::request_id;

const MAX_BODY_BYTES: usize = 1024 * 1024;
const HANDLER_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Serialize)]
pub struct Widget {
    pub id: u64,
    pub name: String,
}

#[derive(Clone, Default)]
pub struct AppState {
    widgets: Arc<RwLock<HashMap<u64, Widget>>>,
    next_id: Arc<AtomicU64>,
}

impl AppState {
    /// A store pre-populated with a couple of widgets.
    pub fn seeded() -> Self {
        let state = Self::default();
        state.insert("gear");
        state.insert("sprocket");
        state
    }

    fn insert(&self, name: &str) -> Widget {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let widget = Widget {
            id,
            name: name.to_owned(),
        };
        self.widgets.write().insert(id, widget.clone());
        widget
    }
}

/// Build the full application router: widget routes, the JSON:API gateway
/// defaults, and the observability layers.
pub fn router(gateway: GatewayConfig) -> Router {
    // Limit and timeout sit inside the gateway layers so their rejections
    // are still formatted as error documents.
    let router = Router::new()
        .route("/widgets", get(list_widgets).post(create_widget))
        .route("/widgets/{id}", get(get_widget))
        .with_state(AppState::seeded())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TimeoutLayer::new(HANDLER_TIMEOUT))
        .jsonapi_defaults(gateway);

    request_id::instrument(router)
}

async fn list_widgets(State(state): State<AppState>) -> Result<Response, SerializeRejection> {
    let widgets = state.widgets.read();
    let mut data: Vec<&Widget> = widgets.values().collect();
    data.sort_by_key(|w| w.id);

    let document = json!({ "data": data });
    let text = serialize_response_body(&document)?;
    Ok(([(header::CONTENT_TYPE, media_type_header())], text).into_response())
}

async fn get_widget(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    match state.widgets.read().get(&id) {
        Some(widget) => Json(json!({ "data": widget })).into_response(),
        None => (StatusCode::NOT_FOUND, "no such widget").into_response(),
    }
}

async fn create_widget(
    State(state): State<AppState>,
    JsonApiBody(document): JsonApiBody,
) -> Response {
    let Some(name) = document
        .pointer("/data/attributes/name")
        .and_then(Value::as_str)
    else {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "title": "Invalid Widget",
                "detail": "a widget needs a name",
                "source": { "pointer": "/data/attributes/name" }
            })),
        )
            .into_response();
    };

    let widget = state.insert(name);
    (StatusCode::CREATED, Json(json!({ "data": widget }))).into_response()
}
