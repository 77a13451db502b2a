//! Application setup and request handling.

use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    extract::State,
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use libcrosscast::types::MISSING_REQUIRED_FIELDS;
use libcrosscast::{CrosscastError, Dispatcher, PublishRequest};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

/// Headers browser clients send alongside publish requests.
const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// Build the Axum application router.
///
/// CORS is permissive: any origin, with the headers browser clients send
/// alongside publish requests. The CORS layer negotiates preflights; the
/// outer set-header layers keep `Access-Control-Allow-Origin` and
/// `Access-Control-Allow-Headers` on every response, preflight or not, and
/// an explicit OPTIONS handler answers bare OPTIONS probes with a 200.
pub fn build_app(dispatcher: Arc<Dispatcher>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            header::CONTENT_TYPE,
        ]);

    Router::new()
        .route("/", post(publish_handler).options(preflight_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
        .with_state(AppState { dispatcher })
}

/// POST / — parse the publish request, dispatch it, return the report.
///
/// A body that fails to parse gets the same structural 400 as one with
/// missing required fields; per-platform failures live inside the 200
/// report and never change the HTTP status.
async fn publish_handler(
    State(state): State<AppState>,
    payload: Result<Json<PublishRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            debug!("rejecting malformed publish request: {rejection}");
            return missing_fields_response();
        }
    };

    match state.dispatcher.dispatch(&request).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(CrosscastError::InvalidInput(message)) => {
            (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
        }
        Err(other) => {
            error!("dispatch failed: {other}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": other.to_string() })),
            )
                .into_response()
        }
    }
}

fn missing_fields_response() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": MISSING_REQUIRED_FIELDS })),
    )
        .into_response()
}

/// OPTIONS / — CORS preflight; the CORS layer attaches the actual headers.
async fn preflight_handler() -> StatusCode {
    StatusCode::OK
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
