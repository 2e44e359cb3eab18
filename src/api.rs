use std::sync::Arc;

use anyhow::{Error, Result};
use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::post,
};
use serde_json::{Value, json};
use tokio::{net::TcpListener, sync::mpsc};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::Config;

pub struct AppState {
    queue: mpsc::Sender<Value>,
}

pub fn build_router(queue: mpsc::Sender<Value>) -> Router {
    let state = Arc::new(AppState { queue });

    Router::new()
        .route("/receive-json", post(receive_json))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_api_server(config: &Config, queue: mpsc::Sender<Value>) -> Result<(), Error> {
    let app = build_router(queue);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = TcpListener::bind(&addr).await?;

    info!(address = %addr, "Ingestion server started");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Pure hand-off: the body is parsed as arbitrary JSON and enqueued as-is.
/// The response is sent before decoding or delivery happen, so downstream
/// failures are never visible to the caller.
async fn receive_json(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Cannot parse JSON" })),
            )
                .into_response();
        }
    };

    // Suspends when the queue is full: backpressure instead of drops.
    if state.queue.send(payload).await.is_err() {
        error!("Dispatch queue is closed, dropping event");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    StatusCode::OK.into_response()
}
