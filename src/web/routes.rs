//! HTTP routes for the demo page and its single prediction endpoint.

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use super::page;
use crate::app::SpeechAdapter;

/// Generic failure notice shown when the underlying error is hidden.
const GENERIC_ERROR: &str = "Error";

/// State shared by all handlers.
#[derive(Clone)]
pub struct WebState {
    pub adapter: SpeechAdapter,
    pub show_error: bool,
    pub title: String,
}

#[derive(Debug, Deserialize)]
struct PredictRequest {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
struct PredictResponse {
    audio: String,
}

/// Build the router for the demo.
pub fn create_router(state: WebState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/predict", post(predict_handler))
        .route("/file/:name", get(file_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Bind `host:port` and serve until `shutdown` is cancelled.
pub async fn serve(router: Router, host: &str, port: u16, shutdown: CancellationToken) -> Result<()> {
    let listener = TcpListener::bind((host, port)).await.with_context(|| format!("Failed to bind {}:{}", host, port))?;
    info!("🌐 Running on http://{}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .context("Web server failed")?;

    Ok(())
}

async fn index_handler(State(state): State<WebState>) -> Html<String> {
    Html(page::render(&state.title))
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn predict_handler(State(state): State<WebState>, Json(request): Json<PredictRequest>) -> Response {
    let adapter = state.adapter.clone();
    let result = tokio::task::spawn_blocking(move || adapter.generate_speech(&request.text)).await;

    let path = match result {
        Ok(Ok(path)) => path,
        Ok(Err(e)) => {
            error!("❌ Synthesis failed: {:#}", e);
            let message = if state.show_error { format!("{:#}", e) } else { GENERIC_ERROR.to_string() };
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": message }))).into_response();
        }
        Err(e) => {
            error!("❌ Synthesis task panicked: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": GENERIC_ERROR }))).into_response();
        }
    };

    let name = path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
    Json(PredictResponse { audio: format!("/file/{}", name) }).into_response()
}

async fn file_handler(State(state): State<WebState>, Path(name): Path<String>) -> Response {
    let output_path = state.adapter.output_path();

    // Only the output artifact is served
    if output_path.file_name().is_none_or(|n| n != name.as_str()) {
        return (StatusCode::NOT_FOUND, "Not found").into_response();
    }

    match tokio::fs::read(output_path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "audio/wav"), (header::CACHE_CONTROL, "no-store")], bytes).into_response(),
        Err(e) => {
            debug!("Output file {} not readable: {}", output_path.display(), e);
            (StatusCode::NOT_FOUND, "Not found").into_response()
        }
    }
}
