use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use bra_ingest::runtime::client::{DpbraClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use bra_ingest::runtime::fetcher::HttpFetcher;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

struct AppState {
    client: DpbraClient,
}

async fn handle_bulletin(
    State(state): State<Arc<AppState>>,
    Path(massif): Path<String>,
) -> (StatusCode, Json<serde_json::Value>) {
    match state.client.bulletin(&massif).await {
        Ok(bulletin) => (StatusCode::OK, Json(json!(bulletin))),
        Err(err) => {
            tracing::error!("Bulletin request failed for massif {massif}: {err}");
            (StatusCode::BAD_GATEWAY, Json(json!({ "error": err })))
        }
    }
}

async fn handle_massifs(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<serde_json::Value>) {
    match state.client.massifs().await {
        Ok(index) => (StatusCode::OK, Json(json!(index))),
        Err(err) => {
            tracing::error!("Massif list request failed: {err}");
            (StatusCode::BAD_GATEWAY, Json(json!({ "error": err })))
        }
    }
}

async fn handle_health() -> &'static str {
    "ok"
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let base_url = env_or("DPBRA_BASE_URL", DEFAULT_BASE_URL);
    let api_key = env_or("DPBRA_API_KEY", "");
    if api_key.is_empty() {
        tracing::warn!("DPBRA_API_KEY is not set; upstream requests will be rejected");
    }
    let timeout_secs = env_or("DPBRA_TIMEOUT_SECS", "")
        .parse()
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    let fetcher = HttpFetcher::new(api_key, Duration::from_secs(timeout_secs))
        .expect("Failed to build HTTP fetcher");
    let state = Arc::new(AppState {
        client: DpbraClient::new(base_url, Box::new(fetcher)),
    });

    let app = Router::new()
        .route("/bulletins/{massif}", get(handle_bulletin))
        .route("/massifs", get(handle_massifs))
        .fallback(handle_health)
        .with_state(state);

    let bind_addr = env_or("BIND_ADDR", "0.0.0.0:8080");
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind to {bind_addr}: {e}"));

    tracing::info!("Listening on {bind_addr}");

    axum::serve(listener, app).await.expect("Server failed");
}
