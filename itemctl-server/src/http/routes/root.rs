//! Root greeting and health check

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use serde_json::{json, Value};

use crate::state::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub database: DatabaseHealth,
}

#[derive(Serialize)]
pub struct DatabaseHealth {
    pub state: &'static str,
    pub active_sessions: usize,
}

/// GET /
async fn root() -> Json<Value> {
    Json(json!({ "Hello": "World" }))
}

/// GET /health
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let engine = state.engine();
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.uptime_secs(),
        database: DatabaseHealth {
            state: engine.state().as_str(),
            active_sessions: engine.active_sessions(),
        },
    })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
}
