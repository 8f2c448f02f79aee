use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status plus whether the AI scoring service is reachable.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let scoring_service = if state.scoring.check_availability().await {
        "active"
    } else {
        "unavailable"
    };

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": env!("CARGO_PKG_NAME"),
        "scoring_service": scoring_service
    }))
}
