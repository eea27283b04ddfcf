//! Liveness endpoint for load-balancers and uptime checks.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use utoipa::OpenApi;

use crate::config::Config;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(get_health))]
pub struct HealthApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(get_health))
}

/// Report process liveness plus the model and gate in use. Neither provider
/// is contacted, so a healthy answer says nothing about upstream reachability.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Server is up", body = Value)
    )
)]
pub async fn get_health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(health_body(&state.config))
}

fn health_body(config: &Config) -> Value {
    json!({
        "status":    "ok",
        "version":   env!("CARGO_PKG_VERSION"),
        "model":     config.model,
        "auth_gate": config.auth_enabled(),
    })
}
