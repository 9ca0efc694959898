//! Health check handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ComponentHealth, DetailedHealthResponse, HealthResponse};
use crate::state::AppState;

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
    })
}

/// GET /health/detailed
pub async fn health_detailed(State(state): State<AppState>) -> Json<DetailedHealthResponse> {
    let store = match state.store.ping().await {
        Ok(()) => ComponentHealth {
            status: "up".to_string(),
            detail: None,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Booking store health check failed");
            ComponentHealth {
                status: "down".to_string(),
                detail: Some(e.message),
            }
        }
    };

    let status = if store.status == "up" { "ok" } else { "degraded" };

    Json(DetailedHealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        store,
        dispatcher: state.dispatcher.metrics(),
        dead_letters: state.dispatcher.dead_letters().len(),
    })
}
