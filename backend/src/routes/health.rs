//! Health check endpoints
//!
//! - /health - process is up, with package version
//! - /health/ready - store answers `SELECT 1`; 503 otherwise
//! - /health/live - always OK while the server is running

use crate::{db, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<StoreStatus>,
}

/// Status of the recipe store
#[derive(Serialize)]
pub struct StoreStatus {
    pub reachable: bool,
    pub in_memory: bool,
}

impl HealthResponse {
    fn new(status: &'static str) -> Self {
        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            store: None,
        }
    }
}

/// Basic health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::new("healthy"))
}

/// Readiness probe - the store must answer before traffic is accepted
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    // Failures are logged by the probe; callers only see reachability.
    let store = StoreStatus {
        reachable: db::health_check(state.db()).await.is_ok(),
        in_memory: db::is_in_memory(&state.config().database.url),
    };

    if store.reachable {
        Ok(Json(HealthResponse {
            store: Some(store),
            ..HealthResponse::new("ready")
        }))
    } else {
        Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                store: Some(store),
                ..HealthResponse::new("not_ready")
            }),
        ))
    }
}

/// Liveness probe
pub async fn liveness_check() -> Json<HealthResponse> {
    Json(HealthResponse::new("alive"))
}
