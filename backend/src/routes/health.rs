//! Health probes
//!
//! `/health` and `/health/live` answer as long as the process serves
//! requests. `/health/ready` also pings the user store and answers 503
//! while it is unreachable.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<HealthChecks>,
}

impl HealthResponse {
    fn new(status: &'static str) -> Self {
        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            checks: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub store: CheckStatus,
}

#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::new("healthy"))
}

pub async fn liveness_check() -> Json<HealthResponse> {
    Json(HealthResponse::new("alive"))
}

pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (code, status, store) = match state.store().ping().await {
        Ok(()) => (
            StatusCode::OK,
            "ready",
            CheckStatus {
                status: "healthy",
                message: None,
            },
        ),
        Err(e) => {
            warn!(error = %e, "User store is not reachable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "not_ready",
                CheckStatus {
                    status: "unhealthy",
                    message: Some("user store unreachable".to_string()),
                },
            )
        }
    };

    let mut response = HealthResponse::new(status);
    response.checks = Some(HealthChecks { store });
    (code, Json(response))
}
