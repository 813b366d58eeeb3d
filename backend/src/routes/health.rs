//! Health probes and metrics scrape endpoint
//!
//! - /health: process is up
//! - /health/ready: database reachable (503 otherwise)
//! - /health/live: liveness, never touches dependencies
//! - /metrics: Prometheus text format, 404 when no recorder is installed

use crate::{db, state::AppState};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::error;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<CheckStatus>,
}

#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthResponse {
    fn new(status: &'static str) -> Self {
        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            database: None,
        }
    }
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::new("healthy"))
}

pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let check = match db::health_check(state.db()).await {
        Ok(()) => CheckStatus {
            healthy: true,
            message: None,
        },
        Err(e) => {
            error!("Readiness check failed: {:?}", e);
            CheckStatus {
                healthy: false,
                message: Some("database unavailable".to_string()),
            }
        }
    };

    let (code, status) = if check.healthy {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not_ready")
    };

    let mut response = HealthResponse::new(status);
    response.database = Some(check);
    (code, Json(response))
}

pub async fn liveness_check() -> Json<HealthResponse> {
    Json(HealthResponse::new("alive"))
}

pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check_returns_healthy() {
        let response = health_check().await;
        assert_eq!(response.status, "healthy");
        assert!(!response.version.is_empty());
        assert!(response.database.is_none());
    }

    #[tokio::test]
    async fn test_liveness_check_returns_alive() {
        assert_eq!(liveness_check().await.status, "alive");
    }
}
