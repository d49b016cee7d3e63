//! Liveness endpoint shared by every service.

use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

pub const HEALTHY: &str = "healthy";

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn healthy() -> Self {
        Self {
            status: HEALTHY.to_string(),
        }
    }
}

/// Always reports healthy; the process answering is the whole check.
pub async fn handle_health() -> Json<HealthStatus> {
    Json(HealthStatus::healthy())
}

/// `GET /health`, mergeable into any service router.
pub fn health_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(handle_health))
}
