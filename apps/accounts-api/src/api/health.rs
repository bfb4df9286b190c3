//! Readiness endpoint

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use database::mongodb::{HealthStatus, check_health_detailed};
use mongodb::Client;
use serde_json::Value;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    readiness(state.mongo_client.clone()).await
}

/// 200 when MongoDB answers a ping, 503 otherwise
pub(crate) async fn readiness(client: Client) -> (StatusCode, Json<Value>) {
    let checks: Vec<(&str, HealthCheckFuture)> = vec![(
        "mongodb",
        Box::pin(async move { ping_outcome(check_health_detailed(&client).await) }),
    )];

    run_health_checks(checks).await.unwrap_or_else(|unavailable| unavailable)
}

fn ping_outcome(status: HealthStatus) -> Result<(), String> {
    tracing::debug!(
        healthy = status.healthy,
        response_time_ms = status.response_time_ms,
        "MongoDB ping"
    );
    if status.healthy {
        Ok(())
    } else {
        Err(status.message.unwrap_or_else(|| "ping failed".to_string()))
    }
}
