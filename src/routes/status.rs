//! Service status endpoints.
//!
//! - GET /api/github/health     — liveness probe
//! - GET /api/github/status     — current GitHub API rate-limit snapshot
//! - GET /api/github/test-token — validate the configured credential

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};

use crate::github::{rate_limit, token};
use crate::models::RateLimitStatus;
use crate::routes::AppState;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/github/health", get(health))
        .route("/api/github/status", get(get_rate_limit_status))
        .route("/api/github/test-token", get(get_token_check))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn get_rate_limit_status(State(state): State<AppState>) -> Json<RateLimitStatus> {
    tracing::info!("request: GitHub API rate limit status");
    Json(rate_limit::fetch_rate_limit(&state.client).await)
}

async fn get_token_check(State(state): State<AppState>) -> impl IntoResponse {
    tracing::info!("request: GitHub token validation");
    let result = token::test_token(&state.client).await;
    let status = if result.valid {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    };
    (status, Json(result))
}
