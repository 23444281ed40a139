//! API route handlers - maps HTTP endpoints to the GitHub service layer.
//!
//! Each submodule defines routes for a feature area:
//! - `activity`: Aggregate activity per owner (GET /api/github/{owner}, summary, quick, refresh)
//! - `commits`: Commits for a single repository
//! - `status`: Health check, rate-limit snapshot, token validation

pub mod activity;
pub mod commits;
pub mod status;

use axum::Router;
use tokio_util::sync::CancellationToken;

use crate::error::{AppError, Result};
use crate::github::SharedClient;

/// Shared per-request context: the upstream client plus the process-wide
/// shutdown token, which interrupts in-flight backoff waits.
#[derive(Clone)]
pub struct AppState {
    pub client: SharedClient,
    pub shutdown: CancellationToken,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(activity::routes(state.clone()))
        .merge(commits::routes(state.clone()))
        .merge(status::routes(state))
}

/// GitHub user/org names: alphanumerics and hyphens, max 39 chars, no
/// leading or trailing hyphen.
pub(crate) fn validate_owner(candidate: &str) -> Result<()> {
    let bytes = candidate.as_bytes();
    let valid = !bytes.is_empty()
        && bytes.len() <= 39
        && bytes.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'-')
        && bytes[0] != b'-'
        && bytes[bytes.len() - 1] != b'-';

    if valid {
        Ok(())
    } else {
        tracing::warn!(candidate, "invalid GitHub identifier received");
        Err(AppError::InvalidOwner(candidate.to_string()))
    }
}
