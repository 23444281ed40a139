//! Aggregate activity endpoints.
//!
//! - GET  /api/github/{owner}          — full activity with meta envelope
//! - GET  /api/github/{owner}/summary  — meta block only
//! - GET  /api/github/{owner}/quick    — first listed repository only
//! - POST /api/github/{owner}/refresh  — alias of the full fetch (no cache)
//!
//! A 429 is returned only when the orchestrator reports that rate limiting
//! prevented fetching anything at all; an owner with genuinely zero
//! repositories gets an empty 200.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};

use crate::error::{AppError, Result};
use crate::github::{fetch_activity, repos};
use crate::models::{ActivityResponse, Meta, RepoActivity};
use crate::routes::{AppState, validate_owner};

const RATE_LIMIT_MESSAGE: &str =
    "GitHub API rate limit reached. Please retry after the reset window.";

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/github/{owner}", get(get_activity))
        .route("/api/github/{owner}/summary", get(get_summary))
        .route("/api/github/{owner}/quick", get(get_quick))
        .route("/api/github/{owner}/refresh", post(refresh))
        .with_state(state)
}

async fn get_activity(
    State(state): State<AppState>,
    Path(owner): Path<String>,
) -> Result<Json<ActivityResponse>> {
    validate_owner(&owner)?;
    tracing::info!(owner, "request: fetch activity");

    let report = fetch_activity(&state.client, &owner, &state.shutdown).await;
    if report.rate_limited_empty() {
        return Err(AppError::RateLimited(RATE_LIMIT_MESSAGE.to_string()));
    }

    let body = ActivityResponse::new(report.repos);
    tracing::debug!(
        total_repos = body.meta.total_repos,
        total_commits = body.meta.total_commits,
        "response assembled"
    );
    Ok(Json(body))
}

async fn get_summary(
    State(state): State<AppState>,
    Path(owner): Path<String>,
) -> Result<Json<Meta>> {
    validate_owner(&owner)?;
    let report = fetch_activity(&state.client, &owner, &state.shutdown).await;
    Ok(Json(Meta::from_activity(&report.repos)))
}

/// Only processes the first listed repository, for cheap smoke checks.
async fn get_quick(
    State(state): State<AppState>,
    Path(owner): Path<String>,
) -> Result<Json<ActivityResponse>> {
    validate_owner(&owner)?;
    tracing::info!(owner, "request: quick activity");

    let listing = repos::list_repos(&state.client, &owner, &state.shutdown).await;
    if listing.repos.is_empty() && listing.outcome == repos::ListOutcome::RateLimited {
        return Err(AppError::RateLimited(RATE_LIMIT_MESSAGE.to_string()));
    }

    let mut data: Vec<RepoActivity> = Vec::new();
    if let Some(first) = listing.repos.first() {
        let repo_ref = first.to_ref(&owner);
        let commits = crate::github::commits::fetch_commits(
            &state.client,
            &repo_ref.owner,
            &repo_ref.name,
            &state.shutdown,
        )
        .await;
        data.push(RepoActivity {
            repository_name: first.name.clone(),
            commits,
        });
    }

    Ok(Json(ActivityResponse::new(data)))
}

async fn refresh(
    state: State<AppState>,
    owner: Path<String>,
) -> Result<Json<ActivityResponse>> {
    // No cache exists yet; refresh is a straight re-fetch.
    get_activity(state, owner).await
}
