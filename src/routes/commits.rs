//! Commits for a single repository.
//!
//! GET /api/github/{owner}/{repo} — up to 20 recent commits, newest first.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::error::Result;
use crate::github::commits::fetch_commits;
use crate::models::CommitRecord;
use crate::routes::{AppState, validate_owner};

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/github/{owner}/{repo}", get(get_repo_commits))
        .with_state(state)
}

async fn get_repo_commits(
    State(state): State<AppState>,
    Path((owner, repo)): Path<(String, String)>,
) -> Result<Json<Vec<CommitRecord>>> {
    validate_owner(&owner)?;
    tracing::info!(owner, repo, "request: repository commits");

    let commits = fetch_commits(&state.client, &owner, &repo, &state.shutdown).await;
    Ok(Json(commits))
}
