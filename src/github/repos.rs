//! Repository listing with capped, page-numbered pagination.

use std::time::Duration;

use reqwest::StatusCode;
use tokio_util::sync::CancellationToken;

use crate::github::backoff::{compute_wait, log_rate_limit, wait_backoff, within_policy};
use crate::github::client::GitHubClient;
use crate::models::RepoItem;

const DEFAULT_MAX_REPOS: usize = 20;

/// Why the listing stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOutcome {
    /// Upstream ran out of pages.
    Exhausted,
    /// The configured repository cap was reached.
    CapReached,
    /// A rate-limit wait exceeded policy; the listing is truncated.
    RateLimited,
    /// Shutdown fired during a backoff wait.
    Cancelled,
    /// Any other upstream or transport failure; the listing is truncated.
    UpstreamError,
}

#[derive(Debug)]
pub struct RepoListing {
    pub repos: Vec<RepoItem>,
    pub outcome: ListOutcome,
}

/// List up to `max_repos` repositories for an owner.
///
/// Stops on a short or empty page, on reaching the cap (never overshooting
/// it), or on any non-success status other than a rate limit. A rate-limited
/// page is retried in place after a backoff wait; unlike commit fetching
/// there is no retry-count cap here, only the wait-time cap.
pub async fn list_repos(
    client: &GitHubClient,
    owner: &str,
    shutdown: &CancellationToken,
) -> RepoListing {
    let config = client.config();
    let per_page = config.repos_page_size;
    let max_repos = if config.max_repos > 0 {
        config.max_repos
    } else {
        DEFAULT_MAX_REPOS
    };
    let max_wait = Duration::from_millis(config.max_wait_time_ms);

    tracing::info!(owner, max_repos, "fetching repositories");

    let mut repos: Vec<RepoItem> = Vec::new();
    let mut page = 1u32;

    let outcome = loop {
        let url = client.api_url(&format!(
            "/users/{owner}/repos?per_page={per_page}&page={page}"
        ));

        let response = match client.get(&url).await {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(owner, error = %e, "transport failure while listing repositories");
                break ListOutcome::UpstreamError;
            }
        };

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::FORBIDDEN {
            log_rate_limit(response.headers(), "repositories", owner);
            let wait = compute_wait(response.headers(), 0);
            if !within_policy(wait, max_wait) {
                tracing::warn!(
                    owner,
                    wait_ms = wait.as_millis() as u64,
                    max_wait_ms = config.max_wait_time_ms,
                    "wait time exceeds maximum allowed, aborting repository fetch"
                );
                break ListOutcome::RateLimited;
            }
            tracing::warn!(
                owner,
                wait_ms = wait.as_millis() as u64,
                "rate limited while listing repositories, waiting"
            );
            if !wait_backoff(wait, shutdown).await {
                break ListOutcome::Cancelled;
            }
            // Retry the same page.
            continue;
        }

        if !status.is_success() {
            tracing::warn!(owner, %status, "non-successful status while listing repositories");
            break ListOutcome::UpstreamError;
        }

        let batch: Vec<RepoItem> = match response.json().await {
            Ok(b) => b,
            Err(e) => {
                tracing::error!(owner, error = %e, "failed to decode repository listing");
                break ListOutcome::UpstreamError;
            }
        };

        if batch.is_empty() {
            break ListOutcome::Exhausted;
        }

        let batch_len = batch.len();
        let remaining = max_repos - repos.len();
        repos.extend(batch.into_iter().take(remaining));

        if repos.len() >= max_repos {
            tracing::info!(owner, max_repos, "reached maximum repository limit");
            break ListOutcome::CapReached;
        }
        if batch_len < per_page as usize {
            // Short page: no more pages upstream.
            break ListOutcome::Exhausted;
        }
        page += 1;
    };

    tracing::info!(owner, count = repos.len(), ?outcome, "repository listing finished");
    RepoListing { repos, outcome }
}
