//! Commit fetching for a single repository.
//!
//! Runs a small state machine: fetch the current page, follow the `Link`
//! header's `next` relation verbatim, and drop into a backoff wait on rate
//! limits. Missing (404) and empty (409) repositories come back as empty
//! sequences; every other failure yields whatever was collected so far.

use std::time::Duration;

use reqwest::StatusCode;
use tokio_util::sync::CancellationToken;

use crate::github::backoff::{
    MAX_RETRY_ATTEMPTS, compute_wait, log_rate_limit, wait_backoff, within_policy,
};
use crate::github::client::GitHubClient;
use crate::github::link::next_page_url;
use crate::models::{CommitItem, CommitRecord};

/// Hard cap, independent of the configured page size.
pub const MAX_COMMITS_PER_REPO: usize = 20;

/// Fetch up to [`MAX_COMMITS_PER_REPO`] commits for `owner/repo`, newest
/// first as delivered upstream. Never fails: expected upstream conditions
/// all collapse into a (possibly empty) partial result.
pub async fn fetch_commits(
    client: &GitHubClient,
    owner: &str,
    repo: &str,
    shutdown: &CancellationToken,
) -> Vec<CommitRecord> {
    let config = client.config();
    let max_wait = Duration::from_millis(config.max_wait_time_ms);
    let target = format!("{owner}/{repo}");

    let mut collected: Vec<CommitRecord> = Vec::new();
    let mut url = client.api_url(&format!(
        "/repos/{owner}/{repo}/commits?per_page={}",
        config.commits_page_size
    ));
    let mut attempt = 0u32;

    tracing::debug!(target = %target, cap = MAX_COMMITS_PER_REPO, "fetching commits");

    while collected.len() < MAX_COMMITS_PER_REPO {
        let response = match client.get(&url).await {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(target = %target, error = %e, "transport failure while fetching commits");
                return collected;
            }
        };

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::warn!(target = %target, "repository not found (404)");
            return Vec::new();
        }
        if status == StatusCode::CONFLICT {
            tracing::debug!(target = %target, "repository is empty (409)");
            return Vec::new();
        }
        if status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::FORBIDDEN {
            log_rate_limit(response.headers(), "commits", &target);
            let wait = compute_wait(response.headers(), attempt);
            if !within_policy(wait, max_wait) {
                tracing::warn!(
                    target = %target,
                    wait_ms = wait.as_millis() as u64,
                    max_wait_ms = config.max_wait_time_ms,
                    "required wait exceeds maximum allowed, skipping repository"
                );
                return collected;
            }
            tracing::warn!(
                target = %target,
                wait_ms = wait.as_millis() as u64,
                attempt = attempt + 1,
                max_attempts = MAX_RETRY_ATTEMPTS,
                "rate limited while fetching commits, retrying"
            );
            if !wait_backoff(wait, shutdown).await {
                return collected;
            }
            attempt += 1;
            if attempt >= MAX_RETRY_ATTEMPTS {
                tracing::error!(target = %target, "exceeded max retry attempts fetching commits");
                return collected;
            }
            // Retry the same URL.
            continue;
        }
        if !status.is_success() {
            tracing::warn!(target = %target, %status, "error status while fetching commits");
            return collected;
        }

        let headers = response.headers().clone();
        let batch: Vec<CommitItem> = match response.json().await {
            Ok(b) => b,
            Err(e) => {
                tracing::error!(target = %target, error = %e, "failed to decode commits page");
                return collected;
            }
        };

        if batch.is_empty() {
            tracing::debug!(target = %target, "no more commits");
            break;
        }

        for item in batch {
            if collected.len() >= MAX_COMMITS_PER_REPO {
                break;
            }
            collected.push(CommitRecord {
                message: item.commit.message,
                author: item.commit.author.name,
                timestamp: item.commit.author.date,
            });
        }

        if collected.len() >= MAX_COMMITS_PER_REPO {
            tracing::debug!(target = %target, "reached per-repository commit cap");
            break;
        }

        match next_page_url(&headers) {
            Some(next) => {
                url = next;
                tracing::debug!(target = %target, "following next page link");
            }
            None => break,
        }
    }

    tracing::debug!(target = %target, count = collected.len(), "commit fetch complete");
    collected
}
