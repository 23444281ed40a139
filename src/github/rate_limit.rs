//! One-shot rate-limit status snapshot.

use crate::github::client::GitHubClient;
use crate::models::{RateLimitPayload, RateLimitStatus};

/// Query `GET /rate_limit` and return the current quota windows, one per
/// upstream resource category. Failures come back as a status with a
/// message instead of an error; the snapshot is never cached.
pub async fn fetch_rate_limit(client: &GitHubClient) -> RateLimitStatus {
    let url = client.api_url("/rate_limit");
    tracing::debug!(%url, "fetching GitHub API rate limit status");

    let response = match client.get(&url).await {
        Ok(r) => r,
        Err(e) => {
            tracing::error!(error = %e, "error fetching rate limit status");
            return RateLimitStatus::failed(format!("Error fetching rate limit information: {e}"));
        }
    };

    if !response.status().is_success() {
        tracing::warn!(status = %response.status(), "failed to fetch rate limit status");
        return RateLimitStatus::failed(format!(
            "Failed to fetch rate limit information: {}",
            response.status()
        ));
    }

    match response.json::<RateLimitPayload>().await {
        Ok(payload) => RateLimitStatus {
            resources: payload
                .resources
                .into_iter()
                .map(|(name, window)| (name, window.into()))
                .collect(),
            message: None,
        },
        Err(e) => {
            tracing::error!(error = %e, "failed to decode rate limit payload");
            RateLimitStatus::failed(format!("Error decoding rate limit information: {e}"))
        }
    }
}
