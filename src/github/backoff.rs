//! Rate-limit wait computation and interruptible backoff sleeps.
//!
//! When the upstream sends an `X-RateLimit-Reset` header, waiting until
//! that instant is authoritative and takes priority. Without it, waits grow
//! exponentially from 5 s per attempt, capped at 2 min. The caller decides
//! whether a computed wait is acceptable via [`within_policy`] and must
//! abort instead of sleeping when it is not.

use std::time::Duration;

use chrono::Utc;
use reqwest::header::HeaderMap;
use tokio_util::sync::CancellationToken;

pub const MAX_RETRY_ATTEMPTS: u32 = 4;
pub const BASE_BACKOFF_MS: u64 = 5_000;
pub const MAX_BACKOFF_MS: u64 = 120_000;

const RESET_HEADER: &str = "x-ratelimit-reset";

/// Wait duration for a rate-limited response: reset header if present,
/// exponential backoff otherwise.
pub fn compute_wait(headers: &HeaderMap, attempt: u32) -> Duration {
    match reset_epoch(headers) {
        Some(reset) => wait_until_reset(reset, Utc::now().timestamp()),
        None => exponential_backoff(attempt),
    }
}

/// True iff the wait is short enough to actually perform.
pub fn within_policy(wait: Duration, max_wait: Duration) -> bool {
    wait <= max_wait
}

/// Suspend for `delay`, or return early if `shutdown` fires. Returns
/// whether the full wait elapsed.
pub async fn wait_backoff(delay: Duration, shutdown: &CancellationToken) -> bool {
    tokio::select! {
        _ = shutdown.cancelled() => false,
        _ = tokio::time::sleep(delay) => true,
    }
}

/// Log the diagnostic rate-limit headers of a rejected response.
pub fn log_rate_limit(headers: &HeaderMap, resource_kind: &str, target: &str) {
    let remaining = header_str(headers, "x-ratelimit-remaining");
    let limit = header_str(headers, "x-ratelimit-limit");
    let resource = header_str(headers, "x-ratelimit-resource").unwrap_or(resource_kind);

    match reset_epoch(headers) {
        Some(reset) => {
            let wait_secs = (reset - Utc::now().timestamp()).max(0);
            tracing::warn!(
                remaining,
                limit,
                resource,
                target,
                wait_secs,
                "GitHub API rate limit hit"
            );
        }
        None => {
            tracing::warn!(remaining, limit, resource, target, "GitHub API rate limit hit");
        }
    }
}

fn reset_epoch(headers: &HeaderMap) -> Option<i64> {
    header_str(headers, RESET_HEADER)?.parse().ok()
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn wait_until_reset(reset_epoch: i64, now_epoch: i64) -> Duration {
    // At least one second even when the window has already reset.
    let secs = (reset_epoch - now_epoch).max(1) as u64;
    Duration::from_secs(secs)
}

fn exponential_backoff(attempt: u32) -> Duration {
    let factor = 1u64 << attempt.min(16);
    Duration::from_millis(BASE_BACKOFF_MS.saturating_mul(factor).min(MAX_BACKOFF_MS))
}
