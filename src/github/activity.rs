//! Activity orchestration: one repository listing, then a sequential
//! commit fetch per repository, all under a single wall-clock budget.

use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use crate::github::client::GitHubClient;
use crate::github::commits::fetch_commits;
use crate::github::repos::{ListOutcome, list_repos};
use crate::models::RepoActivity;

/// Why an activity fetch ended the way it did. Carried next to the
/// collected data so callers never have to infer rate limiting from an
/// empty result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Every listed repository was processed.
    Complete,
    /// The repository listing was cut short by rate limiting.
    RateLimited,
    /// The global request budget ran out between repositories.
    DeadlineExceeded,
    /// Shutdown fired before all repositories were processed.
    Cancelled,
}

#[derive(Debug)]
pub struct ActivityReport {
    pub repos: Vec<RepoActivity>,
    pub outcome: FetchOutcome,
}

impl ActivityReport {
    /// True when nothing at all could be fetched because of rate limiting.
    pub fn rate_limited_empty(&self) -> bool {
        self.repos.is_empty() && self.outcome == FetchOutcome::RateLimited
    }
}

/// Fetch recent commit activity for every repository of `owner`.
///
/// The deadline is checked between repositories, never mid-repository: a
/// repository already being fetched finishes (or exhausts its retries)
/// before the budget is consulted again. Expected upstream conditions never
/// surface as errors; the report is simply partial.
pub async fn fetch_activity(
    client: &GitHubClient,
    owner: &str,
    shutdown: &CancellationToken,
) -> ActivityReport {
    let started = Instant::now();
    let budget = Duration::from_millis(client.config().request_timeout_ms);

    tracing::info!(owner, budget_ms = budget.as_millis() as u64, "starting activity fetch");

    let listing = list_repos(client, owner, shutdown).await;
    let total = listing.repos.len();

    let mut outcome = match listing.outcome {
        ListOutcome::RateLimited => FetchOutcome::RateLimited,
        ListOutcome::Cancelled => FetchOutcome::Cancelled,
        _ => FetchOutcome::Complete,
    };

    let mut repos: Vec<RepoActivity> = Vec::with_capacity(total);
    for (processed, item) in listing.repos.iter().enumerate() {
        if shutdown.is_cancelled() {
            tracing::warn!(owner, processed, total, "cancelled while processing repositories");
            outcome = FetchOutcome::Cancelled;
            break;
        }
        if !budget.is_zero() && started.elapsed() > budget {
            tracing::warn!(
                owner,
                elapsed_ms = started.elapsed().as_millis() as u64,
                processed,
                total,
                "request budget exhausted while processing repositories"
            );
            outcome = FetchOutcome::DeadlineExceeded;
            break;
        }

        let repo_ref = item.to_ref(owner);
        tracing::debug!(
            owner = %repo_ref.owner,
            repo = %repo_ref.name,
            index = processed + 1,
            total,
            "fetching commits for repository"
        );

        let commits = fetch_commits(client, &repo_ref.owner, &repo_ref.name, shutdown).await;
        repos.push(RepoActivity {
            repository_name: item.name.clone(),
            commits,
        });
    }

    tracing::info!(
        owner,
        elapsed_ms = started.elapsed().as_millis() as u64,
        processed = repos.len(),
        total,
        ?outcome,
        "activity fetch finished"
    );

    ActivityReport { repos, outcome }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use mockito::Matcher;
    use serde_json::json;

    fn repos_body(owner: &str, names: &[&str]) -> String {
        let items: Vec<_> = names
            .iter()
            .map(|n| json!({ "name": n, "full_name": format!("{owner}/{n}") }))
            .collect();
        serde_json::to_string(&items).unwrap()
    }

    fn commits_body(count: usize) -> String {
        let items: Vec<_> = (0..count)
            .map(|n| {
                json!({
                    "sha": format!("{n:040x}"),
                    "commit": {
                        "message": format!("commit {n}"),
                        "author": { "name": "dev", "date": "2024-05-01T12:00:00Z" }
                    }
                })
            })
            .collect();
        serde_json::to_string(&items).unwrap()
    }

    fn client_for(server: &mockito::Server, tweak: impl FnOnce(&mut Config)) -> GitHubClient {
        let mut config = Config::for_tests(server.url());
        tweak(&mut config);
        GitHubClient::new(config).unwrap()
    }

    async fn mock_owner(server: &mut mockito::Server, owner: &str, names: &[&str], hits: usize) {
        server
            .mock("GET", format!("/users/{owner}/repos").as_str())
            .match_query(Matcher::Any)
            .with_body(repos_body(owner, names))
            .expect(hits)
            .create_async()
            .await;
    }

    #[tokio::test]
    async fn aggregates_all_repositories() {
        let mut server = mockito::Server::new_async().await;
        mock_owner(&mut server, "acme", &["alpha", "beta", "gamma"], 1).await;
        for name in ["alpha", "beta", "gamma"] {
            server
                .mock("GET", format!("/repos/acme/{name}/commits").as_str())
                .match_query(Matcher::Any)
                .with_body(commits_body(5))
                .create_async()
                .await;
        }

        let client = client_for(&server, |_| {});
        let report = fetch_activity(&client, "acme", &CancellationToken::new()).await;

        assert_eq!(report.outcome, FetchOutcome::Complete);
        assert_eq!(report.repos.len(), 3);
        let total: usize = report.repos.iter().map(|r| r.commits.len()).sum();
        assert_eq!(total, 15);
        assert_eq!(report.repos[0].repository_name, "alpha");
        assert_eq!(report.repos[2].repository_name, "gamma");
    }

    #[tokio::test]
    async fn repeated_calls_are_idempotent() {
        let mut server = mockito::Server::new_async().await;
        mock_owner(&mut server, "acme", &["alpha"], 2).await;
        server
            .mock("GET", "/repos/acme/alpha/commits")
            .match_query(Matcher::Any)
            .with_body(commits_body(3))
            .expect(2)
            .create_async()
            .await;

        let client = client_for(&server, |_| {});
        let shutdown = CancellationToken::new();
        let first = fetch_activity(&client, "acme", &shutdown).await;
        let second = fetch_activity(&client, "acme", &shutdown).await;

        assert_eq!(first.repos.len(), second.repos.len());
        for (a, b) in first.repos.iter().zip(second.repos.iter()) {
            assert_eq!(a.repository_name, b.repository_name);
            let msgs_a: Vec<_> = a.commits.iter().map(|c| &c.message).collect();
            let msgs_b: Vec<_> = b.commits.iter().map(|c| &c.message).collect();
            assert_eq!(msgs_a, msgs_b);
        }
    }

    #[tokio::test]
    async fn empty_repository_still_appears_in_the_result() {
        let mut server = mockito::Server::new_async().await;
        mock_owner(&mut server, "acme", &["alpha", "empty-repo"], 1).await;
        server
            .mock("GET", "/repos/acme/alpha/commits")
            .match_query(Matcher::Any)
            .with_body(commits_body(2))
            .create_async()
            .await;
        server
            .mock("GET", "/repos/acme/empty-repo/commits")
            .match_query(Matcher::Any)
            .with_status(409)
            .create_async()
            .await;

        let client = client_for(&server, |_| {});
        let report = fetch_activity(&client, "acme", &CancellationToken::new()).await;

        assert_eq!(report.repos.len(), 2);
        assert_eq!(report.repos[1].repository_name, "empty-repo");
        assert!(report.repos[1].commits.is_empty());
        assert_eq!(report.outcome, FetchOutcome::Complete);
    }

    #[tokio::test]
    async fn deadline_stops_iteration_between_repositories() {
        let mut server = mockito::Server::new_async().await;
        mock_owner(&mut server, "acme", &["alpha", "beta"], 1).await;

        // 1 ms budget is already gone once the listing round-trip returns.
        let client = client_for(&server, |c| c.request_timeout_ms = 1);
        let report = fetch_activity(&client, "acme", &CancellationToken::new()).await;

        assert_eq!(report.outcome, FetchOutcome::DeadlineExceeded);
        assert!(report.repos.is_empty());
    }

    #[tokio::test]
    async fn rate_limited_listing_is_reported_as_such() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/users/acme/repos")
            .match_query(Matcher::Any)
            .with_status(403)
            .create_async()
            .await;

        // Backoff for attempt 0 is 5000 ms, over this policy cap.
        let client = client_for(&server, |c| c.max_wait_time_ms = 1_000);
        let report = fetch_activity(&client, "acme", &CancellationToken::new()).await;

        assert!(report.rate_limited_empty());
    }

    #[tokio::test]
    async fn cancellation_returns_partial_results() {
        let mut server = mockito::Server::new_async().await;
        mock_owner(&mut server, "acme", &["alpha", "beta"], 1).await;

        let shutdown = CancellationToken::new();
        shutdown.cancel();
        let client = client_for(&server, |_| {});
        let report = fetch_activity(&client, "acme", &shutdown).await;

        assert_eq!(report.outcome, FetchOutcome::Cancelled);
        assert!(report.repos.is_empty());
    }

    #[tokio::test]
    async fn owner_with_no_repositories_is_complete_and_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/users/ghost/repos")
            .match_query(Matcher::Any)
            .with_body("[]")
            .create_async()
            .await;

        let client = client_for(&server, |_| {});
        let report = fetch_activity(&client, "ghost", &CancellationToken::new()).await;

        assert_eq!(report.outcome, FetchOutcome::Complete);
        assert!(report.repos.is_empty());
        assert!(!report.rate_limited_empty());
    }
}
