//! GitHub API service layer.
//!
//! `client` holds the authenticated transport; `repos`, `commits`, and
//! `activity` form the fetch orchestration (pagination, backoff, deadline);
//! `rate_limit` and `token` are independent one-shot calls.

pub mod activity;
pub mod backoff;
pub mod client;
pub mod commits;
pub mod link;
pub mod rate_limit;
pub mod repos;
pub mod token;

pub use activity::{ActivityReport, FetchOutcome, fetch_activity};
pub use client::{GitHubClient, SharedClient};
