use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// One commit as exposed to API consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRecord {
    pub message: String,
    pub author: String,
    pub timestamp: DateTime<FixedOffset>,
}

/// A repository together with its recent commits, newest first as
/// delivered by the upstream API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoActivity {
    pub repository_name: String,
    pub commits: Vec<CommitRecord>,
}

/// Aggregate counts attached to every activity response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    pub total_repos: usize,
    pub total_commits: usize,
    pub fetched_at_iso: String,
}

impl Meta {
    pub fn from_activity(data: &[RepoActivity]) -> Self {
        Self {
            total_repos: data.len(),
            total_commits: data.iter().map(|r| r.commits.len()).sum(),
            fetched_at_iso: Utc::now().to_rfc3339(),
        }
    }
}

/// Envelope for the activity endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityResponse {
    pub meta: Meta,
    pub data: Vec<RepoActivity>,
}

impl ActivityResponse {
    pub fn new(data: Vec<RepoActivity>) -> Self {
        Self {
            meta: Meta::from_activity(&data),
            data,
        }
    }
}
