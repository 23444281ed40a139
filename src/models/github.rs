//! Upstream GitHub API payload shapes.
//!
//! Only the fields this service actually consumes are declared; serde
//! ignores the rest of the (large) upstream objects.

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

/// One entry from `GET /users/{owner}/repos`.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoItem {
    pub name: String,
    pub full_name: String,
}

/// Owner-qualified repository identifier, split out of `full_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    pub owner: String,
    pub name: String,
}

impl RepoItem {
    /// Derive the owner/name pair from `full_name`. Upstream always sends
    /// `owner/name`, but a malformed value falls back to the owner the
    /// caller asked about rather than panicking.
    pub fn to_ref(&self, fallback_owner: &str) -> RepositoryRef {
        match self.full_name.split_once('/') {
            Some((owner, name)) => RepositoryRef {
                owner: owner.to_string(),
                name: name.to_string(),
            },
            None => {
                tracing::warn!(
                    full_name = %self.full_name,
                    "repository full_name has no owner segment, falling back"
                );
                RepositoryRef {
                    owner: fallback_owner.to_string(),
                    name: self.name.clone(),
                }
            }
        }
    }
}

/// One entry from `GET /repos/{owner}/{repo}/commits`.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitItem {
    pub commit: CommitPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitPayload {
    pub message: String,
    pub author: CommitAuthor,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitAuthor {
    pub name: String,
    pub date: DateTime<FixedOffset>,
}
