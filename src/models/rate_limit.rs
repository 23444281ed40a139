//! Rate-limit status and token-check response shapes.
//!
//! Resource categories (core, search, graphql, ...) are kept in a map keyed
//! by the upstream resource name, so new categories show up without code
//! changes here.

use std::collections::BTreeMap;

use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// One quota window as decoded from `GET /rate_limit`.
#[derive(Debug, Clone, Deserialize)]
pub struct WindowPayload {
    pub limit: i64,
    pub remaining: i64,
    #[serde(default)]
    pub used: i64,
    pub reset: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitPayload {
    pub resources: BTreeMap<String, WindowPayload>,
}

/// One quota window as exposed to API consumers, with a readable reset time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitWindow {
    pub limit: i64,
    pub remaining: i64,
    pub used: i64,
    pub reset: i64,
    pub resets_at: String,
}

impl From<WindowPayload> for RateLimitWindow {
    fn from(w: WindowPayload) -> Self {
        let resets_at = DateTime::from_timestamp(w.reset, 0)
            .map(|t| t.to_rfc3339())
            .unwrap_or_default();
        Self {
            limit: w.limit,
            remaining: w.remaining,
            used: w.used,
            reset: w.reset,
            resets_at,
        }
    }
}

/// Full rate-limit snapshot, one window per upstream resource category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateLimitStatus {
    pub resources: BTreeMap<String, RateLimitWindow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RateLimitStatus {
    pub fn failed(message: String) -> Self {
        Self {
            resources: BTreeMap::new(),
            message: Some(message),
        }
    }
}

/// Result of validating the configured token against `GET /user`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenCheck {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
}

impl TokenCheck {
    pub fn valid(username: String) -> Self {
        let message = format!("GitHub token is valid. Authenticated as '{username}'.");
        Self {
            valid: true,
            username: Some(username),
            message,
            error_type: None,
        }
    }

    pub fn invalid(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            valid: false,
            username: None,
            message: message.into(),
            error_type: Some(error_type.into()),
        }
    }
}
