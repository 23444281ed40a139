//! Data transfer objects (DTOs) for API requests and responses.
//!
//! - `activity`: CommitRecord, RepoActivity, ActivityResponse, Meta
//! - `github`: upstream payload shapes (RepoItem, CommitItem, ...)
//! - `rate_limit`: RateLimitWindow, RateLimitStatus, TokenCheck

pub mod activity;
pub mod github;
pub mod rate_limit;

pub use activity::*;
pub use github::*;
pub use rate_limit::*;
