use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};

use crate::config::Config;

/// Authenticated HTTP client bound to one GitHub API base URL.
///
/// Every outbound request carries the configured token and the 30 s
/// connect/read timeouts; callers only supply paths or follow-up URLs.
pub struct GitHubClient {
    http: reqwest::Client,
    config: Config,
}

impl GitHubClient {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("token {}", config.token))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("gh-activity/0.1"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(30))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Absolute URL for a path under the configured API base.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base_url.trim_end_matches('/'), path)
    }

    /// Issue a GET against an already-absolute URL (API path or a
    /// pagination link handed back by the upstream).
    pub async fn get(&self, url: &str) -> reqwest::Result<reqwest::Response> {
        self.http.get(url).send().await
    }
}

pub type SharedClient = Arc<GitHubClient>;
