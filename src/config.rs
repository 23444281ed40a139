use clap::Parser;

/// GitHub activity connector - aggregates recent commit activity per owner
#[derive(Parser, Debug, Clone)]
#[command(name = "gh-activity")]
#[command(about = "Serve recent GitHub commit activity over a REST API", long_about = None)]
pub struct Config {
    /// GitHub personal access token used for all upstream calls
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: String,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_BASE_URL", default_value = "https://api.github.com")]
    pub api_base_url: String,

    /// Repositories requested per listing page
    #[arg(long, default_value_t = 30)]
    pub repos_page_size: u32,

    /// Commits requested per page
    #[arg(long, default_value_t = 20)]
    pub commits_page_size: u32,

    /// Maximum repositories processed per request
    #[arg(long, default_value_t = 20)]
    pub max_repos: usize,

    /// Longest single rate-limit wait tolerated before giving up (ms)
    #[arg(long, default_value_t = 120_000)]
    pub max_wait_time_ms: u64,

    /// Wall-clock budget for one activity request (ms)
    #[arg(long, default_value_t = 300_000)]
    pub request_timeout_ms: u64,

    /// Port to run the server on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,
}

#[cfg(test)]
impl Config {
    /// Settings pointed at a test server, with production-like limits.
    pub(crate) fn for_tests(api_base_url: String) -> Self {
        Self {
            token: "test-token".to_string(),
            api_base_url,
            repos_page_size: 30,
            commits_page_size: 20,
            max_repos: 20,
            max_wait_time_ms: 120_000,
            request_timeout_ms: 300_000,
            port: 0,
        }
    }
}
