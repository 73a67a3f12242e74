//! GitHub REST client for check runs
//!
//! Lists the check runs of a Git reference. One request per call, no
//! retries and no pagination: the first page (up to 100 runs) is the
//! snapshot, and `total_count` is passed through as reported.

use async_trait::async_trait;
use checkwait_core::{CheckSnapshot, ChecksSource, RefTarget};
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GitHubError;
use crate::wire::{decode_snapshot, ApiMessage};

/// Public GitHub API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const API_VERSION_HEADER: &str = "x-github-api-version";
const API_VERSION: &str = "2022-11-28";
const PER_PAGE: &str = "100";

/// GitHub client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// API base URL (GitHub Enterprise uses `https://host/api/v3`)
    pub api_url: String,
    /// Token sent as a bearer credential (optional for public repositories)
    #[serde(skip_serializing)]
    pub token: Option<String>,
    pub user_agent: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        GitHubConfig {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            user_agent: format!("checkwait/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl GitHubConfig {
    pub fn new(api_url: &str) -> Self {
        GitHubConfig {
            api_url: api_url.to_string(),
            ..Self::default()
        }
    }

    /// Set authentication token
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }
}

/// Check-runs client implementing [`ChecksSource`]
pub struct GitHubChecksClient {
    config: GitHubConfig,
    http_client: reqwest::Client,
}

impl GitHubChecksClient {
    pub fn new(config: GitHubConfig) -> Result<Self, GitHubError> {
        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;
        Self::with_http_client(config, http_client)
    }

    /// Use a caller-built `reqwest::Client` (proxy, TLS or timeout settings).
    pub fn with_http_client(
        config: GitHubConfig,
        http_client: reqwest::Client,
    ) -> Result<Self, GitHubError> {
        // Fail on a bad base URL now rather than on the first poll.
        check_runs_url(&config.api_url, &RefTarget::new("o", "r", "HEAD"))?;

        Ok(GitHubChecksClient {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &GitHubConfig {
        &self.config
    }

    /// Fetch one page of check runs for `target`.
    pub async fn fetch_snapshot(&self, target: &RefTarget) -> Result<CheckSnapshot, GitHubError> {
        let url = check_runs_url(&self.config.api_url, target)?;
        debug!(url = %url, "Listing check runs");

        let mut request = self
            .http_client
            .get(url.clone())
            .header(ACCEPT, "application/vnd.github+json")
            .header(API_VERSION_HEADER, API_VERSION)
            .header(USER_AGENT, &self.config.user_agent);
        if let Some(token) = self.config.token.as_deref().filter(|t| !t.is_empty()) {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ApiMessage>(&body)
                .map(|m| m.message)
                .unwrap_or_else(|_| String::from_utf8_lossy(&body).trim().to_string());
            return Err(GitHubError::Status {
                status: status.as_u16(),
                url: url.to_string(),
                message,
            });
        }

        decode_snapshot(&body)
    }
}

#[async_trait]
impl ChecksSource for GitHubChecksClient {
    async fn list_checks_for_ref(
        &self,
        target: &RefTarget,
    ) -> checkwait_core::Result<CheckSnapshot> {
        Ok(self.fetch_snapshot(target).await?)
    }
}

/// Build `{api}/repos/{owner}/{repo}/commits/{ref}/check-runs?per_page=100`.
///
/// Each component is a single path segment, so a ref such as
/// `refs/heads/main` is percent-encoded rather than split.
pub fn check_runs_url(api_url: &str, target: &RefTarget) -> Result<Url, GitHubError> {
    let mut url =
        Url::parse(api_url).map_err(|e| GitHubError::InvalidApiUrl(format!("{api_url}: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| GitHubError::InvalidApiUrl(api_url.to_string()))?
        .pop_if_empty()
        .extend([
            "repos",
            target.owner.as_str(),
            target.repo.as_str(),
            "commits",
            target.git_ref.as_str(),
            "check-runs",
        ]);
    url.query_pairs_mut().append_pair("per_page", PER_PAGE);
    Ok(url)
}
