//! GitHub HTTP client.
//!
//! Wraps the GitHub REST API v3 issues listing and follows its
//! `Link: <...>; rel="next"` pagination until the last page.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::LINK;
use reqwest::Client;
use tracing::debug;

use crate::domain::errors::{SyncError, SyncResult};
use crate::domain::models::{GitHubConfig, IssueQuery, TrackerIssue};
use crate::domain::ports::TrackerSource;

use super::models::GitHubIssue;

/// Base URL for the GitHub REST API v3.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Items requested per page; the API maximum.
const PER_PAGE: &str = "100";

/// Configuration for [`GitHubClient`].
#[derive(Debug, Clone)]
pub struct GitHubClientConfig {
    pub token: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for GitHubClientConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            base_url: GITHUB_API_BASE.to_string(),
            timeout_secs: 30,
        }
    }
}

impl From<&GitHubConfig> for GitHubClientConfig {
    fn from(config: &GitHubConfig) -> Self {
        Self {
            token: config.token.clone(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
        }
    }
}

/// HTTP client for the GitHub REST API v3.
///
/// All failures map to [`SyncError::TrackerUnavailable`].
#[derive(Debug, Clone)]
pub struct GitHubClient {
    /// The underlying HTTP client.
    http: Client,
    /// GitHub personal access token or fine-grained token.
    token: String,
    /// API base URL, without a trailing slash.
    base_url: String,
}

impl GitHubClient {
    pub fn with_config(config: GitHubClientConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("notion-github-sync/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build GitHub HTTP client")?;

        Ok(Self {
            http,
            token: config.token,
            base_url: config.base_url,
        })
    }

    /// Build an authorized GET request.
    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.http
            .get(url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }

    /// List every issue in a repository matching `query`, across all pages.
    ///
    /// Note: GitHub's `/issues` endpoint also returns pull requests.
    /// Callers are responsible for filtering them out via the
    /// `pull_request` field.
    pub async fn list_issues(&self, query: &IssueQuery) -> SyncResult<Vec<GitHubIssue>> {
        let first_url = format!(
            "{}/repos/{}/{}/issues",
            self.base_url, query.repository.owner, query.repository.name
        );
        let mut request = self.get(&first_url).query(&[
            ("state", query.state.as_str()),
            ("labels", query.labels.as_str()),
            ("per_page", PER_PAGE),
        ]);

        let mut issues = Vec::new();
        let mut page = 1usize;
        loop {
            let resp = request.send().await.map_err(|e| {
                SyncError::TrackerUnavailable(format!("GitHub list_issues request failed: {e}"))
            })?;

            if !resp.status().is_success() {
                let status = resp.status();
                let body = resp.text().await.unwrap_or_default();
                return Err(SyncError::TrackerUnavailable(format!(
                    "GitHub list_issues returned {status}: {body}"
                )));
            }

            let next = resp
                .headers()
                .get(LINK)
                .and_then(|v| v.to_str().ok())
                .and_then(next_page_url);

            let batch = resp.json::<Vec<GitHubIssue>>().await.map_err(|e| {
                SyncError::TrackerUnavailable(format!("GitHub list_issues parse failed: {e}"))
            })?;
            debug!(page = page, count = batch.len(), "Fetched GitHub issues page");
            issues.extend(batch);

            match next {
                Some(url) => {
                    request = self.get(&url);
                    page += 1;
                }
                None => break,
            }
        }

        Ok(issues)
    }
}

#[async_trait]
impl TrackerSource for GitHubClient {
    async fn fetch_issues(&self, query: &IssueQuery) -> SyncResult<Vec<TrackerIssue>> {
        let issues = self.list_issues(query).await?;
        Ok(issues.into_iter().map(TrackerIssue::from).collect())
    }
}

/// Extract the `rel="next"` target from a `Link` header value.
pub fn next_page_url(link_header: &str) -> Option<String> {
    link_header.split(',').find_map(|part| {
        let mut segments = part.split(';');
        let target = segments.next()?.trim();
        let is_next = segments.any(|param| {
            let param = param.trim();
            param == "rel=\"next\"" || param == "rel=next"
        });
        if !is_next {
            return None;
        }
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(str::to_string)
    })
}
