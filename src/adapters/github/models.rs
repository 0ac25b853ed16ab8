//! GitHub Issues API response models.
//!
//! These structs map to the GitHub REST API v3 JSON payloads used by the
//! sync. They are internal to the GitHub adapter and are converted into
//! [`TrackerIssue`] before leaving it.

use serde::{Deserialize, Serialize};

use crate::domain::models::{IssueState, TrackerIssue};

/// An issue returned by the GitHub API.
///
/// Note: issues and pull requests share the same endpoint. Pull requests
/// include a non-null `pull_request` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubIssue {
    /// Sequential number within the repository (e.g., 42 → "#42").
    pub number: u64,
    /// Issue title.
    pub title: String,
    /// Current state: "open" or "closed".
    pub state: IssueState,
    /// Number of discussion comments.
    #[serde(default)]
    pub comments: u64,
    /// URL to view the issue in the GitHub UI.
    pub html_url: String,
    /// Users assigned to the issue.
    #[serde(default)]
    pub assignees: Vec<GitHubUser>,
    /// Present when this item is actually a pull request, not an issue.
    #[serde(default)]
    pub pull_request: Option<GitHubPullRequestRef>,
}

/// A GitHub user reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubUser {
    pub login: String,
}

/// Reference object present on pull requests (absent on plain issues).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubPullRequestRef {
    /// API URL of the pull request resource.
    pub url: String,
}

impl From<GitHubIssue> for TrackerIssue {
    fn from(issue: GitHubIssue) -> Self {
        Self {
            number: issue.number,
            title: issue.title,
            state: issue.state,
            comment_count: issue.comments,
            url: issue.html_url,
            is_pull_request: issue.pull_request.is_some(),
            assignee_logins: issue.assignees.into_iter().map(|u| u.login).collect(),
        }
    }
}
