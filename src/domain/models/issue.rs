//! Issue domain models.
//!
//! An issue moves through three shapes during a run: the raw
//! [`TrackerIssue`] yielded by the tracker, the projected [`Issue`] kept by
//! the tracker reader, and the [`ResolvedIssue`] whose assignee logins have
//! been translated into store user references.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::SyncError;

/// Issue state as reported by the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

impl IssueState {
    /// The lowercase name used by both GitHub and the `State` select option.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State filter passed to the tracker when listing issues.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueStateFilter {
    Open,
    Closed,
    #[default]
    All,
}

impl IssueStateFilter {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::All => "all",
        }
    }
}

/// A GitHub `owner/name` repository reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    pub owner: String,
    pub name: String,
}

impl FromStr for RepositoryRef {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(SyncError::InvalidRepository(s.to_string())),
        }
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Parameters for listing issues from the tracker.
#[derive(Debug, Clone)]
pub struct IssueQuery {
    pub repository: RepositoryRef,
    /// Comma-separated label filter, passed through as-is.
    pub labels: String,
    pub state: IssueStateFilter,
}

/// An item as yielded by the tracker source.
///
/// GitHub serves pull requests from the issues endpoint, so the flag is
/// kept until the tracker reader drops them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerIssue {
    pub number: u64,
    pub title: String,
    pub state: IssueState,
    pub comment_count: u64,
    pub url: String,
    pub is_pull_request: bool,
    pub assignee_logins: Vec<String>,
}

/// An issue retained by the tracker reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub state: IssueState,
    pub comment_count: u64,
    pub url: String,
    /// Tracker logins, order irrelevant.
    pub assignees: Vec<String>,
}

impl From<TrackerIssue> for Issue {
    fn from(item: TrackerIssue) -> Self {
        Self {
            number: item.number,
            title: item.title,
            state: item.state,
            comment_count: item.comment_count,
            url: item.url,
            assignees: item.assignee_logins,
        }
    }
}

/// A store user reference, serialized as `{ "id": "<uuid>" }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssigneeRef {
    pub id: String,
}

/// An issue whose assignees have been resolved to store users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedIssue {
    pub number: u64,
    pub title: String,
    pub state: IssueState,
    pub comment_count: u64,
    pub url: String,
    pub assignees: Vec<AssigneeRef>,
}

impl ResolvedIssue {
    /// Attach resolved assignees to an issue, discarding its logins.
    pub fn from_issue(issue: Issue, assignees: Vec<AssigneeRef>) -> Self {
        Self {
            number: issue.number,
            title: issue.title,
            state: issue.state,
            comment_count: issue.comment_count,
            url: issue.url,
            assignees,
        }
    }
}

/// A tracker login with no entry in the assignee directory.
///
/// Never fatal: the login is dropped and the issue still syncs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedAssignee {
    pub issue_number: u64,
    pub login: String,
}
