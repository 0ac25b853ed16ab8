//! Tracker source port.

use async_trait::async_trait;

use crate::domain::errors::SyncResult;
use crate::domain::models::{IssueQuery, TrackerIssue};

/// Port for the issue tracker the sync reads from.
///
/// Implementations own the tracker's pagination protocol and must return
/// every matching item across all pages, pull requests included. Transport
/// and authentication failures map to
/// [`SyncError::TrackerUnavailable`](crate::domain::errors::SyncError::TrackerUnavailable).
#[async_trait]
pub trait TrackerSource: Send + Sync {
    async fn fetch_issues(&self, query: &IssueQuery) -> SyncResult<Vec<TrackerIssue>>;
}
