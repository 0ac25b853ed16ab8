//! Reads the issues to mirror from the tracker.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::errors::SyncResult;
use crate::domain::models::{Issue, IssueQuery};
use crate::domain::ports::TrackerSource;

/// Result of a tracker fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackerFetch {
    /// Issues in tracker order, pull requests removed.
    pub issues: Vec<Issue>,
    pub pull_requests_skipped: usize,
}

/// Fetches every issue matching a fixed query, dropping pull requests.
pub struct TrackerReader {
    source: Arc<dyn TrackerSource>,
    query: IssueQuery,
}

impl TrackerReader {
    pub fn new(source: Arc<dyn TrackerSource>, query: IssueQuery) -> Self {
        Self { source, query }
    }

    pub const fn query(&self) -> &IssueQuery {
        &self.query
    }

    /// Fetch all matching issues.
    ///
    /// Pull requests are removed regardless of the label and state
    /// filters. A tracker failure aborts the fetch with no partial result.
    pub async fn fetch(&self) -> SyncResult<TrackerFetch> {
        info!(
            repository = %self.query.repository,
            labels = %self.query.labels,
            state = self.query.state.as_str(),
            "Fetching issues from GitHub"
        );

        let items = self.source.fetch_issues(&self.query).await?;
        let total = items.len();

        let mut fetch = TrackerFetch {
            issues: Vec::with_capacity(total),
            pull_requests_skipped: 0,
        };
        for item in items {
            if item.is_pull_request {
                debug!(issue_number = item.number, "Skipping pull request");
                fetch.pull_requests_skipped += 1;
            } else {
                fetch.issues.push(Issue::from(item));
            }
        }

        info!(
            count = fetch.issues.len(),
            total_fetched = total,
            pull_requests_skipped = fetch.pull_requests_skipped,
            "Fetched {} issues from GitHub repository",
            fetch.issues.len()
        );
        Ok(fetch)
    }
}
