//! Common test utilities for integration tests
//!
//! Builders for tracker items, store payloads and run options shared across
//! the integration test files.

#![allow(dead_code)]

use notion_github_sync::domain::models::{
    AssigneeRef, IssueQuery, IssueState, IssueStateFilter, RecordProperties, ResolvedIssue,
    TrackerIssue,
};
use notion_github_sync::services::{AssigneeDirectory, SyncOptions};

pub const RLCH_ID: &str = "5d455806-cc2a-461a-ad9f-d23a16c6e01f";
pub const SONNYMOSH_ID: &str = "d1e19aab-918e-4a32-9bbd-f8387570396c";

/// Setup test logging
///
/// Call at the beginning of tests whose log output is worth seeing.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

pub fn directory() -> AssigneeDirectory {
    [("rlch", RLCH_ID), ("sonnymosh", SONNYMOSH_ID)]
        .into_iter()
        .map(|(login, id)| (login.to_string(), id.to_string()))
        .collect()
}

pub fn options(batch_size: usize) -> SyncOptions {
    SyncOptions {
        query: IssueQuery {
            repository: "octo/widgets".parse().expect("valid repository"),
            labels: "P0".to_string(),
            state: IssueStateFilter::All,
        },
        batch_size,
        dry_run: false,
        assignees: directory(),
    }
}

pub fn tracker_issue(number: u64, title: &str, logins: &[&str]) -> TrackerIssue {
    TrackerIssue {
        number,
        title: title.to_string(),
        state: IssueState::Open,
        comment_count: 0,
        url: format!("https://github.com/octo/widgets/issues/{number}"),
        is_pull_request: false,
        assignee_logins: logins.iter().map(|l| (*l).to_string()).collect(),
    }
}

pub fn pull_request(number: u64, title: &str) -> TrackerIssue {
    TrackerIssue {
        is_pull_request: true,
        url: format!("https://github.com/octo/widgets/pull/{number}"),
        ..tracker_issue(number, title, &[])
    }
}

/// Properties as a previous run would have written them.
pub fn synced_properties(number: u64, title: &str) -> RecordProperties {
    RecordProperties::from_issue(&ResolvedIssue {
        number,
        title: title.to_string(),
        state: IssueState::Open,
        comment_count: 0,
        url: format!("https://github.com/octo/widgets/issues/{number}"),
        assignees: vec![AssigneeRef {
            id: RLCH_ID.to_string(),
        }],
    })
}
