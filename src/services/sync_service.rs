//! Sync run orchestration.
//!
//! A run is strictly sequential: identity map, tracker fetch, assignee
//! resolution, reconciliation, create phase, update phase. The first
//! error stops the run; whatever was already written stays written.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::domain::errors::SyncResult;
use crate::domain::models::{Config, IssueQuery, SyncReport};
use crate::domain::ports::{RecordStore, TrackerSource};

use super::assignees::AssigneeDirectory;
use super::batch_writer::BatchWriter;
use super::identity_map::IdentityMap;
use super::reconciler::reconcile;
use super::tracker_reader::TrackerReader;

/// Everything a run needs besides the two collaborators.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub query: IssueQuery,
    pub batch_size: usize,
    pub dry_run: bool,
    pub assignees: AssigneeDirectory,
}

impl SyncOptions {
    pub fn from_config(config: &Config) -> SyncResult<Self> {
        Ok(Self {
            query: IssueQuery {
                repository: config.github.repository.parse()?,
                labels: config.github.labels.clone(),
                state: config.github.state,
            },
            batch_size: config.sync.batch_size,
            dry_run: config.sync.dry_run,
            assignees: AssigneeDirectory::new(config.assignees.clone()),
        })
    }
}

/// Mirrors tracker issues into the record store, once per call to
/// [`run`](SyncService::run).
pub struct SyncService {
    store: Arc<dyn RecordStore>,
    reader: TrackerReader,
    writer: BatchWriter,
    assignees: AssigneeDirectory,
    dry_run: bool,
}

impl SyncService {
    pub fn new(
        tracker: Arc<dyn TrackerSource>,
        store: Arc<dyn RecordStore>,
        options: SyncOptions,
    ) -> Self {
        Self {
            reader: TrackerReader::new(tracker, options.query),
            writer: BatchWriter::new(Arc::clone(&store), options.batch_size),
            store,
            assignees: options.assignees,
            dry_run: options.dry_run,
        }
    }

    /// Execute one full sync.
    #[instrument(
        name = "sync_run",
        skip(self),
        fields(repository = %self.reader.query().repository, dry_run = self.dry_run)
    )]
    pub async fn run(&self) -> SyncResult<SyncReport> {
        info!("Fetching existing records from Notion database");
        let map = IdentityMap::build(self.store.as_ref()).await?;

        let fetch = self.reader.fetch().await?;
        let normalized = self.assignees.resolve_issues(fetch.issues);
        let plan = reconcile(normalized.issues, &map);
        let counts = plan.counts();

        let mut report = SyncReport {
            records_scanned: map.records_scanned(),
            issues_fetched: plan.len(),
            pull_requests_skipped: fetch.pull_requests_skipped,
            planned_creates: counts.creates,
            planned_updates: counts.updates,
            unresolved_assignees: normalized.unresolved,
            dry_run: self.dry_run,
            ..SyncReport::default()
        };

        if self.dry_run {
            for issue in &plan.to_create {
                debug!(issue_number = issue.number, title = %issue.title, "Would create");
            }
            for update in &plan.to_update {
                debug!(
                    issue_number = update.issue.number,
                    record = %update.record_id,
                    "Would update"
                );
            }
            info!(
                creates = counts.creates,
                updates = counts.updates,
                "Dry run, skipping writes"
            );
            return Ok(report);
        }

        info!(count = counts.creates, "{} new issues to add to Notion", counts.creates);
        report.create_phase = self.writer.create_all(&plan.to_create).await?;

        info!(count = counts.updates, "{} issues to update in Notion", counts.updates);
        report.update_phase = self.writer.update_all(&plan.to_update).await?;

        info!(
            created = report.created(),
            updated = report.updated(),
            "Notion database is synced with GitHub"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryRecordStore, StaticTrackerSource, WriteOp};
    use crate::domain::errors::SyncError;
    use crate::domain::models::{IssueState, IssueStateFilter, StoreRecord, TrackerIssue};

    fn options(dry_run: bool) -> SyncOptions {
        SyncOptions {
            query: IssueQuery {
                repository: "o/r".parse().unwrap(),
                labels: "P0".to_string(),
                state: IssueStateFilter::All,
            },
            batch_size: 10,
            dry_run,
            assignees: [("rlch".to_string(), "user-rlch".to_string())]
                .into_iter()
                .collect(),
        }
    }

    fn item(number: u64) -> TrackerIssue {
        TrackerIssue {
            number,
            title: format!("Issue {number}"),
            state: IssueState::Open,
            comment_count: 0,
            url: format!("https://x/{number}"),
            is_pull_request: false,
            assignee_logins: vec!["rlch".to_string(), "ghost".to_string()],
        }
    }

    #[tokio::test]
    async fn test_run_creates_new_and_updates_existing() {
        let tracker = Arc::new(StaticTrackerSource::new(vec![item(1), item(2)]));
        let store = Arc::new(InMemoryRecordStore::with_records(vec![StoreRecord {
            id: "page-existing".to_string(),
            issue_number: Some(2),
        }]));
        let service = SyncService::new(tracker, store.clone(), options(false));

        let report = service.run().await.unwrap();

        assert_eq!(report.records_scanned, 1);
        assert_eq!(report.issues_fetched, 2);
        assert_eq!(report.created(), 1);
        assert_eq!(report.updated(), 1);
        assert_eq!(report.unresolved_assignees.len(), 2);

        let writes = store.writes();
        assert!(writes
            .iter()
            .any(|w| matches!(w, WriteOp::Create { properties, .. } if properties.issue_number() == 1)));
        assert!(writes
            .iter()
            .any(|w| matches!(w, WriteOp::Update { record_id, .. } if record_id == "page-existing")));
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let tracker = Arc::new(StaticTrackerSource::new(vec![item(1)]));
        let store = Arc::new(InMemoryRecordStore::new());
        let service = SyncService::new(tracker, store.clone(), options(true));

        let report = service.run().await.unwrap();

        assert!(report.dry_run);
        assert_eq!(report.planned_creates, 1);
        assert_eq!(report.created(), 0);
        assert!(store.writes().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_aborts_before_tracker_fetch() {
        let tracker = Arc::new(StaticTrackerSource::new(vec![item(1)]));
        let store = Arc::new(InMemoryRecordStore::new().failing_queries_after(0));
        let service = SyncService::new(tracker.clone(), store, options(false));

        let result = service.run().await;

        assert!(matches!(result, Err(SyncError::StoreUnavailable(_))));
        assert!(tracker.queries().is_empty());
    }

    #[tokio::test]
    async fn test_tracker_failure_aborts_before_writes() {
        let tracker = Arc::new(StaticTrackerSource::unavailable("timeout"));
        let store = Arc::new(InMemoryRecordStore::new());
        let service = SyncService::new(tracker, store.clone(), options(false));

        let result = service.run().await;

        assert!(matches!(result, Err(SyncError::TrackerUnavailable(_))));
        assert!(store.write_events().is_empty());
    }

    #[tokio::test]
    async fn test_create_failure_skips_update_phase() {
        let tracker = Arc::new(StaticTrackerSource::new(vec![item(1), item(2)]));
        let store = Arc::new(
            InMemoryRecordStore::with_records(vec![StoreRecord {
                id: "page-2".to_string(),
                issue_number: Some(2),
            }])
            .rejecting_issue(1),
        );
        let service = SyncService::new(tracker, store.clone(), options(false));

        let result = service.run().await;

        assert!(matches!(result, Err(SyncError::WriteFailed { issue_number: 1, .. })));
        assert!(store.writes().is_empty());
    }

    #[test]
    fn test_options_from_config() {
        let mut config = Config::default();
        config.github.repository = "octo/widgets".to_string();
        config.sync.batch_size = 3;
        config
            .assignees
            .insert("rlch".to_string(), "user-rlch".to_string());

        let options = SyncOptions::from_config(&config).unwrap();

        assert_eq!(options.query.repository.owner, "octo");
        assert_eq!(options.query.labels, "P0");
        assert_eq!(options.batch_size, 3);
        assert_eq!(options.assignees.len(), 1);
    }

    #[test]
    fn test_options_reject_bad_repository() {
        let mut config = Config::default();
        config.github.repository = "not-a-repo".to_string();
        assert!(matches!(
            SyncOptions::from_config(&config),
            Err(SyncError::InvalidRepository(_))
        ));
    }
}
