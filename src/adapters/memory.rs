//! In-memory tracker and store.
//!
//! Used by tests and by anything that needs to exercise the sync pipeline
//! without network access. The store records every write and the order in
//! which writes start and finish, so batching behavior can be observed.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::errors::{SyncError, SyncResult};
use crate::domain::models::{
    IssueQuery, RecordPage, RecordProperties, StoreRecord, TrackerIssue,
};
use crate::domain::ports::{RecordStore, TrackerSource};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A write accepted by [`InMemoryRecordStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    Create {
        record_id: String,
        properties: RecordProperties,
    },
    Update {
        record_id: String,
        properties: RecordProperties,
    },
}

impl WriteOp {
    pub const fn properties(&self) -> &RecordProperties {
        match self {
            Self::Create { properties, .. } | Self::Update { properties, .. } => properties,
        }
    }

    pub fn record_id(&self) -> &str {
        match self {
            Self::Create { record_id, .. } | Self::Update { record_id, .. } => record_id,
        }
    }
}

/// Start/finish marker for a single write, keyed by issue number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteEvent {
    Started(u64),
    Finished(u64),
}

#[derive(Debug, Clone)]
struct StoredRecord {
    id: String,
    issue_number: Option<u64>,
    properties: Option<RecordProperties>,
}

/// Record store held in memory.
#[derive(Debug)]
pub struct InMemoryRecordStore {
    records: Mutex<Vec<StoredRecord>>,
    writes: Mutex<Vec<WriteOp>>,
    events: Mutex<Vec<WriteEvent>>,
    page_size: usize,
    rejected_issues: HashSet<u64>,
    successful_queries_before_failure: Option<usize>,
    write_delay: Option<Duration>,
    queries: AtomicUsize,
    next_id: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            writes: Mutex::new(Vec::new()),
            events: Mutex::new(Vec::new()),
            page_size: 100,
            rejected_issues: HashSet::new(),
            successful_queries_before_failure: None,
            write_delay: None,
            queries: AtomicUsize::new(0),
            next_id: AtomicUsize::new(1),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Seed the store with existing records.
    pub fn with_records(records: Vec<StoreRecord>) -> Self {
        let store = Self::new();
        lock(&store.records).extend(records.into_iter().map(|r| StoredRecord {
            id: r.id,
            issue_number: r.issue_number,
            properties: None,
        }));
        store
    }

    /// Seed the store with one record per `(record_id, properties)` pair.
    pub fn with_synced_records(records: Vec<(String, RecordProperties)>) -> Self {
        let store = Self::new();
        lock(&store.records).extend(records.into_iter().map(|(id, properties)| StoredRecord {
            id,
            issue_number: Some(properties.issue_number()),
            properties: Some(properties),
        }));
        store
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Reject every write whose payload carries this issue number.
    #[must_use]
    pub fn rejecting_issue(mut self, issue_number: u64) -> Self {
        self.rejected_issues.insert(issue_number);
        self
    }

    /// Let `successes` queries through, then fail every later one.
    #[must_use]
    pub const fn failing_queries_after(mut self, successes: usize) -> Self {
        self.successful_queries_before_failure = Some(successes);
        self
    }

    /// Hold every write open for `delay` before completing it.
    #[must_use]
    pub const fn with_write_delay(mut self, delay: Duration) -> Self {
        self.write_delay = Some(delay);
        self
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    /// Writes the store accepted, in completion order.
    pub fn writes(&self) -> Vec<WriteOp> {
        lock(&self.writes).clone()
    }

    /// Start and finish markers for every attempted write.
    pub fn write_events(&self) -> Vec<WriteEvent> {
        lock(&self.events).clone()
    }

    /// Highest number of writes observed in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Current properties of a record, if it was created or updated here
    /// or seeded with properties.
    pub fn properties_of(&self, record_id: &str) -> Option<RecordProperties> {
        lock(&self.records)
            .iter()
            .find(|r| r.id == record_id)
            .and_then(|r| r.properties.clone())
    }

    pub fn record_count(&self) -> usize {
        lock(&self.records).len()
    }

    async fn begin_write(&self, issue_number: u64) {
        lock(&self.events).push(WriteEvent::Started(issue_number));
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        match self.write_delay {
            Some(delay) => tokio::time::sleep(delay).await,
            None => tokio::task::yield_now().await,
        }
    }

    fn end_write(&self, issue_number: u64) -> SyncResult<()> {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        lock(&self.events).push(WriteEvent::Finished(issue_number));

        if self.rejected_issues.contains(&issue_number) {
            return Err(SyncError::StoreUnavailable(format!(
                "validation_error: record for issue {issue_number} rejected"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn query_records(&self, cursor: Option<&str>) -> SyncResult<RecordPage> {
        let served = self.queries.fetch_add(1, Ordering::SeqCst);
        if let Some(limit) = self.successful_queries_before_failure {
            if served >= limit {
                return Err(SyncError::StoreUnavailable(
                    "database query failed".to_string(),
                ));
            }
        }

        let start = match cursor {
            Some(c) => c.parse::<usize>().map_err(|_| {
                SyncError::StoreUnavailable(format!("invalid start_cursor '{c}'"))
            })?,
            None => 0,
        };

        let records = lock(&self.records);
        let end = (start + self.page_size).min(records.len());
        let page = records
            .get(start..end)
            .unwrap_or_default()
            .iter()
            .map(|r| StoreRecord {
                id: r.id.clone(),
                issue_number: r.issue_number,
            })
            .collect();

        Ok(RecordPage {
            records: page,
            next_cursor: (end < records.len()).then(|| end.to_string()),
        })
    }

    async fn create_record(&self, properties: &RecordProperties) -> SyncResult<String> {
        let number = properties.issue_number();
        self.begin_write(number).await;
        self.end_write(number)?;

        let record_id = format!("page-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        lock(&self.records).push(StoredRecord {
            id: record_id.clone(),
            issue_number: Some(number),
            properties: Some(properties.clone()),
        });
        lock(&self.writes).push(WriteOp::Create {
            record_id: record_id.clone(),
            properties: properties.clone(),
        });
        Ok(record_id)
    }

    async fn update_record(
        &self,
        record_id: &str,
        properties: &RecordProperties,
    ) -> SyncResult<()> {
        let number = properties.issue_number();
        self.begin_write(number).await;
        self.end_write(number)?;

        {
            let mut records = lock(&self.records);
            let record = records
                .iter_mut()
                .find(|r| r.id == record_id)
                .ok_or_else(|| {
                    SyncError::StoreUnavailable(format!("object_not_found: {record_id}"))
                })?;
            record.issue_number = Some(number);
            record.properties = Some(properties.clone());
        }

        lock(&self.writes).push(WriteOp::Update {
            record_id: record_id.to_string(),
            properties: properties.clone(),
        });
        Ok(())
    }
}

/// Tracker source that serves a fixed list of items.
#[derive(Debug, Default)]
pub struct StaticTrackerSource {
    items: Vec<TrackerIssue>,
    failure: Option<String>,
    queries: Mutex<Vec<IssueQuery>>,
}

impl StaticTrackerSource {
    pub fn new(items: Vec<TrackerIssue>) -> Self {
        Self {
            items,
            failure: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// A source whose every fetch fails with `TrackerUnavailable`.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            failure: Some(reason.into()),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Queries received so far.
    pub fn queries(&self) -> Vec<IssueQuery> {
        lock(&self.queries).clone()
    }
}

#[async_trait]
impl TrackerSource for StaticTrackerSource {
    async fn fetch_issues(&self, query: &IssueQuery) -> SyncResult<Vec<TrackerIssue>> {
        lock(&self.queries).push(query.clone());
        match &self.failure {
            Some(reason) => Err(SyncError::TrackerUnavailable(reason.clone())),
            None => Ok(self.items.clone()),
        }
    }
}
