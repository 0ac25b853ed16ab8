//! Batched, bounded-concurrency writes to the record store.
//!
//! Operations are split into consecutive chunks of at most `batch_size`.
//! Each chunk is issued concurrently and fully awaited before the next one
//! starts, so no more than `batch_size` writes are ever in flight.

use std::future::Future;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{error, info};

use crate::domain::errors::{SyncError, SyncResult};
use crate::domain::models::{
    PendingUpdate, PhaseSummary, RecordProperties, ResolvedIssue, DEFAULT_BATCH_SIZE,
};
use crate::domain::ports::RecordStore;

/// Run `op` over `items` in sequential chunks of concurrent calls.
///
/// Every operation in a chunk runs to completion even if another one in
/// the same chunk fails. Once the chunk settles, the first failure in
/// input order is returned and no later chunk is started. Chunks that
/// already completed are not rolled back.
pub async fn execute_in_batches<'a, T, F, Fut>(
    phase: &str,
    items: &'a [T],
    batch_size: usize,
    mut op: F,
) -> SyncResult<PhaseSummary>
where
    F: FnMut(&'a T) -> Fut,
    Fut: Future<Output = SyncResult<()>>,
{
    let batch_size = batch_size.max(1);
    let total_batches = items.len().div_ceil(batch_size);
    let mut summary = PhaseSummary::default();

    for (index, batch) in items.chunks(batch_size).enumerate() {
        let results = join_all(batch.iter().map(&mut op)).await;
        summary.batch_sizes.push(batch.len());

        let mut first_failure = None;
        for result in results {
            match result {
                Ok(()) => summary.applied += 1,
                Err(err) => {
                    error!(phase = phase, batch = index + 1, error = %err, "Write rejected");
                    first_failure.get_or_insert(err);
                }
            }
        }

        if let Some(err) = first_failure {
            error!(
                phase = phase,
                batch = index + 1,
                of = total_batches,
                applied = summary.applied,
                "Halting {phase} phase after failed batch"
            );
            return Err(err);
        }

        info!(
            phase = phase,
            batch = index + 1,
            of = total_batches,
            size = batch.len(),
            "Completed batch size: {}",
            batch.len()
        );
    }

    Ok(summary)
}

fn write_failed(issue_number: u64, err: SyncError) -> SyncError {
    match err {
        SyncError::WriteFailed { .. } => err,
        other => SyncError::WriteFailed {
            issue_number,
            reason: other.to_string(),
        },
    }
}

/// Executes create and update phases against a [`RecordStore`].
pub struct BatchWriter {
    store: Arc<dyn RecordStore>,
    batch_size: usize,
}

impl BatchWriter {
    /// A `batch_size` of zero is treated as one.
    pub fn new(store: Arc<dyn RecordStore>, batch_size: usize) -> Self {
        Self {
            store,
            batch_size: batch_size.max(1),
        }
    }

    pub fn with_default_batch_size(store: Arc<dyn RecordStore>) -> Self {
        Self::new(store, DEFAULT_BATCH_SIZE)
    }

    pub const fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Create one record per issue.
    pub async fn create_all(&self, issues: &[ResolvedIssue]) -> SyncResult<PhaseSummary> {
        execute_in_batches("create", issues, self.batch_size, |issue| async move {
            let properties = RecordProperties::from_issue(issue);
            self.store
                .create_record(&properties)
                .await
                .map(|_| ())
                .map_err(|e| write_failed(issue.number, e))
        })
        .await
    }

    /// Overwrite every tracked property of each existing record.
    pub async fn update_all(&self, updates: &[PendingUpdate]) -> SyncResult<PhaseSummary> {
        execute_in_batches("update", updates, self.batch_size, |update| async move {
            let properties = RecordProperties::from_issue(&update.issue);
            self.store
                .update_record(&update.record_id, &properties)
                .await
                .map_err(|e| write_failed(update.issue.number, e))
        })
        .await
    }
}
