//! Record store port.

use async_trait::async_trait;

use crate::domain::errors::SyncResult;
use crate::domain::models::{RecordPage, RecordProperties};

/// Port for the structured store the sync writes into.
///
/// All methods target the single configured collection. Failures map to
/// [`SyncError::StoreUnavailable`](crate::domain::errors::SyncError::StoreUnavailable);
/// the batch writer rewraps write failures with the issue number.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch one page of records. `cursor` is `None` for the first page
    /// and the previous page's `next_cursor` afterwards.
    async fn query_records(&self, cursor: Option<&str>) -> SyncResult<RecordPage>;

    /// Create a record and return its store-assigned id.
    async fn create_record(&self, properties: &RecordProperties) -> SyncResult<String>;

    /// Replace the tracked properties of an existing record.
    async fn update_record(&self, record_id: &str, properties: &RecordProperties)
        -> SyncResult<()>;
}
