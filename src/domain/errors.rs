//! Domain errors for the sync run.

use thiserror::Error;

/// Errors that abort a sync run.
///
/// Unresolved assignee logins are not errors; see
/// [`UnresolvedAssignee`](crate::domain::models::UnresolvedAssignee).
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Record store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Issue tracker unavailable: {0}")]
    TrackerUnavailable(String),

    #[error("Write failed for issue #{issue_number}: {reason}")]
    WriteFailed { issue_number: u64, reason: String },

    #[error("Invalid repository reference '{0}': expected 'owner/name'")]
    InvalidRepository(String),
}

pub type SyncResult<T> = Result<T, SyncError>;

impl SyncError {
    /// Returns true if this error happened while reading, before any write
    /// was attempted.
    pub const fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::StoreUnavailable(_) | Self::TrackerUnavailable(_)
        )
    }
}
