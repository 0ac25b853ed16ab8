pub mod config;
pub mod issue;
pub mod record;
pub mod report;

pub use config::{
    Config, GitHubConfig, LogFormat, LoggingConfig, NotionConfig, RotationPolicy, SyncConfig,
    DEFAULT_BATCH_SIZE,
};
pub use issue::{
    AssigneeRef, Issue, IssueQuery, IssueState, IssueStateFilter, RepositoryRef, ResolvedIssue,
    TrackerIssue, UnresolvedAssignee,
};
pub use record::{PendingUpdate, RecordPage, RecordProperties, StoreRecord};
pub use report::{PhaseSummary, SyncReport};
