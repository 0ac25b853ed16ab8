//! notion-github-sync - mirror GitHub issues into a Notion database
//!
//! Each run fetches the labelled issues of one repository and makes the
//! Notion database reflect them: one page per issue, keyed by issue number,
//! created when missing and overwritten otherwise. Writes go out in bounded
//! concurrent batches.
//!
//! # Architecture
//!
//! Hexagonal layout:
//!
//! - **Domain Layer** (`domain`): models, errors, and the two ports
//!   ([`TrackerSource`], [`RecordStore`])
//! - **Service Layer** (`services`): identity map, reader, assignee
//!   resolution, reconciler, batch writer, and the run orchestrator
//! - **Adapters** (`adapters`): GitHub and Notion HTTP clients, in-memory
//!   doubles
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use notion_github_sync::adapters::memory::{InMemoryRecordStore, StaticTrackerSource};
//! use notion_github_sync::{Config, SyncOptions, SyncService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config: Config = notion_github_sync::ConfigLoader::load()?;
//!     let service = SyncService::new(
//!         Arc::new(StaticTrackerSource::new(vec![])),
//!         Arc::new(InMemoryRecordStore::new()),
//!         SyncOptions::from_config(&config)?,
//!     );
//!     let report = service.run().await?;
//!     println!("{} created, {} updated", report.created(), report.updated());
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    Config, Issue, IssueQuery, IssueState, RecordProperties, ResolvedIssue, SyncReport,
    TrackerIssue, UnresolvedAssignee,
};
pub use domain::ports::{RecordStore, TrackerSource};
pub use domain::{SyncError, SyncResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{SyncOptions, SyncService};
