pub mod assignees;
pub mod batch_writer;
pub mod identity_map;
pub mod reconciler;
pub mod sync_service;
pub mod tracker_reader;

pub use assignees::{AssigneeDirectory, Normalized};
pub use batch_writer::{execute_in_batches, BatchWriter};
pub use identity_map::IdentityMap;
pub use reconciler::{reconcile, PlanCounts, SyncPlan};
pub use sync_service::{SyncOptions, SyncService};
pub use tracker_reader::{TrackerFetch, TrackerReader};
