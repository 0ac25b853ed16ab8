//! Port trait definitions (Hexagonal Architecture)
//!
//! The sync core talks to the outside world only through these traits:
//! - TrackerSource: lists issues from the issue tracker
//! - RecordStore: queries, creates and updates records in the store

pub mod record_store;
pub mod tracker_source;

pub use record_store::RecordStore;
pub use tracker_source::TrackerSource;
