//! Domain layer for the GitHub → Notion sync
//!
//! This module contains the sync's data model, its error type, and the
//! port traits that the tracker and store adapters implement.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{SyncError, SyncResult};
