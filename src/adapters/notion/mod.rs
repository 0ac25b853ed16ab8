//! Notion database adapter.
//!
//! Implements [`RecordStore`](crate::domain::ports::RecordStore) over the
//! Notion API, one database per client.

pub mod client;
pub mod models;

pub use client::{NotionClient, NotionClientConfig};
