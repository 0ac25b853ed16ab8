//! GitHub Issues adapter.
//!
//! Implements [`TrackerSource`](crate::domain::ports::TrackerSource) over
//! the GitHub REST API v3 issues endpoint.

pub mod client;
pub mod models;

pub use client::{GitHubClient, GitHubClientConfig};
