//! Infrastructure layer module
//!
//! Process-wide concerns that sit outside the sync pipeline:
//! - Configuration loading (figment: defaults, YAML, environment)
//! - Logging setup (tracing-subscriber, optional rolling file)

pub mod config;
pub mod logging;
