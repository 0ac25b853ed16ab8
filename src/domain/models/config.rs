use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::issue::IssueStateFilter;

/// Main configuration structure for the sync
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// GitHub (tracker) configuration
    #[serde(default)]
    pub github: GitHubConfig,

    /// Notion (record store) configuration
    #[serde(default)]
    pub notion: NotionConfig,

    /// Sync behavior
    #[serde(default)]
    pub sync: SyncConfig,

    /// GitHub login → Notion user id
    #[serde(default)]
    pub assignees: BTreeMap<String, String>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// GitHub configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GitHubConfig {
    /// Personal access token or fine-grained token
    #[serde(default)]
    pub token: String,

    /// Repository in `owner/name` form
    #[serde(default)]
    pub repository: String,

    /// Comma-separated label filter
    #[serde(default = "default_labels")]
    pub labels: String,

    /// Issue state filter
    #[serde(default)]
    pub state: IssueStateFilter,

    /// REST API base URL
    #[serde(default = "default_github_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_labels() -> String {
    "P0".to_string()
}

fn default_github_api_base_url() -> String {
    "https://api.github.com".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            repository: String::new(),
            labels: default_labels(),
            state: IssueStateFilter::default(),
            api_base_url: default_github_api_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Notion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct NotionConfig {
    /// Integration token
    #[serde(default)]
    pub token: String,

    /// Target database id
    #[serde(default)]
    pub database_id: String,

    /// API base URL
    #[serde(default = "default_notion_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_notion_api_base_url() -> String {
    "https://api.notion.com".to_string()
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            database_id: String::new(),
            api_base_url: default_notion_api_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Sync behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SyncConfig {
    /// Maximum concurrent writes per batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Plan only, skip both write phases
    #[serde(default)]
    pub dry_run: bool,
}

/// Default number of store writes in flight at once.
pub const DEFAULT_BATCH_SIZE: usize = 10;

const fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            dry_run: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Console output format
    #[serde(default)]
    pub format: LogFormat,

    /// Directory for a rolling JSON log file (optional)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Log file rotation policy
    #[serde(default)]
    pub rotation: RotationPolicy,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            log_dir: None,
            rotation: RotationPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    #[default]
    Daily,
    Hourly,
    Never,
}
