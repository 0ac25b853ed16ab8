use std::path::Path;

use anyhow::{bail, Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;
use crate::domain::models::RepositoryRef;

/// Project config file, looked up in the working directory.
pub const CONFIG_FILE: &str = "notion-github-sync.yaml";

/// Prefix for structured environment overrides (`NGS_SYNC__BATCH_SIZE`).
pub const ENV_PREFIX: &str = "NGS_";

/// Conventional variables and the config keys they set.
pub const CONVENTIONAL_ENV: [(&str, &str); 4] = [
    ("GITHUB_TOKEN", "github.token"),
    ("GITHUB_REPO", "github.repository"),
    ("NOTION_TOKEN", "notion.token"),
    ("NOTION_DATABASE_ID", "notion.database_id"),
];

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("GitHub token is not set (GITHUB_TOKEN or github.token)")]
    MissingGitHubToken,

    #[error("Notion token is not set (NOTION_TOKEN or notion.token)")]
    MissingNotionToken,

    #[error("Notion database id is not set (NOTION_DATABASE_ID or notion.database_id)")]
    MissingDatabaseId,

    #[error("Invalid repository '{0}': expected 'owner/name' (GITHUB_REPO or github.repository)")]
    InvalidRepository(String),

    #[error("Invalid batch_size: {0}. Must be at least 1")]
    InvalidBatchSize(usize),

    #[error("Invalid timeout: {0}s. Must be at least 1")]
    InvalidTimeout(u64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Assignee '{0}' has an empty Notion user id")]
    EmptyAssigneeId(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. notion-github-sync.yaml in the working directory (optional)
    /// 3. Environment variables (NGS_* prefix, `__` nesting)
    /// 4. GITHUB_TOKEN, GITHUB_REPO, NOTION_TOKEN, NOTION_DATABASE_ID
    pub fn load() -> Result<Config> {
        let config: Config = Self::figment(Path::new(CONFIG_FILE))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration using an explicit config file, which must exist.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.is_file() {
            bail!("Config file not found: {}", path.display());
        }

        let config: Config = Self::figment(path)
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// The merged provider stack, without extraction or validation.
    pub fn figment(path: &Path) -> Figment {
        let mut figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        // Set as strings so ids that happen to look numeric stay strings.
        for (var, key) in CONVENTIONAL_ENV {
            if let Ok(value) = std::env::var(var) {
                if !value.is_empty() {
                    figment = figment.merge(Serialized::default(key, value));
                }
            }
        }
        figment
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.github.token.trim().is_empty() {
            return Err(ConfigError::MissingGitHubToken);
        }

        if config.github.repository.parse::<RepositoryRef>().is_err() {
            return Err(ConfigError::InvalidRepository(
                config.github.repository.clone(),
            ));
        }

        if config.notion.token.trim().is_empty() {
            return Err(ConfigError::MissingNotionToken);
        }

        if config.notion.database_id.trim().is_empty() {
            return Err(ConfigError::MissingDatabaseId);
        }

        if config.sync.batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize(config.sync.batch_size));
        }

        for timeout in [config.github.timeout_secs, config.notion.timeout_secs] {
            if timeout == 0 {
                return Err(ConfigError::InvalidTimeout(timeout));
            }
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        if let Some((login, _)) = config.assignees.iter().find(|(_, id)| id.trim().is_empty()) {
            return Err(ConfigError::EmptyAssigneeId(login.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::config::{LogFormat, DEFAULT_BATCH_SIZE};
    use crate::domain::models::IssueStateFilter;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const UNSET: [(&str, Option<&str>); 4] = [
        ("GITHUB_TOKEN", None),
        ("GITHUB_REPO", None),
        ("NOTION_TOKEN", None),
        ("NOTION_DATABASE_ID", None),
    ];

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.github.token = "ghp_test".to_string();
        config.github.repository = "octo/widgets".to_string();
        config.notion.token = "secret_test".to_string();
        config.notion.database_id = "db-1".to_string();
        config
    }

    fn yaml_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.sync.batch_size, DEFAULT_BATCH_SIZE);
        assert!(!config.sync.dry_run);
        assert_eq!(config.github.labels, "P0");
        assert_eq!(config.github.state, IssueStateFilter::All);
        assert_eq!(config.github.api_base_url, "https://api.github.com");
        assert_eq!(config.notion.api_base_url, "https://api.notion.com");
        assert_eq!(config.logging.level, "info");
        assert!(config.assignees.is_empty());
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
github:
  token: ghp_yaml
  repository: octo/widgets
  labels: P0,P1
  state: open
notion:
  token: secret_yaml
  database_id: 668d797c-76fa-4934-9b05-ad288df2d136
sync:
  batch_size: 5
assignees:
  rlch: 5d455806-cc2a-461a-ad9f-d23a16c6e01f
logging:
  level: debug
  format: json
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.github.labels, "P0,P1");
        assert_eq!(config.github.state, IssueStateFilter::Open);
        assert_eq!(config.sync.batch_size, 5);
        assert_eq!(
            config.assignees.get("rlch").map(String::as_str),
            Some("5d455806-cc2a-461a-ad9f-d23a16c6e01f")
        );
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.notion.timeout_secs, 30);

        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(ConfigLoader::validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_validate_missing_tokens() {
        let mut config = valid_config();
        config.github.token = String::new();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::MissingGitHubToken)
        ));

        let mut config = valid_config();
        config.notion.token = "  ".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::MissingNotionToken)
        ));
    }

    #[test]
    fn test_validate_missing_database_id() {
        let mut config = valid_config();
        config.notion.database_id = String::new();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::MissingDatabaseId)
        ));
    }

    #[test]
    fn test_validate_invalid_repository() {
        let mut config = valid_config();
        config.github.repository = "widgets".to_string();
        match ConfigLoader::validate(&config) {
            Err(ConfigError::InvalidRepository(repo)) => assert_eq!(repo, "widgets"),
            other => panic!("Expected InvalidRepository error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_zero_batch_size() {
        let mut config = valid_config();
        config.sync.batch_size = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidBatchSize(0))
        ));
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = valid_config();
        config.notion.timeout_secs = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidTimeout(0))
        ));
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = valid_config();
        config.logging.level = "verbose".to_string();
        match ConfigLoader::validate(&config) {
            Err(ConfigError::InvalidLogLevel(level)) => assert_eq!(level, "verbose"),
            other => panic!("Expected InvalidLogLevel error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_empty_assignee_id() {
        let mut config = valid_config();
        config.assignees.insert("ghost".to_string(), String::new());
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyAssigneeId(login)) if login == "ghost"
        ));
    }

    #[test]
    fn test_conventional_env_vars_override_file() {
        let file = yaml_file(
            "github:\n  token: from-file\n  repository: file/repo\nnotion:\n  token: file-secret\n  database_id: file-db\n",
        );

        temp_env::with_vars(
            [
                ("GITHUB_TOKEN", Some("from-env")),
                ("GITHUB_REPO", Some("env-org/env-repo")),
                ("NOTION_TOKEN", None),
                ("NOTION_DATABASE_ID", Some("1234")),
            ],
            || {
                let config = ConfigLoader::load_from_file(file.path()).unwrap();
                assert_eq!(config.github.token, "from-env");
                assert_eq!(config.github.repository, "env-org/env-repo");
                assert_eq!(config.notion.token, "file-secret");
                assert_eq!(config.notion.database_id, "1234");
            },
        );
    }

    #[test]
    fn test_prefixed_env_vars_set_nested_keys() {
        let file = yaml_file(
            "github:\n  token: t\n  repository: o/r\nnotion:\n  token: s\n  database_id: d\nsync:\n  batch_size: 10\n",
        );

        let mut vars: Vec<(&str, Option<&str>)> = UNSET.to_vec();
        vars.push(("NGS_SYNC__BATCH_SIZE", Some("3")));
        vars.push(("NGS_LOGGING__LEVEL", Some("debug")));

        temp_env::with_vars(vars, || {
            let config = ConfigLoader::load_from_file(file.path()).unwrap();
            assert_eq!(config.sync.batch_size, 3);
            assert_eq!(config.logging.level, "debug");
        });
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let result = ConfigLoader::load_from_file("/nonexistent/notion-github-sync.yaml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file_rejects_invalid_config() {
        let file = yaml_file("sync:\n  batch_size: 4\n");
        temp_env::with_vars(UNSET, || {
            let err = ConfigLoader::load_from_file(file.path()).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<ConfigError>(),
                Some(ConfigError::MissingGitHubToken)
            ));
        });
    }

    #[test]
    fn test_hierarchical_merging() {
        let base_file = yaml_file("sync:\n  batch_size: 5\nlogging:\n  level: info\n  format: json\n");
        let override_file = yaml_file("sync:\n  batch_size: 15\nlogging:\n  level: debug\n");

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(base_file.path()))
            .merge(Yaml::file(override_file.path()))
            .extract()
            .unwrap();

        assert_eq!(config.sync.batch_size, 15, "Override should win");
        assert_eq!(
            config.logging.level, "debug",
            "Override should win for nested fields"
        );
        assert_eq!(
            config.logging.format,
            LogFormat::Json,
            "Base value should persist when not overridden"
        );
    }
}
