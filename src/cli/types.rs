//! CLI type definitions

use std::path::PathBuf;

use clap::Parser;

use crate::domain::models::Config;

#[derive(Parser, Debug, Default)]
#[command(name = "notion-github-sync")]
#[command(about = "Mirror GitHub issues into a Notion database", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to ./notion-github-sync.yaml when present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Plan creates and updates without writing to Notion
    #[arg(long)]
    pub dry_run: bool,

    /// Maximum concurrent Notion writes per batch
    #[arg(short, long, value_name = "N")]
    pub batch_size: Option<usize>,

    /// Output in JSON format
    #[arg(short, long)]
    pub json: bool,
}

impl Cli {
    /// Flags win over every config layer.
    pub fn apply_overrides(&self, config: &mut Config) {
        if self.dry_run {
            config.sync.dry_run = true;
        }
        if let Some(batch_size) = self.batch_size {
            config.sync.batch_size = batch_size;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_no_flags() {
        let cli = Cli::try_parse_from(["notion-github-sync"]).unwrap();
        assert!(cli.config.is_none());
        assert!(!cli.dry_run);
        assert!(cli.batch_size.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::try_parse_from([
            "notion-github-sync",
            "--config",
            "sync.yaml",
            "--dry-run",
            "--batch-size",
            "4",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("sync.yaml")));
        assert!(cli.dry_run);
        assert_eq!(cli.batch_size, Some(4));
        assert!(cli.json);
    }

    #[test]
    fn test_rejects_non_numeric_batch_size() {
        assert!(Cli::try_parse_from(["notion-github-sync", "--batch-size", "many"]).is_err());
    }

    #[test]
    fn test_overrides_only_touch_given_flags() {
        let mut config = Config::default();
        config.sync.batch_size = 7;
        config.sync.dry_run = true;

        Cli::default().apply_overrides(&mut config);
        assert_eq!(config.sync.batch_size, 7);
        assert!(config.sync.dry_run);

        let cli = Cli {
            batch_size: Some(3),
            ..Cli::default()
        };
        cli.apply_overrides(&mut config);
        assert_eq!(config.sync.batch_size, 3);
    }
}
