//! The sync command: load config, wire adapters, run once, print the report.

use std::sync::Arc;

use anyhow::{Context, Result};
use comfy_table::Cell;
use console::style;

use crate::adapters::github::{GitHubClient, GitHubClientConfig};
use crate::adapters::notion::{NotionClient, NotionClientConfig};
use crate::domain::models::{Config, SyncReport};
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::logging::LoggerImpl;
use crate::services::{SyncOptions, SyncService};

use super::output::{count_cell, list_table, output, CommandOutput};
use super::types::Cli;

impl CommandOutput for SyncReport {
    fn to_human(&self) -> String {
        let heading = if self.dry_run {
            style("Dry run complete, nothing written").yellow().bold()
        } else {
            style("Sync complete").green().bold()
        };

        let mut table = list_table(&["phase", "planned", "applied", "batches"]);
        table.add_row(vec![
            Cell::new("create"),
            count_cell(self.planned_creates),
            count_cell(self.created()),
            count_cell(self.create_phase.batches()),
        ]);
        table.add_row(vec![
            Cell::new("update"),
            count_cell(self.planned_updates),
            count_cell(self.updated()),
            count_cell(self.update_phase.batches()),
        ]);

        let mut lines = vec![
            heading.to_string(),
            format!(
                "{} records in Notion, {} issues from GitHub ({} pull requests skipped)",
                self.records_scanned, self.issues_fetched, self.pull_requests_skipped
            ),
            String::new(),
            table.to_string(),
        ];

        if !self.unresolved_assignees.is_empty() {
            lines.push(String::new());
            lines.push(format!(
                "{} unresolved assignee(s):",
                style(self.unresolved_assignees.len()).bold()
            ));
            for unresolved in &self.unresolved_assignees {
                lines.push(format!("  - #{} {}", unresolved.issue_number, unresolved.login));
            }
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Resolve the effective configuration for this invocation.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    cli.apply_overrides(&mut config);
    ConfigLoader::validate(&config).context("Invalid command-line override")?;
    Ok(config)
}

/// Build the production service from `config`.
pub fn build_service(config: &Config) -> Result<SyncService> {
    let tracker = GitHubClient::with_config(GitHubClientConfig::from(&config.github))?;
    let store = NotionClient::with_config(NotionClientConfig::from(&config.notion))?;
    let options = SyncOptions::from_config(config)?;

    Ok(SyncService::new(Arc::new(tracker), Arc::new(store), options))
}

pub async fn execute(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let _logger = LoggerImpl::init(&config.logging)?;

    let service = build_service(&config)?;
    let report = service.run().await.context("Sync run failed")?;

    output(&report, cli.json);
    Ok(())
}
