//! notion-github-sync CLI entry point.

use clap::Parser;

use notion_github_sync::cli::{self, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = cli::sync::execute(&cli).await {
        cli::handle_error(err, cli.json);
    }
}
