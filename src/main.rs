mod age;
mod cli;
mod cluster;
mod commands;
mod error;
mod gitrepo;
mod matching;
mod models;
mod output;
mod retention;
mod scan;
mod usage;

use std::process;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, ImagesCommand};
use models::ResourceKind;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    match &cli.command {
        Command::Images(ImagesCommand::History(args)) => {
            commands::images::history(args, cli.batch).await
        }
        Command::Images(ImagesCommand::Orphans(args)) => {
            commands::images::orphans(args, cli.batch).await
        }
        Command::Configmaps(args) => {
            commands::resources::clean(ResourceKind::ConfigMap, args, cli.batch).await
        }
        Command::Secrets(args) => {
            commands::resources::clean(ResourceKind::Secret, args, cli.batch).await
        }
        Command::Namespaces(args) => commands::namespaces::clean(args, cli.batch).await,
    }
}

/// Logs go to stderr so stdout stays machine-parseable. Batch mode skips
/// subscriber installation entirely; `--verbose` wins over `--log-level`.
fn init_logging(cli: &Cli) {
    if cli.batch {
        return;
    }

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
