//! Csup - Coursier toolchain for CI
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use csup::cli::{Cli, Commands};
use csup::config::ConfigManager;
use csup::error::CsupResult;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> CsupResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("csup=warn"),
        1 => EnvFilter::new("csup=info"),
        _ => EnvFilter::new("csup=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // Load configuration
    let config_manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };
    let config = config_manager.load().await?;

    // Dispatch to command
    match cli.command {
        Commands::Install(args) => csup::cli::commands::install(args, &config).await,
        Commands::Launch(args) => csup::cli::commands::launch(args, &config).await,
        Commands::Cache(args) => csup::cli::commands::cache(args, &config).await,
        Commands::Remove => csup::cli::commands::remove(&config).await,
        Commands::Run(args) => csup::cli::commands::run(args, &config).await,
        Commands::Config(args) => {
            csup::cli::commands::config(args, &config, &config_manager).await
        }
    }
}
