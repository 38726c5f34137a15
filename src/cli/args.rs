//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Csup - Coursier toolchain for CI
///
/// Installs the cs launcher, provisions a JVM plus scalafmt and
/// scalafix, launches applications by qualified name, and keeps the
/// coursier download cache warm across runs.
#[derive(Parser, Debug)]
#[command(name = "csup")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "CSUP_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install the launcher, JVM and applications
    Install(InstallArgs),

    /// Launch an installed application by qualified name
    Launch(LaunchArgs),

    /// Manage the persistent download cache
    Cache(CacheArgs),

    /// Remove the cache directory and all installed binaries
    Remove,

    /// Full CI sequence: restore cache, install, launch, save cache
    Run(RunArgs),

    /// Show or locate configuration
    Config(ConfigArgs),
}

/// Arguments for the install command
#[derive(Parser, Debug)]
pub struct InstallArgs {
    /// Override the launcher download URL
    #[arg(long, env = "CSUP_LAUNCHER_URL")]
    pub url: Option<String>,
}

/// Arguments for the launch command
#[derive(Parser, Debug)]
pub struct LaunchArgs {
    /// Application name (e.g. scalafmt)
    pub app: String,

    /// Application version; launched as app:version when set
    #[arg(long)]
    pub app_version: Option<String>,

    /// Arguments passed through to the application
    #[arg(last = true)]
    pub args: Vec<String>,
}

/// Arguments for the cache command
#[derive(Parser, Debug)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// Restore the cache directory for a dependency hash
    Restore {
        /// Literal dependency hash
        #[arg(long, conflicts_with = "hash_file")]
        hash: Option<String>,

        /// File(s) to derive the hash from (repeatable)
        #[arg(long = "hash-file")]
        hash_file: Vec<PathBuf>,
    },

    /// Save the cache directory under a fresh key
    Save {
        /// Literal dependency hash
        #[arg(long, conflicts_with = "hash_file")]
        hash: Option<String>,

        /// File(s) to derive the hash from (repeatable)
        #[arg(long = "hash-file")]
        hash_file: Vec<PathBuf>,
    },

    /// List entries in the local cache store
    List {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

/// Output format for list commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Keys only
    Plain,
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Application name (e.g. scalafmt)
    pub app: String,

    /// Application version; launched as app:version when set
    #[arg(long)]
    pub app_version: Option<String>,

    /// Literal dependency hash for the cache key
    #[arg(long, conflicts_with = "hash_file")]
    pub hash: Option<String>,

    /// File(s) to derive the cache hash from (repeatable)
    #[arg(long = "hash-file")]
    pub hash_file: Vec<PathBuf>,

    /// Arguments passed through to the application
    #[arg(last = true)]
    pub args: Vec<String>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn launch_args_after_separator() {
        let cli = Cli::try_parse_from([
            "csup", "launch", "scalafmt", "--app-version", "3.8.1", "--", "--check", "src",
        ])
        .unwrap();
        match cli.command {
            Commands::Launch(args) => {
                assert_eq!(args.app, "scalafmt");
                assert_eq!(args.app_version.as_deref(), Some("3.8.1"));
                assert_eq!(args.args, vec!["--check", "src"]);
            }
            other => panic!("expected Launch, got {:?}", other),
        }
    }

    #[test]
    fn cache_hash_and_hash_file_conflict() {
        let result = Cli::try_parse_from([
            "csup",
            "cache",
            "restore",
            "--hash",
            "abc",
            "--hash-file",
            "build.sbt",
        ]);
        assert!(result.is_err());
    }
}
