//! Configuration schema for Csup
//!
//! Configuration is stored at `~/.config/csup/config.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Launcher download settings
    pub launcher: LauncherConfig,

    /// Toolchain setup settings
    pub setup: SetupConfig,

    /// Application launch settings
    pub launch: LaunchConfig,

    /// Download cache settings
    pub cache: CacheConfig,
}

/// Launcher download configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    /// URL of the gzipped `cs` launcher binary
    pub url: String,

    /// Name the launcher is installed under
    pub binary: String,

    /// Directory the toolchain is installed into (home-relative default)
    pub bin_dir: Option<PathBuf>,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            url: "https://github.com/coursier/coursier/releases/latest/download/cs-x86_64-pc-linux.gz"
                .to_string(),
            binary: "cs".to_string(),
            bin_dir: None,
        }
    }
}

/// Toolchain setup configuration (`cs setup`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupConfig {
    /// JVM distribution and version identifier
    pub jvm: String,

    /// Applications provisioned next to the launcher
    pub apps: Vec<String>,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            jvm: "temurin:17".to_string(),
            apps: vec!["scalafmt".to_string(), "scalafix".to_string()],
        }
    }
}

/// Application launch configuration (`cs launch`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchConfig {
    /// Extra artifact repository made available to every launch
    pub repository: String,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            repository: "sonatype:snapshots".to_string(),
        }
    }
}

/// Download cache configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory holding downloaded-dependency artifacts
    /// (defaults to `~/.cache/coursier/v1`)
    pub dir: Option<PathBuf>,

    /// Root directory of the local cache store
    pub store_root: Option<PathBuf>,
}
