//! Error types for Csup
//!
//! All modules use `CsupResult<T>` as their return type.
//!
//! Two reporting policies coexist: installation failures collapse into
//! the generic [`CsupError::InstallFailed`] (the cause goes to the
//! debug log only), while launch and process-execution failures stay
//! specific - the qualified application name and the full command line
//! respectively are part of the message.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Csup operations
pub type CsupResult<T> = Result<T, CsupError>;

/// All errors that can occur in Csup
#[derive(Error, Debug)]
pub enum CsupError {
    // Installation errors
    #[error("Installation of the coursier toolchain failed")]
    InstallFailed,

    #[error("Download failed for {url}: {reason}")]
    Download { url: String, reason: String },

    // Launch errors
    #[error("Launch of {app} failed with exit code {code}")]
    LaunchFailed { app: String, code: i32 },

    #[error("Application version must not be empty or whitespace-only")]
    EmptyVersion,

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Cache errors
    #[error("Cache store error for key {key}: {reason}")]
    CacheStore { key: String, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Process errors
    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command exited with code {code}: {command}")]
    CommandExit { command: String, code: i32 },

    // Serialization errors
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // General errors
    #[error("{0}")]
    User(String),
}

impl CsupError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error (spawn-level failure)
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::InstallFailed => Some("Re-run with -vv to see the underlying cause"),
            Self::Download { .. } => Some("Check the [launcher] url in the configuration"),
            _ => None,
        }
    }
}
