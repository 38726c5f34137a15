//! Application launching through the installed `cs` launcher
//!
//! Builds `cs launch --contrib -r <repository> <app[:version]> -- <args>`
//! and forwards the child's output line by line: stdout to info
//! logging, stderr to error logging. A non-zero exit is surfaced as
//! [`CsupError::LaunchFailed`] carrying the exact qualified name, the
//! one failure here that stays specific.

use crate::config::Config;
use crate::error::{CsupError, CsupResult};
use crate::exec::{self, ToolEnv};
use tracing::info;

/// Validated, non-empty application version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppVersion(String);

impl AppVersion {
    /// Wrap a version string, rejecting empty or whitespace-only input.
    pub fn new(version: impl Into<String>) -> CsupResult<Self> {
        let version = version.into();
        if version.trim().is_empty() {
            return Err(CsupError::EmptyVersion);
        }
        Ok(Self(version))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AppVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One launch argument: a bare string or an ordered group of strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchArg {
    Arg(String),
    Group(Vec<String>),
}

impl From<&str> for LaunchArg {
    fn from(s: &str) -> Self {
        Self::Arg(s.to_string())
    }
}

/// Flatten mixed bare/group arguments into the invoked sequence,
/// groups inlined in order.
pub fn flatten_args(args: &[LaunchArg]) -> Vec<String> {
    let mut flat = Vec::new();
    for arg in args {
        match arg {
            LaunchArg::Arg(s) => flat.push(s.clone()),
            LaunchArg::Group(group) => flat.extend(group.iter().cloned()),
        }
    }
    flat
}

/// `app` or `app:version`
pub fn qualified_name(app: &str, version: Option<&AppVersion>) -> String {
    match version {
        Some(v) => format!("{}:{}", app, v.as_str()),
        None => app.to_string(),
    }
}

/// Launch an application by qualified name with the given arguments.
pub async fn launch(
    env: &ToolEnv,
    app: &str,
    version: Option<&AppVersion>,
    args: &[LaunchArg],
    config: &Config,
) -> CsupResult<()> {
    let qualified = qualified_name(app, version);

    let mut invocation = vec![
        "launch".to_string(),
        "--contrib".to_string(),
        "-r".to_string(),
        config.launch.repository.clone(),
        qualified.clone(),
        "--".to_string(),
    ];
    invocation.extend(flatten_args(args));

    info!("Launching {}", qualified);
    let code = exec::stream(env, &config.launcher.binary, &invocation).await?;

    if code == 0 {
        Ok(())
    } else {
        Err(CsupError::LaunchFailed {
            app: qualified,
            code,
        })
    }
}
