//! Toolchain installation
//!
//! Downloads the `cs` launcher, provisions a managed JVM plus the
//! configured applications next to it, and confirms each installed
//! tool by querying its version.
//!
//! Installation is on the critical path, but its error surface is
//! deliberately generic: whatever step fails, the caller sees
//! [`CsupError::InstallFailed`] and the underlying cause goes to the
//! debug log only.

pub mod fetch;

use crate::config::{Config, ConfigManager};
use crate::error::{CsupError, CsupResult};
use crate::exec::{self, ToolEnv};
use tokio::fs;
use tracing::{debug, info};

/// Install the launcher and its applications, returning the
/// execution environment subsequent invocations must use.
pub async fn install(config: &Config) -> CsupResult<ToolEnv> {
    match install_toolchain(config).await {
        Ok(env) => Ok(env),
        Err(e) => {
            debug!("Installation error: {}", e);
            Err(CsupError::InstallFailed)
        }
    }
}

async fn install_toolchain(config: &Config) -> CsupResult<ToolEnv> {
    let bin_dir = ConfigManager::bin_dir(config);
    fs::create_dir_all(&bin_dir)
        .await
        .map_err(|e| CsupError::io(format!("creating bin dir {}", bin_dir.display()), e))?;

    let launcher = bin_dir.join(&config.launcher.binary);
    info!("Downloading {} from {}", config.launcher.binary, config.launcher.url);
    fetch::download_gz(&config.launcher.url, &launcher).await?;
    fetch::make_executable(&launcher)?;

    let env = ToolEnv::new(&bin_dir);

    let apps = config.setup.apps.join(",");
    let setup_args = vec![
        "setup".to_string(),
        "--yes".to_string(),
        "--jvm".to_string(),
        config.setup.jvm.clone(),
        "--apps".to_string(),
        apps.clone(),
        "--install-dir".to_string(),
        bin_dir.display().to_string(),
    ];

    info!("Provisioning JVM {} and apps [{}]", config.setup.jvm, apps);
    exec::output(&env, &config.launcher.binary, &setup_args).await?;

    log_versions(&env, config).await?;

    Ok(env)
}

/// Query each installed tool for its version string, for confirmation
/// and human-readable log lines.
async fn log_versions(env: &ToolEnv, config: &Config) -> CsupResult<()> {
    let launcher_version = exec::output(env, &config.launcher.binary, &["version".to_string()]).await?;
    info!("Installed {} {}", config.launcher.binary, launcher_version.trim());

    for app in &config.setup.apps {
        let output = exec::output(env, app, &["--version".to_string()]).await?;
        info!("Installed {} {}", app, strip_version_prefix(app, &output));
    }

    Ok(())
}

/// Version output arrives as `"<app> <version>"`; strip the known
/// prefix before logging.
fn strip_version_prefix<'a>(app: &str, output: &'a str) -> &'a str {
    let trimmed = output.trim();
    match trimmed.strip_prefix(app) {
        Some(rest) => rest.trim_start(),
        None => trimmed,
    }
}
