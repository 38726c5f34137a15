//! Best-effort removal of the installed toolchain and cache
//!
//! Cleanup-at-end-of-run semantics: nothing here raises. Missing
//! paths are fine, failed deletions are debug-logged and skipped, and
//! the launcher's own `uninstall --all` exit code is ignored.

use crate::config::{Config, ConfigManager};
use crate::exec::{self, ToolEnv};
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

/// Remove the cache directory, each installed binary, and anything
/// the launcher installed globally. Idempotent.
pub async fn remove(env: &ToolEnv, config: &Config) {
    let uninstall_args = vec!["uninstall".to_string(), "--all".to_string()];
    if let Err(e) = exec::output(env, &config.launcher.binary, &uninstall_args).await {
        debug!("Launcher uninstall skipped: {}", e);
    }

    let cache_dir = ConfigManager::cache_dir(config);
    remove_dir(&cache_dir).await;

    let bin_dir = ConfigManager::bin_dir(config);
    remove_file(&bin_dir.join(&config.launcher.binary)).await;
    for app in &config.setup.apps {
        remove_file(&bin_dir.join(app)).await;
    }

    info!("Toolchain and cache removed");
}

async fn remove_dir(path: &Path) {
    match fs::remove_dir_all(path).await {
        Ok(()) => debug!("Removed {}", path.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => debug!("Could not remove {}: {}", path.display(), e),
    }
}

async fn remove_file(path: &Path) {
    match fs::remove_file(path).await {
        Ok(()) => debug!("Removed {}", path.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => debug!("Could not remove {}: {}", path.display(), e),
    }
}
