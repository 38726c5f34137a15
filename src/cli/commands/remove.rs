//! Remove command - best-effort cleanup

use crate::config::{Config, ConfigManager};
use crate::error::CsupResult;
use crate::exec::ToolEnv;
use crate::remove;

/// Execute the remove command
pub async fn execute(config: &Config) -> CsupResult<()> {
    let env = ToolEnv::new(ConfigManager::bin_dir(config));
    remove::remove(&env, config).await;
    println!("Removed toolchain and cache (best effort)");
    Ok(())
}
