//! Run command - the full CI sequence
//!
//! restore cache -> install -> launch -> save cache. The cache edges
//! are fail-soft (outcomes are logged, never fatal); install and
//! launch in the middle are fail-loud.

use crate::cache::{CacheManager, FsCacheStore};
use crate::cli::args::RunArgs;
use crate::config::{Config, ConfigManager};
use crate::error::CsupResult;
use crate::install;
use crate::launch::{self, AppVersion, LaunchArg};
use tracing::debug;

use super::cache::resolve_hash;

/// Execute the run command
pub async fn execute(args: RunArgs, config: &Config) -> CsupResult<()> {
    let hash = if args.hash.is_none() && args.hash_file.is_empty() {
        debug!("No cache hash given, skipping cache restore/save");
        None
    } else {
        Some(resolve_hash(args.hash.clone(), &args.hash_file)?)
    };

    let manager = hash.as_ref().map(|_| {
        let store = FsCacheStore::new(ConfigManager::store_root(config));
        CacheManager::new(Box::new(store), ConfigManager::cache_dir(config))
    });

    if let (Some(manager), Some(hash)) = (&manager, &hash) {
        let outcome = manager.restore(hash).await;
        println!("Cache restore: {}", outcome);
    }

    let env = install::install(config).await?;

    let version = match &args.app_version {
        Some(v) => Some(AppVersion::new(v.clone())?),
        None => None,
    };
    let launch_args: Vec<LaunchArg> = args.args.iter().cloned().map(LaunchArg::Arg).collect();

    let result = launch::launch(&env, &args.app, version.as_ref(), &launch_args, config).await;

    // Save even when the launch failed: the dependency downloads are
    // still worth keeping for the next run.
    if let (Some(manager), Some(hash)) = (&manager, &hash) {
        let outcome = manager.save(hash).await;
        println!("Cache save: {}", outcome);
    }

    result
}
