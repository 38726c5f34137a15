//! Launch command - run an installed application

use crate::cli::args::LaunchArgs;
use crate::config::{Config, ConfigManager};
use crate::error::CsupResult;
use crate::exec::ToolEnv;
use crate::launch::{self, AppVersion, LaunchArg};

/// Execute the launch command
pub async fn execute(args: LaunchArgs, config: &Config) -> CsupResult<()> {
    let env = ToolEnv::new(ConfigManager::bin_dir(config));

    let version = match args.app_version {
        Some(v) => Some(AppVersion::new(v)?),
        None => None,
    };

    let launch_args: Vec<LaunchArg> = args.args.into_iter().map(LaunchArg::Arg).collect();

    launch::launch(&env, &args.app, version.as_ref(), &launch_args, config).await
}
