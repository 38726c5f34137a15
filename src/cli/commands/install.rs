//! Install command - provision the toolchain

use crate::cli::args::InstallArgs;
use crate::config::Config;
use crate::error::CsupResult;
use crate::install;

/// Execute the install command
pub async fn execute(args: InstallArgs, config: &Config) -> CsupResult<()> {
    let mut config = config.clone();
    if let Some(url) = args.url {
        config.launcher.url = url;
    }

    let env = install::install(&config).await?;
    println!("Toolchain installed in {}", env.bin_dir().display());
    Ok(())
}
