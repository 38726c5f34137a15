//! CLI command implementations

pub mod cache;
pub mod config;
pub mod install;
pub mod launch;
pub mod remove;
pub mod run;

pub use cache::execute as cache;
pub use config::execute as config;
pub use install::execute as install;
pub use launch::execute as launch;
pub use remove::execute as remove;
pub use run::execute as run;
