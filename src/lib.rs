//! Csup - Coursier toolchain for CI
//!
//! Installs the `cs` launcher, provisions a JVM plus scalafmt and
//! scalafix through it, launches applications by qualified name, and
//! keeps the coursier download cache warm across runs.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod exec;
pub mod install;
pub mod launch;
pub mod remove;

pub use error::{CsupError, CsupResult};
pub use exec::ToolEnv;
