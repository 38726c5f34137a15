//! External process execution
//!
//! All child processes run with the install bin directory threaded
//! explicitly onto `PATH` via [`ToolEnv`]. Nothing here mutates the
//! parent process environment, so the coupling between installer and
//! launcher is visible in the signatures instead of hidden in globals.

use crate::error::{CsupError, CsupResult};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, error, info};

/// Execution environment for installed tools
///
/// Carries the directory the installer placed `cs`, `scalafmt` and
/// `scalafix` into. Every invocation prepends it to the inherited
/// `PATH` for that child only.
#[derive(Debug, Clone)]
pub struct ToolEnv {
    bin_dir: PathBuf,
}

impl ToolEnv {
    /// Create an environment rooted at the given bin directory
    pub fn new(bin_dir: impl Into<PathBuf>) -> Self {
        Self {
            bin_dir: bin_dir.into(),
        }
    }

    /// The directory holding the installed executables
    pub fn bin_dir(&self) -> &Path {
        &self.bin_dir
    }

    /// `PATH` value for child processes: bin dir first, inherited rest
    pub fn path_value(&self) -> String {
        match std::env::var("PATH") {
            Ok(path) if !path.is_empty() => {
                format!("{}:{}", self.bin_dir.display(), path)
            }
            _ => self.bin_dir.display().to_string(),
        }
    }

    fn command(&self, program: &str, args: &[String]) -> Command {
        let mut cmd = Command::new(program);
        cmd.args(args).env("PATH", self.path_value());
        cmd
    }
}

/// Render a command line for diagnostics
pub fn render_command(program: &str, args: &[String]) -> String {
    let mut line = String::from(program);
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

/// Run a program and capture its stdout as one string.
///
/// Stderr lines are forwarded to debug logging as they arrive. A
/// non-zero exit becomes [`CsupError::CommandExit`] carrying the full
/// command line.
pub async fn output(env: &ToolEnv, program: &str, args: &[String]) -> CsupResult<String> {
    let command_line = render_command(program, args);
    debug!("Executing: {}", command_line);

    let mut child = env
        .command(program, args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| CsupError::command_failed(command_line.clone(), e))?;

    let stderr = child.stderr.take().expect("stderr piped");
    let mut stderr_reader = BufReader::new(stderr).lines();
    let stderr_task = tokio::spawn(async move {
        while let Ok(Some(line)) = stderr_reader.next_line().await {
            debug!("{}", line);
        }
    });

    let mut stdout = child.stdout.take().expect("stdout piped");
    let mut captured = Vec::new();
    stdout
        .read_to_end(&mut captured)
        .await
        .map_err(|e| CsupError::command_failed(command_line.clone(), e))?;

    let status = child
        .wait()
        .await
        .map_err(|e| CsupError::command_failed(command_line.clone(), e))?;
    let _ = stderr_task.await;

    if status.success() {
        Ok(String::from_utf8_lossy(&captured).to_string())
    } else {
        Err(CsupError::CommandExit {
            command: command_line,
            code: status.code().unwrap_or(-1),
        })
    }
}

/// Run a program with line-buffered output passthrough.
///
/// Stdout lines go to info logging, stderr lines to error logging, in
/// real time. Returns the exit code; spawn failures are the only error.
pub async fn stream(env: &ToolEnv, program: &str, args: &[String]) -> CsupResult<i32> {
    let command_line = render_command(program, args);
    debug!("Executing: {}", command_line);

    let mut child = env
        .command(program, args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| CsupError::command_failed(command_line.clone(), e))?;

    let stdout = child.stdout.take().expect("stdout piped");
    let stderr = child.stderr.take().expect("stderr piped");

    let mut stdout_reader = BufReader::new(stdout).lines();
    let mut stderr_reader = BufReader::new(stderr).lines();

    let mut stdout_done = false;
    let mut stderr_done = false;

    while !stdout_done || !stderr_done {
        tokio::select! {
            line = stdout_reader.next_line(), if !stdout_done => {
                match line {
                    Ok(Some(line)) => info!("{}", line),
                    _ => stdout_done = true,
                }
            }
            line = stderr_reader.next_line(), if !stderr_done => {
                match line {
                    Ok(Some(line)) => error!("{}", line),
                    _ => stderr_done = true,
                }
            }
        }
    }

    let status = child
        .wait()
        .await
        .map_err(|e| CsupError::command_failed(command_line, e))?;

    Ok(status.code().unwrap_or(-1))
}
