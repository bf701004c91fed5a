//! Entry-script execution inside the bootstrapped environment.

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::common;
use crate::info_log;

/// Filter passed to the entry script when none is given on the command line.
pub const DEFAULT_FILTER: &str = "Middle UX-designer";

/// Resolved interpreter paths for entry execution.
///
/// Callers construct this via `env::builder::runtime_paths`; the runner
/// never imports the builder directly.
#[derive(Debug, Clone)]
pub struct RuntimePaths {
    /// Path to the environment's Python interpreter
    pub python: PathBuf,
    /// Environment directory the interpreter belongs to
    pub env_dir: PathBuf,
}

/// Entry invocation configuration.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Entry script, relative to the project directory
    pub entry: String,
    /// Target position name forwarded as `--filter`
    pub filter: String,
    /// Optional profiles file forwarded as `--input`
    pub input: Option<PathBuf>,
}

/// Argument vector handed to the interpreter: entry script plus its CLI.
pub fn entry_args(config: &RunConfig) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        config.entry.clone().into(),
        "--filter".into(),
        config.filter.clone().into(),
    ];
    if let Some(ref input) = config.input {
        args.push("--input".into());
        args.push(input.as_os_str().to_os_string());
    }
    args
}

/// Run the entry script and return its exit code.
///
/// Fails when the environment has not been bootstrapped; `run` never
/// creates the environment implicitly. Child stdio is inherited; the
/// caller propagates the exit code.
pub fn run_entry(
    project_dir: &Path,
    runtime: &RuntimePaths,
    config: &RunConfig,
    timeout_secs: Option<u64>,
) -> Result<i32> {
    if !runtime.python.exists() {
        anyhow::bail!(
            "no virtual environment at {}; run `matchkit venv` first",
            runtime.env_dir.display()
        );
    }

    let entry_path = project_dir.join(&config.entry);
    if !entry_path.is_file() {
        anyhow::bail!("entry script not found: {}", entry_path.display());
    }

    info_log!(
        entry = %config.entry,
        filter = %config.filter,
        python = %runtime.python.display(),
        "running entry script"
    );

    let mut cmd = Command::new(&runtime.python);
    cmd.args(entry_args(config)).current_dir(project_dir);

    match timeout_secs {
        Some(timeout) => {
            let mut child = cmd.spawn().context("spawn entry script")?;
            common::wait_with_timeout(&mut child, timeout)
        }
        None => {
            let status = cmd.status().context("run entry script")?;
            Ok(status.code().unwrap_or(-1))
        }
    }
}
