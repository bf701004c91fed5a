//! `matchkit run`: execute the entry script in the environment.

use anyhow::Result;
use std::path::{Path, PathBuf};

use matchkit_core::config::{PathsConfig, RuntimeConfig};
use matchkit_runtime::env::builder::{self, ProjectLayout};
use matchkit_runtime::runner::{self, RunConfig};

/// Run the entry script; returns its exit code for the caller to
/// propagate.
pub fn run(
    project_dir: &Path,
    filter: String,
    input: Option<PathBuf>,
    cli_timeout: Option<u64>,
) -> Result<i32> {
    let paths = PathsConfig::from_env();
    let limits = RuntimeConfig::from_env().with_cli_overrides(cli_timeout);

    let layout = ProjectLayout::resolve(project_dir, &paths);
    let runtime = builder::runtime_paths(&layout.venv_dir);

    let config = RunConfig {
        entry: paths.entry,
        filter,
        input,
    };

    runner::run_entry(project_dir, &runtime, &config, limits.timeout_secs)
}
