//! `matchkit venv`: ensure the environment exists and is synced.

use anyhow::Result;
use std::path::Path;

use matchkit_core::config::{PathsConfig, RuntimeConfig};
use matchkit_runtime::env::builder::{self, ProjectLayout};

pub fn ensure(project_dir: &Path) -> Result<ProjectLayout> {
    let paths = PathsConfig::from_env();
    let runtime = RuntimeConfig::from_env();

    let layout = ProjectLayout::resolve(project_dir, &paths);
    builder::ensure_environment(&layout, runtime.python.as_deref())?;

    eprintln!("✓ Environment ready: {}", layout.venv_dir.display());
    Ok(layout)
}
