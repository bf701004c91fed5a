//! Build the project's isolated Python environment.
//!
//! Staleness is decided by the sync marker written after a successful
//! install: the environment is fresh while the marker is at least as new
//! as the dependency manifest, so repeated bootstraps are no-ops until
//! the manifest changes.

use anyhow::{Context, Result};
use matchkit_core::config;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::SystemTime;

use crate::info_log;
use crate::runner::RuntimePaths;

/// Marker file name inside the environment directory.
const SYNC_MARKER: &str = ".deps-synced";

/// Resolved project layout: manifest, environment, and entry script paths.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    pub project_dir: PathBuf,
    pub manifest: PathBuf,
    pub venv_dir: PathBuf,
    pub entry: PathBuf,
}

impl ProjectLayout {
    /// Resolve configured file names against the project directory.
    /// Absolute values in the config are taken as-is.
    pub fn resolve(project_dir: &Path, paths: &config::PathsConfig) -> Self {
        let join = |name: &str| {
            let p = PathBuf::from(name);
            if p.is_absolute() {
                p
            } else {
                project_dir.join(p)
            }
        };
        Self {
            project_dir: project_dir.to_path_buf(),
            manifest: join(&paths.manifest),
            venv_dir: join(&paths.venv_dir),
            entry: join(&paths.entry),
        }
    }

    pub fn sync_marker(&self) -> PathBuf {
        self.venv_dir.join(SYNC_MARKER)
    }
}

/// Ensure the environment exists with all manifest dependencies installed.
///
/// No-op when the sync marker is at least as new as the manifest.
/// Otherwise the venv is created if its interpreter is missing, the
/// manifest is installed, and the marker is stamped. Installer failures
/// propagate and leave no marker, so the next run re-syncs.
pub fn ensure_environment(layout: &ProjectLayout, base_python: Option<&str>) -> Result<PathBuf> {
    let manifest_mtime = std::fs::metadata(&layout.manifest)
        .and_then(|m| m.modified())
        .with_context(|| {
            format!(
                "dependency manifest not found: {}",
                layout.manifest.display()
            )
        })?;

    let marker = layout.sync_marker();
    let marker_mtime = std::fs::metadata(&marker).and_then(|m| m.modified()).ok();

    if !is_stale(marker_mtime, manifest_mtime) {
        info_log!(
            venv = %layout.venv_dir.display(),
            "environment is up to date with the manifest"
        );
        return Ok(layout.venv_dir.clone());
    }

    if venv_python(&layout.venv_dir).is_none() {
        create_venv(layout, base_python)?;
    }

    pip_install(layout)?;

    std::fs::write(&marker, b"").context("write environment sync marker")?;
    info_log!(
        venv = %layout.venv_dir.display(),
        manifest = %layout.manifest.display(),
        "environment synced"
    );
    Ok(layout.venv_dir.clone())
}

/// Staleness rule: no marker, or a marker older than the manifest.
fn is_stale(marker_mtime: Option<SystemTime>, manifest_mtime: SystemTime) -> bool {
    match marker_mtime {
        Some(marker) => marker < manifest_mtime,
        None => true,
    }
}

/// Interpreter inside an environment directory, if the environment exists.
pub fn venv_python(env_dir: &Path) -> Option<PathBuf> {
    let bin = env_dir.join("bin").join("python");
    if bin.exists() {
        return Some(bin);
    }
    let scripts = env_dir.join("Scripts").join("python.exe");
    if scripts.exists() {
        return Some(scripts);
    }
    None
}

/// Build `RuntimePaths` from an environment directory. The interpreter
/// path is returned even when the environment does not exist yet; the
/// runner checks for presence before executing.
pub fn runtime_paths(env_dir: &Path) -> RuntimePaths {
    let python = venv_python(env_dir).unwrap_or_else(|| {
        if cfg!(windows) {
            env_dir.join("Scripts").join("python.exe")
        } else {
            env_dir.join("bin").join("python")
        }
    });
    RuntimePaths {
        python,
        env_dir: env_dir.to_path_buf(),
    }
}

fn create_venv(layout: &ProjectLayout, base_python: Option<&str>) -> Result<()> {
    let python = which_python(base_python)?;
    std::fs::create_dir_all(&layout.venv_dir).context("create venv dir")?;

    info_log!(python = %python.display(), venv = %layout.venv_dir.display(), "creating virtual environment");
    let out = Command::new(&python)
        .arg("-m")
        .arg("venv")
        .arg(&layout.venv_dir)
        .current_dir(&layout.project_dir)
        .output()
        .context("create venv")?;
    if !out.status.success() {
        anyhow::bail!("venv creation failed: {}", String::from_utf8_lossy(&out.stderr));
    }
    Ok(())
}

fn pip_install(layout: &ProjectLayout) -> Result<()> {
    let pip_bin = layout.venv_dir.join("bin").join("pip");
    let pip_scripts = layout.venv_dir.join("Scripts").join("pip.exe");
    let pip = if pip_bin.exists() {
        pip_bin
    } else if pip_scripts.exists() {
        pip_scripts
    } else {
        // fallback: python -m pip
        layout.venv_dir.join("bin").join("python")
    };

    let mut cmd = if pip.file_name().map(|n| n == "python").unwrap_or(false) {
        let mut c = Command::new(&pip);
        c.arg("-m").arg("pip").arg("install");
        c
    } else {
        let mut c = Command::new(&pip);
        c.arg("install");
        c
    };

    info_log!(manifest = %layout.manifest.display(), "installing manifest dependencies");
    let out = cmd
        .arg("-r")
        .arg(&layout.manifest)
        .current_dir(&layout.project_dir)
        .output()
        .context("pip install")?;
    if !out.status.success() {
        anyhow::bail!("pip install failed: {}", String::from_utf8_lossy(&out.stderr));
    }
    Ok(())
}

/// Resolve the base interpreter used to create the environment.
fn which_python(base_python: Option<&str>) -> Result<PathBuf> {
    if let Some(python) = base_python {
        return which::which(python)
            .with_context(|| format!("configured interpreter not found in PATH: {python}"));
    }
    for name in ["python3", "python"] {
        if let Ok(path) = which::which(name) {
            return Ok(path);
        }
    }
    anyhow::bail!("python3 or python not found in PATH")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn paths_config() -> config::PathsConfig {
        config::PathsConfig {
            manifest: "requirements.txt".to_string(),
            venv_dir: "venv".to_string(),
            entry: "main.py".to_string(),
        }
    }

    #[test]
    fn test_layout_resolves_relative_names() {
        let layout = ProjectLayout::resolve(Path::new("/srv/project"), &paths_config());
        assert_eq!(layout.manifest, Path::new("/srv/project/requirements.txt"));
        assert_eq!(layout.venv_dir, Path::new("/srv/project/venv"));
        assert_eq!(layout.entry, Path::new("/srv/project/main.py"));
        assert_eq!(layout.sync_marker(), Path::new("/srv/project/venv/.deps-synced"));
    }

    #[test]
    fn test_layout_keeps_absolute_names() {
        let cfg = config::PathsConfig {
            manifest: "/etc/matchkit/requirements.txt".to_string(),
            ..paths_config()
        };
        let layout = ProjectLayout::resolve(Path::new("/srv/project"), &cfg);
        assert_eq!(layout.manifest, Path::new("/etc/matchkit/requirements.txt"));
    }

    #[test]
    fn test_is_stale_without_marker() {
        assert!(is_stale(None, SystemTime::now()));
    }

    #[test]
    fn test_is_stale_marker_older_than_manifest() {
        let manifest = SystemTime::now();
        let marker = manifest - Duration::from_secs(60);
        assert!(is_stale(Some(marker), manifest));
    }

    #[test]
    fn test_fresh_marker_is_not_stale() {
        let manifest = SystemTime::now();
        assert!(!is_stale(Some(manifest), manifest));
        assert!(!is_stale(Some(manifest + Duration::from_secs(60)), manifest));
    }

    #[test]
    fn test_venv_python_detects_unix_layout() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(venv_python(dir.path()), None);

        std::fs::create_dir_all(dir.path().join("bin")).unwrap();
        std::fs::write(dir.path().join("bin").join("python"), b"").unwrap();
        assert_eq!(
            venv_python(dir.path()),
            Some(dir.path().join("bin").join("python"))
        );
    }

    #[test]
    fn test_ensure_environment_requires_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::resolve(dir.path(), &paths_config());
        let err = ensure_environment(&layout, None).unwrap_err();
        assert!(err.to_string().contains("dependency manifest not found"));
    }
}
