//! Bytecode cache and environment cleanup.
//!
//! `clean` removes `__pycache__/` directories and compiled files under the
//! project tree without touching the environment; `clean-all` additionally
//! removes the environment directory. Both are idempotent.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::info_log;

/// Compiled-file extensions treated as bytecode cache artifacts.
const BYTECODE_EXTENSIONS: &[&str] = &["pyc", "pyo"];

/// Directory name holding compiled modules.
const BYTECODE_DIR: &str = "__pycache__";

/// What a cleanup pass removed (or would remove, with dry-run).
#[derive(Debug, Default, Clone, Copy)]
pub struct CleanReport {
    pub removed_dirs: usize,
    pub removed_files: usize,
    pub freed_bytes: u64,
}

/// Remove bytecode caches under the project tree.
///
/// The environment directory is skipped entirely so the cleanup never
/// degrades an installed environment. With `dry_run` nothing is deleted;
/// the report counts what a real pass would remove.
pub fn clean_bytecode(project_dir: &Path, venv_dir: &Path, dry_run: bool) -> Result<CleanReport> {
    let mut report = CleanReport::default();
    clean_tree(project_dir, venv_dir, dry_run, &mut report)?;
    info_log!(
        dirs = report.removed_dirs,
        files = report.removed_files,
        freed = %format_size(report.freed_bytes),
        dry_run,
        "bytecode caches cleaned"
    );
    Ok(report)
}

fn clean_tree(
    dir: &Path,
    venv_dir: &Path,
    dry_run: bool,
    report: &mut CleanReport,
) -> Result<()> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        // A tree with nothing to clean is a no-op, not an error.
        Err(_) => return Ok(()),
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path == venv_dir {
            continue;
        }

        if path.is_dir() {
            if path.file_name().map(|n| n == BYTECODE_DIR).unwrap_or(false) {
                report.freed_bytes += dir_size(&path);
                report.removed_dirs += 1;
                if !dry_run {
                    fs::remove_dir_all(&path)
                        .with_context(|| format!("remove {}", path.display()))?;
                }
            } else {
                clean_tree(&path, venv_dir, dry_run, report)?;
            }
        } else if is_bytecode_file(&path) {
            report.freed_bytes += path.metadata().map(|m| m.len()).unwrap_or(0);
            report.removed_files += 1;
            if !dry_run {
                fs::remove_file(&path).with_context(|| format!("remove {}", path.display()))?;
            }
        }
    }
    Ok(())
}

fn is_bytecode_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| BYTECODE_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

/// Remove the environment directory. Returns the freed size; a missing
/// environment is a no-op.
pub fn remove_venv(venv_dir: &Path, dry_run: bool) -> Result<u64> {
    if !venv_dir.exists() {
        return Ok(0);
    }
    let size = dir_size(venv_dir);
    if !dry_run {
        fs::remove_dir_all(venv_dir)
            .with_context(|| format!("remove environment {}", venv_dir.display()))?;
    }
    info_log!(venv = %venv_dir.display(), freed = %format_size(size), dry_run, "environment removed");
    Ok(size)
}

/// Compute total size of a directory recursively.
pub fn dir_size(path: &Path) -> u64 {
    let mut total: u64 = 0;
    if let Ok(entries) = fs::read_dir(path) {
        for entry in entries.flatten() {
            let p = entry.path();
            if p.is_dir() {
                total += dir_size(&p);
            } else if let Ok(meta) = p.metadata() {
                total += meta.len();
            }
        }
    }
    total
}

/// Format byte size to a human-readable string.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}
