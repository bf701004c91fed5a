//! `matchkit clean` / `matchkit clean-all`: cache and environment removal.

use anyhow::Result;
use std::path::Path;

use matchkit_core::config::PathsConfig;
use matchkit_runtime::cache;
use matchkit_runtime::env::builder::ProjectLayout;

pub fn clean(project_dir: &Path, dry_run: bool) -> Result<()> {
    let layout = layout(project_dir);
    let report = cache::clean_bytecode(&layout.project_dir, &layout.venv_dir, dry_run)?;

    eprintln!(
        "✓ Removed {} cache director{} and {} compiled file(s), freed {}",
        report.removed_dirs,
        if report.removed_dirs == 1 { "y" } else { "ies" },
        report.removed_files,
        cache::format_size(report.freed_bytes)
    );
    if dry_run {
        eprintln!("(Dry run — no files removed. Remove --dry-run to delete.)");
    }
    Ok(())
}

pub fn clean_all(project_dir: &Path, dry_run: bool, force: bool) -> Result<()> {
    let layout = layout(project_dir);
    let report = cache::clean_bytecode(&layout.project_dir, &layout.venv_dir, dry_run)?;

    let mut freed = report.freed_bytes;
    if layout.venv_dir.exists() {
        if !dry_run && !force && !confirm_removal(&layout)? {
            eprintln!("Cancelled.");
            return Ok(());
        }
        freed += cache::remove_venv(&layout.venv_dir, dry_run)?;
    } else {
        eprintln!("No environment found at {}", layout.venv_dir.display());
    }

    eprintln!("✓ Cleaned project tree, freed {}", cache::format_size(freed));
    if dry_run {
        eprintln!("(Dry run — no files removed. Remove --dry-run to delete.)");
    }
    Ok(())
}

fn layout(project_dir: &Path) -> ProjectLayout {
    ProjectLayout::resolve(project_dir, &PathsConfig::from_env())
}

fn confirm_removal(layout: &ProjectLayout) -> Result<bool> {
    eprint!(
        "\nRemove the virtual environment at {}? [y/N] ",
        layout.venv_dir.display()
    );
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
