//! `matchkit match`: native candidate matching.
//!
//! The Rust counterpart of the pipeline's entry script: load the target
//! positions config, chain the selected position's criteria, and evaluate
//! every valid candidate profile.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use matchkit_core::config::MatchConfig;
use matchkit_core::matching::{chain_specifications_for_position, Specification};
use matchkit_core::profile::Profile;

pub fn run_match(project_dir: &Path, filter: &str, input: Option<PathBuf>) -> Result<()> {
    let config = MatchConfig::from_env();

    let profiles_path = input
        .map(|p| resolve(project_dir, p))
        .unwrap_or_else(|| resolve(project_dir, PathBuf::from(&config.profiles)));
    if !profiles_path.is_file() {
        anyhow::bail!(
            "file with available profiles is not found: {}",
            profiles_path.display()
        );
    }

    let positions_path = resolve(project_dir, PathBuf::from(&config.target_positions));
    if !positions_path.is_file() {
        anyhow::bail!(
            "file with available target positions is not found: {}",
            positions_path.display()
        );
    }

    let positions: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(&positions_path)
            .with_context(|| format!("read {}", positions_path.display()))?,
    )
    .with_context(|| format!("parse {}", positions_path.display()))?;

    let criteria = positions
        .get(filter)
        .and_then(|v| v.as_object())
        .with_context(|| {
            format!(
                "there is no target position named {filter:?}; add one to {} to perform a search",
                positions_path.display()
            )
        })?;

    let specification = chain_specifications_for_position(criteria)?;

    let raw_profiles: Vec<serde_json::Value> = serde_json::from_str(
        &std::fs::read_to_string(&profiles_path)
            .with_context(|| format!("read {}", profiles_path.display()))?,
    )
    .with_context(|| format!("parse {}", profiles_path.display()))?;

    let today = chrono::Local::now().date_naive();
    let mut candidates: Vec<Profile> = Vec::with_capacity(raw_profiles.len());
    for raw in raw_profiles {
        match serde_json::from_value::<Profile>(raw) {
            Ok(mut profile) => {
                profile.normalize(today);
                candidates.push(profile);
            }
            Err(error) => {
                tracing::debug!(%error, "profile rejected by schema validation");
                println!("Candidate provided invalid data - profile will not be considered.");
            }
        }
    }

    for candidate in &candidates {
        if specification.is_satisfied_by(candidate) {
            println!("{} - True", candidate.full_name());
        }
    }

    Ok(())
}

fn resolve(project_dir: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        project_dir.join(path)
    }
}
