//! Configuration structs grouped by domain.
//!
//! Loaded from environment variables with unified fallback logic. All
//! file names are relative to the project directory unless absolute.

use super::env_keys::{matching, observability as obv_keys, paths, runtime};
use super::loader::{env_bool, env_optional, env_or};

/// Project layout: dependency manifest, virtual environment, entry script.
#[derive(Debug, Clone)]
pub struct PathsConfig {
    pub manifest: String,
    pub venv_dir: String,
    pub entry: String,
}

impl PathsConfig {
    pub fn from_env() -> Self {
        super::loader::load_dotenv();
        Self {
            manifest: env_or(paths::MATCHKIT_MANIFEST, &[], || {
                "requirements.txt".to_string()
            }),
            venv_dir: env_or(paths::MATCHKIT_VENV_DIR, &[], || "venv".to_string()),
            entry: env_or(paths::MATCHKIT_ENTRY, &[], || "main.py".to_string()),
        }
    }
}

/// Interpreter selection and execution limits.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Base interpreter used to create the virtual environment.
    /// `None` means resolve `python3` / `python` from PATH.
    pub python: Option<String>,
    /// Entry-script timeout in seconds. `None` means unlimited.
    pub timeout_secs: Option<u64>,
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        super::loader::load_dotenv();
        Self {
            python: env_optional(runtime::MATCHKIT_PYTHON, &[]),
            timeout_secs: env_optional(runtime::MATCHKIT_TIMEOUT_SECS, &[])
                .and_then(|s| s.parse::<u64>().ok()),
        }
    }

    /// CLI flags win over environment values.
    pub fn with_cli_overrides(mut self, cli_timeout: Option<u64>) -> Self {
        if let Some(timeout) = cli_timeout {
            self.timeout_secs = Some(timeout);
        }
        self
    }
}

/// Native matching engine inputs.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Candidate profiles JSON file.
    pub profiles: String,
    /// Target positions criteria config (position name -> criteria map).
    pub target_positions: String,
}

impl MatchConfig {
    pub fn from_env() -> Self {
        super::loader::load_dotenv();
        Self {
            profiles: env_or(matching::MATCHKIT_PROFILES, &[], || {
                "profiles.json".to_string()
            }),
            target_positions: env_or(matching::MATCHKIT_TARGET_POSITIONS, &[], || {
                "target_positions.json".to_string()
            }),
        }
    }
}

/// Observability: quiet, log_level, log_json.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub quiet: bool,
    pub log_level: String,
    pub log_json: bool,
}

impl ObservabilityConfig {
    pub fn from_env() -> &'static Self {
        use std::sync::OnceLock;
        static CACHE: OnceLock<ObservabilityConfig> = OnceLock::new();
        CACHE.get_or_init(|| {
            super::loader::load_dotenv();
            Self {
                quiet: env_bool(obv_keys::MATCHKIT_QUIET, &[], false),
                log_level: env_or(obv_keys::MATCHKIT_LOG_LEVEL, &[], || {
                    "matchkit=info".to_string()
                }),
                log_json: env_bool(obv_keys::MATCHKIT_LOG_JSON, &[], false),
            }
        })
    }
}
