//! Environment variable key constants, grouped by domain.
//!
//! All keys use the `MATCHKIT_*` prefix. CLI flags take precedence over
//! these; these take precedence over built-in defaults.

/// Project layout: manifest, virtual environment, entry script.
pub mod paths {
    pub const MATCHKIT_MANIFEST: &str = "MATCHKIT_MANIFEST";
    pub const MATCHKIT_VENV_DIR: &str = "MATCHKIT_VENV_DIR";
    pub const MATCHKIT_ENTRY: &str = "MATCHKIT_ENTRY";
}

/// Interpreter and execution limits.
pub mod runtime {
    pub const MATCHKIT_PYTHON: &str = "MATCHKIT_PYTHON";
    pub const MATCHKIT_TIMEOUT_SECS: &str = "MATCHKIT_TIMEOUT_SECS";
}

/// Native matching engine inputs.
pub mod matching {
    pub const MATCHKIT_PROFILES: &str = "MATCHKIT_PROFILES";
    pub const MATCHKIT_TARGET_POSITIONS: &str = "MATCHKIT_TARGET_POSITIONS";
}

/// Observability and logging.
pub mod observability {
    pub const MATCHKIT_QUIET: &str = "MATCHKIT_QUIET";
    pub const MATCHKIT_LOG_LEVEL: &str = "MATCHKIT_LOG_LEVEL";
    pub const MATCHKIT_LOG_JSON: &str = "MATCHKIT_LOG_JSON";
}
