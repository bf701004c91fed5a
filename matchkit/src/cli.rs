use clap::{Parser, Subcommand};
use std::path::PathBuf;

use matchkit_runtime::runner::DEFAULT_FILTER;

/// Matchkit - candidate-matching pipeline runner
#[derive(Parser, Debug)]
#[command(name = "matchkit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Project directory the tasks operate on
    #[arg(long, global = true, default_value = ".", value_name = "DIR")]
    pub project: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Bootstrap the environment, then run the entry script (the default)
    All,

    /// Ensure the virtual environment exists with all manifest dependencies installed
    ///
    /// A no-op while the environment's sync marker is newer than the
    /// dependency manifest (requirements.txt by default).
    Venv,

    /// Run the entry script inside the bootstrapped environment
    ///
    /// Fails when the environment is missing; `run` never bootstraps
    /// implicitly.
    Run {
        /// Target position name passed to the entry script
        #[arg(long, default_value = DEFAULT_FILTER)]
        filter: String,

        /// Profiles JSON path forwarded to the entry script
        #[arg(long, value_name = "PATH")]
        input: Option<PathBuf>,

        /// Execution timeout in seconds (default: from env, otherwise unlimited)
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Delete bytecode caches (__pycache__/, *.pyc, *.pyo) under the project tree
    Clean {
        /// Dry run — show what would be removed without deleting
        #[arg(long)]
        dry_run: bool,
    },

    /// Delete bytecode caches and the whole virtual environment
    #[command(name = "clean-all")]
    CleanAll {
        /// Dry run — show what would be removed without deleting
        #[arg(long)]
        dry_run: bool,

        /// Force removal without confirmation
        #[arg(long, short)]
        force: bool,
    },

    /// Match candidate profiles against a target position, natively
    ///
    /// Reads the target positions config and the profiles JSON, chains the
    /// position's criteria into one specification, and prints a verdict per
    /// candidate. No Python environment is involved.
    Match {
        /// One of the target positions in the HR config
        #[arg(long)]
        filter: String,

        /// Path to JSON profiles (default: the configured profiles file)
        #[arg(long, value_name = "PATH")]
        input: Option<PathBuf>,
    },
}
