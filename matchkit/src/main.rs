mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use matchkit_runtime::runner::DEFAULT_FILTER;

fn main() -> Result<()> {
    matchkit_core::observability::init_tracing();
    let cli = Cli::parse();
    let project = cli.project;

    match cli.command.unwrap_or(Commands::All) {
        Commands::All => {
            commands::bootstrap::ensure(&project)?;
            let code = commands::run::run(&project, DEFAULT_FILTER.to_string(), None, None)?;
            exit_with(code);
        }
        Commands::Venv => {
            commands::bootstrap::ensure(&project)?;
        }
        Commands::Run {
            filter,
            input,
            timeout,
        } => {
            let code = commands::run::run(&project, filter, input, timeout)?;
            exit_with(code);
        }
        Commands::Clean { dry_run } => {
            commands::clean::clean(&project, dry_run)?;
        }
        Commands::CleanAll { dry_run, force } => {
            commands::clean::clean_all(&project, dry_run, force)?;
        }
        Commands::Match { filter, input } => {
            commands::matching::run_match(&project, &filter, input)?;
        }
    }

    Ok(())
}

/// Propagate a child exit status as our own (task sequencing stops on the
/// first non-zero status, like any build tool).
fn exit_with(code: i32) {
    if code != 0 {
        std::process::exit(code);
    }
}
