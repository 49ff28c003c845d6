use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::filter::FilterState;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "stint",
    version,
    about = "stint: a small task list",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    pub quiet: u8,

    /// Directory holding the task and view files.
    #[arg(long = "data")]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Add a new task.
    Add {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// List tasks under the current or given filter.
    List {
        #[arg(value_parser = parse_filter_arg)]
        filter: Option<FilterState>,
    },
    /// Flip a task between active and completed.
    Toggle { id: String },
    /// Delete a task.
    Delete { id: String },
    /// Replace a task's text.
    Edit {
        id: String,
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Remove all completed tasks.
    Clear,
    /// Set the current filter without listing.
    View {
        #[arg(value_parser = parse_filter_arg)]
        filter: FilterState,
    },
    /// Show remaining and completed counts.
    Counts,
}

fn parse_filter_arg(raw: &str) -> Result<FilterState, String> {
    match raw.to_ascii_lowercase().as_str() {
        "all" => Ok(FilterState::All),
        "active" => Ok(FilterState::Active),
        "completed" => Ok(FilterState::Completed),
        other => Err(format!(
            "invalid filter: {other} (expected all, active, or completed)"
        )),
    }
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}
