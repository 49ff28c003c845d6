pub mod announce;
pub mod cli;
pub mod commands;
pub mod config;
pub mod filter;
pub mod persist;
pub mod store;
pub mod task;

use std::ffi::OsString;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

#[tracing::instrument(skip_all)]
pub fn run(raw_args: Vec<OsString>) -> anyhow::Result<()> {
    let cli = cli::Cli::parse_from(raw_args);

    cli::init_tracing(cli.verbose, cli.quiet)?;

    info!(verbose = cli.verbose, quiet = cli.quiet, "starting stint CLI");

    let data_dir = config::resolve_data_dir(cli.data.as_deref())
        .context("failed to resolve data directory")?;
    debug!(data_dir = %data_dir.display(), "resolved data directory");

    commands::dispatch(&data_dir, cli.command)?;

    info!("done");
    Ok(())
}
