//! taskseed CLI
//!
//! Command-line interface for materializing recurring rules into tasks.

mod args;
mod cli;
mod renderer;
mod sink;

use anyhow::Result;
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use env_logger::Env;
use log::debug;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    let Args {
        verbose,
        no_color,
        sync,
        command,
    } = Args::parse();

    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let cli = Cli::new(TerminalRenderer::new(!no_color));

    debug!("taskseed {} started", env!("CARGO_PKG_VERSION"));

    match command {
        Some(Sync(args)) => cli.sync(args).await,
        Some(Doctor(args)) => cli.doctor(args).await,
        Some(Tasks { command }) => cli.tasks(command).await,
        None => cli.sync(sync).await,
    }
}
