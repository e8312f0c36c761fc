//! Mission planner - map annotation and announcement board driver

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod desk;
mod session;

use cli::{Cli, Command};

/// Install the tracing subscriber
///
/// Logs go to stderr so command output on stdout stays clean.
fn setup_logging() {
    use tracing_subscriber::prelude::*;

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    // RUST_LOG overrides the default filter
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new("info,mission_planner=debug,annotation=info")
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .init();
}

fn main() -> Result<()> {
    setup_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::Annotate(args) => commands::annotate(&cli.config, args),
        Command::Config(command) => commands::config(&cli.config, command),
        Command::Announcements(command) => commands::announcements(&cli.config, command),
    }
}
