use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod diagnostics;
mod layout;
mod loader;
mod verse;
mod writer;

use cli::{Command, RootArgs};

fn main() -> Result<()> {
    let args = RootArgs::parse();
    init_tracing(args.verbose);

    match args.command {
        Command::Load(args) => commands::run_load(args),
        Command::Status(args) => commands::run_status(args),
        Command::Write(args) => commands::run_write(args),
        Command::Path(args) => commands::run_path(args),
        Command::Init(args) => commands::run_init(args),
    }
}

/// Diagnostics go to stderr so `load` can stream JSON on stdout.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();
}
