//! govm - install Go toolchains from the official release catalog.

use std::process;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::{Cli, Commands};

mod cli;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let installer = cli.installer()?;
    debug!(config = ?installer.config(), "configuration loaded");

    match cli.command {
        Commands::Install(args) => args.run(&installer),
        Commands::LsRemote(args) => args.run(&installer),
        Commands::CleanCache(args) => args.run(&installer),
    }
}

/// `RUST_LOG` wins; otherwise `govm=info`, or `govm=debug` with `-v`.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("govm={level}")));

    fmt().with_env_filter(filter).with_target(verbose).with_writer(std::io::stderr).init();
}
