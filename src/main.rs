//! Rocket Catalog CLI
//!
//! Usage: rocket-catalog <COMMAND>
//!
//! Commands:
//!   tools   List the available operations
//!   call    Run one operation and print its JSON result
//!   serve   Answer line-delimited JSON requests on stdin
//!   doctor  Show the resolved configuration and check the catalogs

mod cli;
mod commands;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use rocket_catalog::Config;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::Session;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, warnings) =
        Config::load_or_default(cli.config.as_deref()).context("failed to load configuration")?;
    init_tracing(cli.verbose, &config.log.level);
    commands::report_config_warnings(&warnings);

    let session = Session::open(config, cli.data_root.as_deref());

    match cli.command {
        Commands::Tools => commands::tools::cmd_tools(cli.json),
        Commands::Call { tool, args } => {
            commands::call::cmd_call(&session.store, &tool, args.as_deref(), cli.json)
        }
        Commands::Serve => commands::serve::cmd_serve(&session.store),
        Commands::Doctor => commands::doctor::cmd_doctor(&session, cli.json),
    }
}

/// Logs go to stderr; `RUST_LOG` wins over `-v` and the configured level.
fn init_tracing(verbose: u8, configured: &str) {
    let level = match verbose {
        0 => configured,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}
