use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Rocket Catalog - manage domains, solutions and entity schemas
#[derive(Parser, Debug)]
#[command(name = "rocket-catalog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to $MCP_CATALOG_CONFIG, then ./catalog.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding domains.json, solutions.json and the schema folders
    #[arg(long, global = true)]
    pub data_root: Option<PathBuf>,

    /// Compact machine-readable output
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the available operations
    Tools,

    /// Run one operation and print its JSON result
    Call {
        /// Operation name, e.g. list-domains
        tool: String,

        /// Arguments as a JSON object
        #[arg(long)]
        args: Option<String>,
    },

    /// Answer line-delimited JSON requests on stdin
    Serve,

    /// Show the resolved configuration and check the catalogs
    Doctor,
}
