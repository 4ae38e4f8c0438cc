//! CLI argument definitions using clap
//!
//! Commands:
//! - jobly serve --config <path> [--port <port>]
//! - jobly migrate --config <path>
//! - jobly token --config <path> --username <name> [--admin]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Jobly - companies and jobs over HTTP
#[derive(Parser, Debug)]
#[command(name = "jobly")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log at debug level unless RUST_LOG is set
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./jobly.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Apply pending schema migrations and exit
    Migrate {
        /// Path to configuration file
        #[arg(long, default_value = "./jobly.json")]
        config: PathBuf,
    },

    /// Print a signed token for a user
    Token {
        /// Path to configuration file
        #[arg(long, default_value = "./jobly.json")]
        config: PathBuf,

        #[arg(long)]
        username: String,

        /// Grant admin rights
        #[arg(long)]
        admin: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
