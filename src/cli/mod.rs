//! CLI module for Jobly
//!
//! Provides command-line interface for:
//! - serve: Connect to Postgres and serve the HTTP API
//! - migrate: Apply schema migrations
//! - token: Issue a signed token for local use

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{migrate, run, run_command, serve, token};
pub use errors::{CliError, CliErrorCode, CliResult};
