//! CLI command implementations
//!
//! Each command loads the configuration file first; `serve` and `migrate`
//! run on a fresh tokio runtime.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use crate::auth::JwtManager;
use crate::config::Config;
use crate::http_server::{AppState, HttpServer};
use crate::store::PgStore;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(&config, port),
        Command::Migrate { config } => migrate(&config),
        Command::Token {
            config,
            username,
            admin,
        } => {
            let token = token(&config, &username, admin)?;
            println!("{}", token);
            Ok(())
        }
    }
}

/// `RUST_LOG` wins over `--verbose`
fn init_logging(verbose: bool) {
    let default = if verbose { "jobly=debug,tower_http=debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn block_on<F: Future<Output = CliResult<()>>>(future: F) -> CliResult<()> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;
    rt.block_on(future)
}

/// Connect to Postgres and serve the HTTP API
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let config = Config::load(config_path)?;
    config.auth.require_custom_secret()?;

    let mut http_config = config.http.clone();
    if let Some(port) = port {
        http_config.port = port;
    }

    block_on(async move {
        let store = PgStore::connect(&config.database_url, config.max_connections).await?;
        tracing::info!(max_connections = config.max_connections, "connected to database");

        let state = Arc::new(AppState::new(
            Arc::new(store),
            JwtManager::new(config.auth.jwt_config()),
        ));

        HttpServer::new(http_config, state)
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Apply the embedded migrations
pub fn migrate(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;

    block_on(async move {
        let store = PgStore::connect(&config.database_url, config.max_connections).await?;
        store.migrate().await?;
        tracing::info!("migrations applied");
        Ok::<_, CliError>(())
    })
}

/// Sign a token with the configured secret
///
/// Does not need a database URL.
pub fn token(config_path: &Path, username: &str, admin: bool) -> CliResult<String> {
    if username.trim().is_empty() {
        return Err(CliError::token_error("username can not be empty"));
    }

    let config = Config::resolve(config_path)?;
    let jwt = JwtManager::new(config.auth.jwt_config());
    Ok(jwt.generate_token(username, admin)?)
}
