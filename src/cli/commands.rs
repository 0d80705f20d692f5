//! CLI command implementations

use std::path::Path;

use serde_json::json;

use super::args::Command;
use super::config::{Config, StoreKind};
use super::errors::{CliError, CliResult};
use super::io::write_response;
use crate::http_server::HttpServer;
use crate::observability::Logger;
use crate::service::CatService;

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Serve { config, port } => serve(&config, port),
    }
}

/// Create the SQLite database file and its table.
///
/// Safe to run against an existing database.
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    Logger::set_min_severity(config.severity()?);

    if config.store != StoreKind::Sqlite {
        return Err(CliError::config_error(
            "init only applies to the 'sqlite' store",
        ));
    }

    config.open_repository()?;
    let database_path = config.database_path.clone().unwrap_or_default();
    Logger::info("STORE_OPENED", &[("path", database_path.as_str())]);

    write_response(json!({
        "initialized": true,
        "database_path": database_path,
    }))
}

/// Open the store and serve HTTP until the process is stopped.
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let mut config = Config::load(config_path)?;
    Logger::set_min_severity(config.severity()?);

    if let Some(port) = port {
        config.http.port = port;
    }

    let repository = config.open_repository()?;
    let store = match config.store {
        StoreKind::Sqlite => config.database_path.clone().unwrap_or_default(),
        StoreKind::Memory => "memory".to_string(),
    };
    Logger::info("STORE_OPENED", &[("path", store.as_str())]);

    let server = HttpServer::with_config(config.http.clone(), CatService::new(repository));

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}
