//! Configuration file
//!
//! ```json
//! {
//!   "database_path": "./cattery.db",
//!   "store": "sqlite",
//!   "log_level": "INFO",
//!   "http": { "host": "0.0.0.0", "port": 8080 }
//! }
//! ```

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::http_server::HttpServerConfig;
use crate::observability::Severity;
use crate::repository::{CatRepository, InMemoryCatRepository, SqliteCatRepository};

/// Backing store selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// SQLite file at `database_path`
    #[default]
    Sqlite,
    /// Volatile, lost on exit
    Memory,
}

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database file (required for the sqlite store)
    #[serde(default)]
    pub database_path: Option<String>,

    /// Store kind (optional, default "sqlite")
    #[serde(default)]
    pub store: StoreKind,

    /// Minimum log severity (optional, default "INFO")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// HTTP server section (optional)
    #[serde(default)]
    pub http: HttpServerConfig,
}

fn default_log_level() -> String {
    "INFO".to_string()
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;
        Self::from_json(&content)
    }

    /// Parse and validate a configuration document
    pub fn from_json(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        self.severity()?;

        if self.store == StoreKind::Sqlite {
            match self.database_path.as_deref() {
                None => {
                    return Err(CliError::config_error(
                        "database_path is required when store is 'sqlite'",
                    ))
                }
                Some(path) if path.trim().is_empty() => {
                    return Err(CliError::config_error("database_path must not be empty"))
                }
                Some(_) => {}
            }
        }

        self.http.validate().map_err(CliError::config_error)?;

        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level.parse().map_err(CliError::config_error)
    }

    /// Open the configured store
    pub fn open_repository(&self) -> CliResult<Arc<dyn CatRepository>> {
        match self.store {
            StoreKind::Memory => Ok(Arc::new(InMemoryCatRepository::new())),
            StoreKind::Sqlite => {
                let path = self.database_path.as_deref().ok_or_else(|| {
                    CliError::config_error("database_path is required when store is 'sqlite'")
                })?;
                Ok(Arc::new(SqliteCatRepository::open(path)?))
            }
        }
    }
}
