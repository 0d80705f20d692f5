//! CLI module for cattery
//!
//! Provides command-line interface for:
//! - init: Create the database file and table
//! - serve: Start the HTTP server

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{init, run, run_command, serve};
pub use config::{Config, StoreKind};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::write_response;
