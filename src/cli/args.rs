//! CLI argument definitions using clap
//!
//! Commands:
//! - cattery init --config <path>
//! - cattery serve --config <path> [--port <port>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// cattery - a small REST service for cat records
#[derive(Parser, Debug)]
#[command(name = "cattery")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the database and its table
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./cattery.json")]
        config: PathBuf,
    },

    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./cattery.json")]
        config: PathBuf,

        /// Override the port from the configuration file
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_with_port() {
        let cli = Cli::try_parse_from(["cattery", "serve", "--config", "c.json", "--port", "9000"])
            .unwrap();
        match cli.command {
            Command::Serve { config, port } => {
                assert_eq!(config, PathBuf::from("c.json"));
                assert_eq!(port, Some(9000));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_init_default_config_path() {
        let cli = Cli::try_parse_from(["cattery", "init"]).unwrap();
        match cli.command {
            Command::Init { config } => assert_eq!(config, PathBuf::from("./cattery.json")),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
