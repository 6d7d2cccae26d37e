pub mod config;

use clap::{Parser, Subcommand};

use tg_domain::config::Config;
use tg_domain::error::{Error, Result};

/// ToriiGuide, a shrine-navigation backend.
#[derive(Debug, Parser)]
#[command(name = "toriiguide", version, about)]
pub struct Cli {
    /// Path to the config file.
    #[arg(long, global = true, default_value = "toriiguide.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the gateway server (default when no subcommand is given).
    Serve,
    /// Configuration utilities.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Print version information.
    Version,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Parse the config file and report any issues.
    Validate,
    /// Dump the resolved configuration (with defaults) as TOML.
    Show,
}

/// Load the config file, falling back to defaults when it does not exist.
pub fn load_config(path: &str) -> Result<Config> {
    match std::fs::read_to_string(path) {
        Ok(text) => {
            toml::from_str(&text).map_err(|e| Error::Config(format!("{path}: {e}")))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(path = %path, "config file not found, using defaults");
            Ok(Config::default())
        }
        Err(e) => Err(Error::Config(format!("{path}: {e}"))),
    }
}
