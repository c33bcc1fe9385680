//! Command-line argument parsing
//!
//! Supports:
//! - Printing the windows and trees of a saved layout
//! - Checking that a saved layout would restore
//! - Showing the effective configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use dockyard::DockingConfig;

/// Inspect saved docking layouts
#[derive(Parser, Debug)]
#[command(name = "dockyard", version, about = "Inspect and check saved docking layouts")]
pub struct CliArgs {
    /// Config file to use instead of the default location
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print every window of a layout file with its tree
    Inspect {
        /// Layout file (defaults to the configured layout file)
        #[arg(value_name = "LAYOUT")]
        path: Option<PathBuf>,
    },
    /// Validate a layout file; exits non-zero if it cannot be restored
    Check {
        #[arg(value_name = "LAYOUT")]
        path: Option<PathBuf>,
    },
    /// Print the effective configuration as YAML
    Config,
}

impl CliArgs {
    pub fn load_config(&self) -> DockingConfig {
        match &self.config {
            Some(path) => DockingConfig::load_from(path),
            None => DockingConfig::load(),
        }
    }

    /// Layout file named on the command line, or the configured one
    pub fn layout_path(&self, config: &DockingConfig) -> Result<PathBuf, String> {
        let explicit = match &self.command {
            Command::Inspect { path } | Command::Check { path } => path.clone(),
            Command::Config => None,
        };
        explicit
            .or_else(|| config.layout_path())
            .ok_or_else(|| "No layout file given and none configured".to_string())
    }
}
