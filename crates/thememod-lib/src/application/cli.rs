use crate::primitives::ConfigError;
use clap::{Parser, Subcommand};

use super::config::AppConfig;

/// thememod CLI - theme component manager
#[derive(Debug, Clone, Parser)]
#[command(name = "thememod")]
#[command(about = "Resolve, vendor and tidy the theme components of a site")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Global configuration options
    #[command(flatten)]
    pub config: AppConfig,

    /// thememod commands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Configuration loaded from CLI
pub struct CliConfig {
    pub app_config: AppConfig,
    pub command: Option<Commands>,
}

impl CliConfig {
    /// Load configuration from command line arguments
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self::from_cli(Cli::parse()))
    }

    pub fn from_cli(cli: Cli) -> Self {
        Self {
            app_config: cli.config,
            command: cli.command,
        }
    }
}

/// Available thememod commands
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Check that the go toolchain is available
    Requirements,

    /// Show version information
    Version,

    /// Print the resolved components in import order
    Collect,

    /// Copy module components into _vendor
    Vendor,

    /// Drop unused requirements from go.mod and go.sum
    Tidy,

    /// Print the module requirement graph
    Graph {
        /// Only show edges into collected components
        #[arg(long, help = "Restrict the graph to collected components")]
        filter: bool,
    },

    /// Turn the project into a go module
    Init {
        /// Module path
        #[arg(help = "Module path, e.g. github.com/me/site")]
        path: String,
    },
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            command: None,
        }
    }
}

#[cfg(test)]
mod tests {
    include!("cli.test.rs");
}
