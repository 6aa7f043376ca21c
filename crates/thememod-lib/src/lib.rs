//! # thememod Library
//!
//! Theme component resolution for static sites: collects the import graph of
//! theme components, vendors module-backed components into `_vendor` and
//! keeps go.mod/go.sum in step with what is actually imported.
//!
//! ## Core Modules
//!
//! - [`primitives`] - Foundation types, errors, and shared coordination
//! - [`logger`] - Structured logging with progress tracking
//! - [`modules`] - Component collection, vendoring, tidy and graph
//! - [`display`] - User-facing output behind testable providers
//! - [`application`] - CLI interface, configuration and sessions
//!
//! ## Quick Start
//!
//! ```no_run
//! thememod_lib::main().unwrap();
//! ```

pub mod application;
pub mod display;
pub mod logger;
pub mod modules;
pub mod primitives;
pub mod testing;

// Re-export commonly used types for convenience
pub use application::{AppConfig, Cli, Commands, execute_command};
pub use logger::Logger;
pub use modules::{ClientSettings, CollectError, Component, ModuleClient, ModulesConfig};
pub use primitives::{ColorIntent, ConfigError, LogFormat, LogLevel, LogOutput, LoggerError};

// Private imports for the main function
use anyhow::Result;

pub fn main() -> Result<()> {
    // defaults -> .env -> env vars -> CLI
    let config = application::load_cli_config()?;

    execute_command(config)
}
