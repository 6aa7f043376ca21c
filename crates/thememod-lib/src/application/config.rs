//! Application configuration management
//!
//! Handles config loading, validation, and environment variable processing
//! following the precedence: defaults -> .env -> env vars -> CLI args.

use crate::primitives::*;
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;

/// Default configuration values
pub mod defaults {
    pub const LOG_LEVEL: &str = "0"; // Error-only logging by default
    pub const LOG_FORMAT: &str = "text";
    pub const LOG_OUTPUT: &str = "stderr";
    pub const COLOR: &str = "auto";
    pub const THEMES_DIR: &str = "themes";
    pub const MOD_PROXY: &str = "direct";
}

/// Default value functions for configuration fields
mod default_fns {
    use super::defaults;
    use crate::primitives::{ColorIntent, LogFormat, LogOutput};
    use std::path::PathBuf;

    pub fn log_level() -> u8 {
        0
    }

    pub fn log_format() -> LogFormat {
        LogFormat::Text
    }

    pub fn log_output() -> LogOutput {
        LogOutput::Stderr
    }

    pub fn color() -> ColorIntent {
        ColorIntent::Auto
    }

    pub fn themes_dir() -> PathBuf {
        PathBuf::from(defaults::THEMES_DIR)
    }

    pub fn mod_proxy() -> String {
        defaults::MOD_PROXY.to_string()
    }
}

/// Application configuration structure
#[derive(Debug, Clone, Parser, Deserialize)]
pub struct AppConfig {
    /// Project directory (defaults to the current directory)
    #[arg(short, long, env = "THEMEMOD_WORKDIR")]
    #[serde(default)]
    pub workdir: Option<PathBuf>,

    /// Folder holding local themes, relative to the project directory
    #[arg(long, env = "THEMEMOD_THEMES_DIR", default_value = defaults::THEMES_DIR)]
    #[serde(default = "default_fns::themes_dir")]
    pub themes_dir: PathBuf,

    /// Top-level imports; read from the project config when empty
    #[arg(short, long = "import", env = "THEMEMOD_IMPORTS", value_delimiter = ',')]
    #[serde(default)]
    pub imports: Vec<String>,

    /// GOPROXY used for every go invocation
    #[arg(long, env = "THEMEMOD_MODPROXY", default_value = defaults::MOD_PROXY)]
    #[serde(default = "default_fns::mod_proxy")]
    pub mod_proxy: String,

    /// Ignore _vendor snapshots while collecting
    #[arg(long, env = "THEMEMOD_IGNORE_VENDOR")]
    #[serde(default)]
    pub ignore_vendor: bool,

    /// Verbosity level (0=error, 1=warn, 2=info, 3=debug, 4=trace)
    #[arg(long, env = "THEMEMOD_LOG_LEVEL", default_value = defaults::LOG_LEVEL)]
    #[serde(default = "default_fns::log_level")]
    pub log_level: u8,

    /// Output format (text, json, yaml)
    #[arg(long, env = "THEMEMOD_LOG_FORMAT", default_value = defaults::LOG_FORMAT)]
    #[serde(default = "default_fns::log_format")]
    pub log_format: LogFormat,

    /// Log output stream (stderr, stdout)
    #[arg(long, env = "THEMEMOD_LOG_OUTPUT", default_value = defaults::LOG_OUTPUT)]
    #[serde(default = "default_fns::log_output")]
    pub log_output: LogOutput,

    /// Color output control (auto, always, never)
    #[arg(short, long, env = "THEMEMOD_COLOR", default_value = defaults::COLOR)]
    #[serde(default = "default_fns::color")]
    pub color: ColorIntent,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workdir: None,
            themes_dir: default_fns::themes_dir(),
            imports: Vec::new(),
            mod_proxy: default_fns::mod_proxy(),
            ignore_vendor: false,
            log_level: default_fns::log_level(),
            log_format: default_fns::log_format(),
            log_output: default_fns::log_output(),
            color: default_fns::color(),
        }
    }
}

impl AppConfig {
    /// Create LoggerConfig from AppConfig
    pub fn to_logger_config(&self) -> LoggerConfig {
        LoggerConfig {
            level: LogLevel::from(self.log_level),
            format: self.log_format,
            output: self.log_output,
            color: self.color.enabled(),
        }
    }

    /// Merge this config with another, taking non-default values from other
    pub fn merge_with(mut self, other: Self) -> Self {
        if other.workdir.is_some() {
            self.workdir = other.workdir;
        }
        if !other.imports.is_empty() {
            self.imports = other.imports;
        }
        if other.themes_dir != default_fns::themes_dir() {
            self.themes_dir = other.themes_dir;
        }
        if other.mod_proxy != default_fns::mod_proxy() {
            self.mod_proxy = other.mod_proxy;
        }
        if other.ignore_vendor {
            self.ignore_vendor = true;
        }
        if other.log_level != default_fns::log_level() {
            self.log_level = other.log_level;
        }

        // For enums, detect if it's non-default
        if !matches!(other.log_format, LogFormat::Text) {
            self.log_format = other.log_format;
        }
        if !matches!(other.log_output, LogOutput::Stderr) {
            self.log_output = other.log_output;
        }
        if !matches!(other.color, ColorIntent::Auto) {
            self.color = other.color;
        }

        self
    }

    /// Validate the final configuration
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        let workdir = match self.workdir.take() {
            Some(dir) if dir.is_absolute() => dir,
            Some(dir) => std::env::current_dir()?.join(dir),
            None => std::env::current_dir()?,
        };

        if !workdir.is_dir() {
            return Err(ConfigError::InvalidWorkDir {
                path: workdir.display().to_string(),
            });
        }
        self.workdir = Some(workdir);

        if self.mod_proxy.trim().is_empty() {
            return Err(ConfigError::ParseError {
                value: self.mod_proxy.clone(),
                reason: "module proxy must not be empty".to_string(),
            });
        }

        self.imports.retain(|import| !import.trim().is_empty());
        Ok(())
    }
}
