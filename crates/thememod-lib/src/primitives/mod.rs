//! Shared option types and errors
//!
//! Logging and color options used by both the config layer and the logger,
//! plus the errors raised while loading configuration.

use clap::ValueEnum;
use serde::Deserialize;
use std::str::FromStr;
use thiserror::Error;

/// Stream the logger writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    Stderr,
    Stdout,
}

/// Log verbosity, ordered from quietest to loudest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum LogLevel {
    #[value(alias = "err", alias = "fatal")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warning,
    #[value(alias = "information")]
    Info,
    Debug,
    #[value(alias = "verbose")]
    Trace,
}

/// Layout of log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[value(alias = "txt", alias = "plain")]
    Text,
    Json,
    /// Multi-line human layout
    #[value(alias = "yml")]
    Yaml,
}

/// Whether styled output is wanted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorIntent {
    /// Decide from the attached terminal
    Auto,
    #[value(alias = "yes", alias = "force")]
    Always,
    #[value(alias = "no", alias = "none")]
    Never,
}

impl ColorIntent {
    pub fn enabled(&self) -> bool {
        match self {
            ColorIntent::Always => true,
            ColorIntent::Never => false,
            ColorIntent::Auto => console::Term::stderr().features().colors_supported(),
        }
    }
}

impl From<u8> for LogLevel {
    /// Numeric verbosity as used by `--log-level`; anything above 4 is trace
    fn from(verbosity: u8) -> Self {
        match verbosity {
            0 => LogLevel::Error,
            1 => LogLevel::Warning,
            2 => LogLevel::Info,
            3 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }
}

impl LogLevel {
    /// Directive string understood by `EnvFilter`
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warning => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Parse any of a value's names or aliases, ignoring case
fn parse_value<T: ValueEnum>(input: &str, what: &str) -> Result<T, ConfigError> {
    T::from_str(input.trim(), true).map_err(|_| ConfigError::ParseError {
        value: input.to_string(),
        reason: format!("invalid {}", what),
    })
}

impl FromStr for LogLevel {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_value(s, "log level")
    }
}

impl FromStr for LogFormat {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_value(s, "log format")
    }
}

impl FromStr for LogOutput {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_value(s, "log output stream")
    }
}

impl FromStr for ColorIntent {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_value(s, "color intent")
    }
}

/// Logger settings derived from [`crate::AppConfig`]
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    pub output: LogOutput,
    pub color: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load environment file '{file}': {source}")]
    EnvFileError {
        file: String,
        source: dotenvy::Error,
    },

    #[error("Global configuration already initialized")]
    AlreadyInitialized,

    #[error("Invalid working directory: {path}")]
    InvalidWorkDir { path: String },

    #[error("Failed to parse environment variables: {source}")]
    EnvironmentParsingFailed {
        #[from]
        source: envy::Error,
    },

    #[error("Failed to get current directory: {source}")]
    CurrentDirError {
        #[from]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration value '{value}': {reason}")]
    ParseError { value: String, reason: String },
}

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Failed to initialize tracing subscriber: {reason}")]
    InitializationFailed { reason: String },

    #[error("Logger already initialized")]
    AlreadyInitialized,
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
