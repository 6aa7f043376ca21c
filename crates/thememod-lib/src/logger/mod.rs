//! Tracing subscriber setup
//!
//! Diagnostics go through `tracing`; spans opened with [`progress_span!`]
//! are rendered as spinners by `tracing-indicatif` while the rest of the
//! output is written through the indicatif-aware writers.

use crate::primitives::*;
use std::sync::OnceLock;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Handle to the installed subscriber
#[derive(Debug)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// Install the global subscriber; fails if one is already installed
    pub fn init(config: LoggerConfig) -> Result<&'static Self, LoggerError> {
        if GLOBAL_LOGGER.get().is_some() {
            return Err(LoggerError::AlreadyInitialized);
        }

        let indicatif_layer = IndicatifLayer::new();
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter(config.level)));

        let fmt_layer = match config.output {
            LogOutput::Stderr => format_layer(indicatif_layer.get_stderr_writer(), &config),
            LogOutput::Stdout => format_layer(indicatif_layer.get_stdout_writer(), &config),
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(indicatif_layer)
            .try_init()
            .map_err(|e| LoggerError::InitializationFailed {
                reason: e.to_string(),
            })?;

        let logger = GLOBAL_LOGGER.get_or_init(|| Logger {
            level: config.level,
        });

        tracing::debug!(
            level = ?config.level,
            format = ?config.format,
            output = ?config.output,
            color = config.color,
            "logger initialized"
        );

        Ok(logger)
    }

    pub fn global() -> Option<&'static Self> {
        GLOBAL_LOGGER.get()
    }

    pub fn is_initialized() -> bool {
        GLOBAL_LOGGER.get().is_some()
    }

    /// Level the logger was initialized with
    pub fn level(&self) -> LogLevel {
        self.level
    }
}

fn format_layer<S, W>(writer: W, config: &LoggerConfig) -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a> + 'static,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer().with_writer(writer);
    match config.format {
        LogFormat::Text => layer.with_ansi(config.color).compact().boxed(),
        LogFormat::Json => layer.with_ansi(false).json().boxed(),
        LogFormat::Yaml => layer.with_ansi(config.color).pretty().boxed(),
    }
}

/// Filter used when `RUST_LOG` is not set: thememod at the configured level,
/// everything else at warn
pub fn default_filter(level: LogLevel) -> String {
    format!(
        "thememod={},thememod_lib={},warn",
        level.as_filter_str(),
        level.as_filter_str()
    )
}

/// Span rendered as a progress spinner
#[macro_export]
macro_rules! progress_span {
    ($operation:expr) => {
        tracing::info_span!("progress", operation = $operation)
    };
    ($operation:expr, total = $total:expr) => {
        tracing::info_span!("progress", operation = $operation, total = $total)
    };
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
