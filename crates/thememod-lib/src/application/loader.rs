//! Configuration loading and global state management
//!
//! Coordinates loading configuration from various sources and provides
//! global application configuration access.

use crate::primitives::ConfigError;
use std::sync::OnceLock;

use super::{cli::CliConfig, config::AppConfig, env::EnvironmentConfig};

// Global configuration available throughout the application
static GLOBAL_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// `.env` files read before the environment, most specific first
pub const ENV_FILES: [&str; 2] = [".env.local", ".env"];

/// Load `.env.local` and `.env`; a missing file is fine
pub fn load_env_files() -> Result<(), ConfigError> {
    for env_file in ENV_FILES {
        match dotenvy::from_filename(env_file) {
            Ok(_) => tracing::trace!(file = env_file, "loaded environment file"),
            Err(e) if e.not_found() => {}
            Err(e) => {
                return Err(ConfigError::EnvFileError {
                    file: env_file.to_string(),
                    source: e,
                });
            }
        }
    }
    Ok(())
}

/// Load config: defaults -> .env -> env vars -> CLI
pub fn load_cli_config() -> Result<CliConfig, ConfigError> {
    load_env_files()?;
    let cli = CliConfig::load()?;
    Ok(CliConfig {
        app_config: AppConfig::resolve(cli.app_config, EnvironmentConfig::load()?)?,
        command: cli.command,
    })
}

impl AppConfig {
    /// Combine CLI values with the standard environment and validate
    pub fn resolve(cli: AppConfig, env: EnvironmentConfig) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.color = env.apply_color_config(config.color);
        config = config.merge_with(cli);
        config.validate()?;
        Ok(config)
    }

    /// Initialize global configuration (call once in main)
    pub fn init_global(config: AppConfig) -> Result<(), ConfigError> {
        GLOBAL_CONFIG
            .set(config)
            .map_err(|_| ConfigError::AlreadyInitialized)
    }

    /// Global configuration, if initialized
    pub fn global() -> Option<&'static AppConfig> {
        GLOBAL_CONFIG.get()
    }
}

#[cfg(test)]
mod tests {
    include!("loader.test.rs");
}
