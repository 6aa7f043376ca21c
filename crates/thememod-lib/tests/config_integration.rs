use clap::Parser;
use thememod_lib::application::Cli;
use thememod_lib::application::config::AppConfig;
use thememod_lib::application::env::EnvironmentConfig;
use thememod_lib::primitives::{ColorIntent, ConfigError, LogFormat};
use thememod_lib::testing::TempDirFixture;

fn quiet_env() -> EnvironmentConfig {
    EnvironmentConfig {
        no_color: None,
        force_color: None,
        clicolor: None,
        ci: None,
    }
}

#[test]
fn test_config_default_creation() {
    let config = AppConfig::default();

    assert!(config.log_level <= 4);
    assert_eq!(config.mod_proxy, "direct");
    assert_eq!(config.color, ColorIntent::Auto);
    assert!(config.imports.is_empty());
}

#[test]
fn test_cli_values_survive_resolution() {
    let fixture = TempDirFixture::new().unwrap();
    let workdir = fixture.path().to_str().unwrap().to_string();

    let cli = Cli::try_parse_from([
        "thememod",
        "--workdir",
        workdir.as_str(),
        "--log-format",
        "json",
        "--mod-proxy",
        "https://proxy.golang.org",
        "collect",
    ])
    .unwrap();

    let config = AppConfig::resolve(cli.config, quiet_env()).unwrap();

    assert_eq!(config.workdir.as_deref(), Some(fixture.path()));
    assert_eq!(config.log_format, LogFormat::Json);
    assert_eq!(config.mod_proxy, "https://proxy.golang.org");
}

#[test]
fn test_relative_workdir_that_does_not_exist_is_rejected() {
    let cli = AppConfig {
        workdir: Some("definitely/not/here".into()),
        ..AppConfig::default()
    };

    let result = AppConfig::resolve(cli, quiet_env());

    assert!(matches!(result, Err(ConfigError::InvalidWorkDir { .. })));
}

#[test]
fn test_logger_config_follows_app_config() {
    let config = AppConfig {
        log_level: 3,
        color: ColorIntent::Never,
        ..AppConfig::default()
    };

    let logger_config = config.to_logger_config();

    assert_eq!(logger_config.level, thememod_lib::LogLevel::Debug);
    assert!(!logger_config.color);
}
