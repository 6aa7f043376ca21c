use super::*;
use crate::primitives::ColorIntent;
use crate::testing::TempDirFixture;
use std::path::PathBuf;

fn no_env() -> EnvironmentConfig {
    EnvironmentConfig {
        no_color: None,
        force_color: None,
        clicolor: None,
        ci: None,
    }
}

#[test]
fn test_config_loading_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.log_level, 0);
    assert_eq!(config.themes_dir, PathBuf::from("themes"));
    assert_eq!(config.mod_proxy, "direct");
    assert!(!config.ignore_vendor);
    assert_eq!(config.color, ColorIntent::Auto);
}

#[test]
fn test_config_merging() {
    let base = AppConfig::default();
    let override_config = AppConfig {
        log_level: 4,
        color: ColorIntent::Always,
        mod_proxy: "https://proxy.golang.org".to_string(),
        imports: vec!["a".to_string()],
        ..AppConfig::default()
    };

    let merged = base.merge_with(override_config);
    assert_eq!(merged.log_level, 4);
    assert_eq!(merged.color, ColorIntent::Always);
    assert_eq!(merged.mod_proxy, "https://proxy.golang.org");
    assert_eq!(merged.imports, vec!["a"]);
    assert_eq!(merged.themes_dir, PathBuf::from("themes"));
}

#[test]
fn test_resolve_applies_environment_before_cli() {
    let fixture = TempDirFixture::new().unwrap();
    let cli = AppConfig {
        workdir: Some(fixture.path().to_path_buf()),
        ..AppConfig::default()
    };
    let env = EnvironmentConfig {
        no_color: Some("1".to_string()),
        ..no_env()
    };

    let config = AppConfig::resolve(cli, env).unwrap();
    assert_eq!(config.color, ColorIntent::Never);

    let cli = AppConfig {
        workdir: Some(fixture.path().to_path_buf()),
        color: ColorIntent::Always,
        ..AppConfig::default()
    };
    let env = EnvironmentConfig {
        no_color: Some("1".to_string()),
        ..no_env()
    };
    assert_eq!(
        AppConfig::resolve(cli, env).unwrap().color,
        ColorIntent::Always
    );
}

#[test]
fn test_validate_rejects_missing_workdir() {
    let fixture = TempDirFixture::new().unwrap();
    let mut config = AppConfig {
        workdir: Some(fixture.path().join("missing")),
        ..AppConfig::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidWorkDir { .. })
    ));
}

#[test]
fn test_validate_drops_blank_imports() {
    let fixture = TempDirFixture::new().unwrap();
    let mut config = AppConfig {
        workdir: Some(fixture.path().to_path_buf()),
        imports: vec!["a".to_string(), " ".to_string(), String::new()],
        ..AppConfig::default()
    };

    config.validate().unwrap();
    assert_eq!(config.imports, vec!["a"]);
}

#[test]
fn test_validate_rejects_empty_proxy() {
    let fixture = TempDirFixture::new().unwrap();
    let mut config = AppConfig {
        workdir: Some(fixture.path().to_path_buf()),
        mod_proxy: "  ".to_string(),
        ..AppConfig::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::ParseError { .. })
    ));
}
