use super::*;
use crate::application::session_mocks::MockFileSystemProvider;

fn config_with(data: Value) -> ComponentConfig {
    ComponentConfig {
        file: PathBuf::from("/t/config.json"),
        data,
    }
}

#[test]
fn test_imports_accepts_single_string() {
    let config = config_with(serde_json::json!({ "theme": "ananke" }));
    assert_eq!(config.imports(), vec!["ananke"]);
}

#[test]
fn test_imports_accepts_string_list_in_order() {
    let config = config_with(serde_json::json!({ "theme": ["b", "a", "c"] }));
    assert_eq!(config.imports(), vec!["b", "a", "c"]);
}

#[test]
fn test_imports_accepts_mixed_scalars() {
    let config = config_with(serde_json::json!({ "theme": ["a", 2, true, null, ""] }));
    assert_eq!(config.imports(), vec!["a", "2", "true"]);
}

#[test]
fn test_imports_key_is_case_insensitive() {
    let config = config_with(serde_json::json!({ "Theme": "x" }));
    assert_eq!(config.imports(), vec!["x"]);
}

#[test]
fn test_imports_missing_or_unusable() {
    assert!(config_with(serde_json::json!({ "title": "t" })).imports().is_empty());
    assert!(config_with(serde_json::json!({ "theme": { "a": 1 } })).imports().is_empty());
    assert!(config_with(serde_json::json!(["theme"])).imports().is_empty());
}

#[test]
fn test_load_prefers_toml_over_later_formats() {
    let fs = MockFileSystemProvider::new()
        .with_file("/t/config.toml", "theme = [\"from-toml\"]\n")
        .with_file("/t/config.json", r#"{"theme": "from-json"}"#);

    let config = ComponentConfig::load(&fs, Path::new("/t")).unwrap().unwrap();

    assert_eq!(config.file, PathBuf::from("/t/config.toml"));
    assert_eq!(config.imports(), vec!["from-toml"]);
}

#[test]
fn test_load_yaml_variants() {
    let fs = MockFileSystemProvider::new()
        .with_file("/y/config.yaml", "theme:\n  - one\n  - two\n")
        .with_file("/z/config.yml", "theme: solo\n");

    let yaml = ComponentConfig::load(&fs, Path::new("/y")).unwrap().unwrap();
    assert_eq!(yaml.imports(), vec!["one", "two"]);

    let yml = ComponentConfig::load(&fs, Path::new("/z")).unwrap().unwrap();
    assert_eq!(yml.imports(), vec!["solo"]);
}

#[test]
fn test_load_without_config_file() {
    let fs = MockFileSystemProvider::new().with_directory("/empty");
    assert!(ComponentConfig::load(&fs, Path::new("/empty")).unwrap().is_none());
}

#[test]
fn test_load_reports_decode_errors_with_file() {
    let fs = MockFileSystemProvider::new().with_file("/bad/config.toml", "theme = [unterminated");

    let err = ComponentConfig::load(&fs, Path::new("/bad")).unwrap_err();

    match err {
        ComponentConfigError::Decode { file, .. } => {
            assert_eq!(file, PathBuf::from("/bad/config.toml"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_project_imports_reads_workdir_config() {
    let fs = MockFileSystemProvider::new()
        .with_file("/site/config.toml", "title = \"My Site\"\ntheme = \"ananke\"\n");

    assert_eq!(
        project_imports(&fs, Path::new("/site")).unwrap(),
        vec!["ananke"]
    );
    assert!(project_imports(&fs, Path::new("/elsewhere")).unwrap().is_empty());
}
