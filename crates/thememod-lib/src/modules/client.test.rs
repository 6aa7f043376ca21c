use super::*;
use crate::application::config::AppConfig;
use crate::application::session_mocks::{
    MockCommandSession, MockFileSystemProvider, MockProcessProvider,
};

fn settings() -> ClientSettings {
    ClientSettings::new("/test/workdir")
}

#[test]
fn test_manifest_detection() {
    let process = MockProcessProvider::new();

    let plain = MockFileSystemProvider::new();
    let client = ModuleClient::new(&plain, &process, settings());
    assert!(!client.is_manifest_enabled());
    assert_eq!(client.manifest_file(), None);

    let module = MockFileSystemProvider::new().with_file("/test/workdir/go.mod", "module x\n");
    let client = ModuleClient::new(&module, &process, settings());
    assert_eq!(
        client.manifest_file(),
        Some(Path::new("/test/workdir/go.mod"))
    );
}

#[test]
fn test_themes_dir_is_joined_to_workdir() {
    let fs = MockFileSystemProvider::new();
    let process = MockProcessProvider::new();

    let client = ModuleClient::new(&fs, &process, settings());
    assert_eq!(client.themes_dir(), Path::new("/test/workdir/themes"));

    let absolute = ClientSettings {
        themes_dir: PathBuf::from("/shared/themes"),
        ..settings()
    };
    let client = ModuleClient::new(&fs, &process, absolute);
    assert_eq!(client.themes_dir(), Path::new("/shared/themes"));
}

#[test]
fn test_list_without_manifest_skips_toolchain() {
    let fs = MockFileSystemProvider::new();
    let process = MockProcessProvider::new();
    let client = ModuleClient::new(&fs, &process, settings());

    assert!(client.list().unwrap().is_empty());
    assert!(process.get_calls().is_empty());
}

#[test]
fn test_probable_module_needs_manifest_and_slash() {
    let process = MockProcessProvider::new();
    let plain = MockFileSystemProvider::new();
    let module = MockFileSystemProvider::new().with_file("/test/workdir/go.mod", "module x\n");

    let without = ModuleClient::new(&plain, &process, settings());
    assert!(!without.is_probably_module("github.com/a/theme"));

    let with = ModuleClient::new(&module, &process, settings());
    assert!(with.is_probably_module("github.com/a/theme"));
    assert!(!with.is_probably_module("mytheme"));
}

#[test]
fn test_get_propagates_failures() {
    let fs = MockFileSystemProvider::new();
    let process = MockProcessProvider::new()
        .with_failure("go get github.com/a/theme", "go: module not found");
    let client = ModuleClient::new(&fs, &process, settings());

    let err = client.get("github.com/a/theme").unwrap_err();
    assert!(err.to_string().contains("go: module not found"));
}

#[test]
fn test_init_enables_manifest_mode() {
    let fs = MockFileSystemProvider::new();
    let process = MockProcessProvider::new();
    let mut client = ModuleClient::new(&fs, &process, settings());

    client.init("example.com/site").unwrap();

    assert!(process.verify_call("go mod init example.com/site"));
    assert!(client.is_manifest_enabled());
}

#[test]
fn test_init_without_go_fails() {
    let fs = MockFileSystemProvider::new();
    let process = MockProcessProvider::new().with_missing_command("go");
    let mut client = ModuleClient::new(&fs, &process, settings());

    assert!(client.init("example.com/site").is_err());
    assert!(!client.is_manifest_enabled());
}

#[test]
fn test_from_session_reads_project_config_imports() {
    let fs = MockFileSystemProvider::new()
        .with_file("/test/workdir/config.toml", "theme = [\"a\", \"b\"]\n");
    let session = MockCommandSession::new().with_filesystem(fs);

    let client = ModuleClient::from_session(&session).unwrap();

    assert_eq!(client.imports(), ["a".to_string(), "b".to_string()]);
    assert_eq!(client.workdir(), Path::new("/test/workdir"));
}

#[test]
fn test_from_session_prefers_configured_imports() {
    let fs = MockFileSystemProvider::new()
        .with_file("/test/workdir/config.toml", "theme = [\"a\"]\n");
    let config = AppConfig {
        workdir: Some(PathBuf::from("/test/workdir")),
        imports: vec!["override".to_string()],
        ..AppConfig::default()
    };
    let session = MockCommandSession::new()
        .with_filesystem(fs)
        .with_config(config);

    let client = ModuleClient::from_session(&session).unwrap();

    assert_eq!(client.imports(), ["override".to_string()]);
}

#[test]
fn test_from_session_surfaces_bad_project_config() {
    let fs = MockFileSystemProvider::new().with_file("/test/workdir/config.json", "{");
    let session = MockCommandSession::new().with_filesystem(fs);

    assert!(ModuleClient::from_session(&session).is_err());
}
