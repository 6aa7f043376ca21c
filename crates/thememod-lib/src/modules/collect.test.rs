use super::*;
use crate::application::session_mocks::{MockFileSystemProvider, MockProcessProvider};
use crate::modules::client::ClientSettings;

const LIST: &str = "go list -m -json all";
const WORKDIR: &str = "/test/workdir";

fn client<'a>(
    fs: &'a MockFileSystemProvider,
    process: &'a MockProcessProvider,
    imports: &[&str],
) -> ModuleClient<'a> {
    ModuleClient::new(
        fs,
        process,
        ClientSettings::new(WORKDIR).with_imports(imports.iter().copied()),
    )
}

fn paths(config: &ModulesConfig) -> Vec<&str> {
    config.modules.iter().map(|c| c.import_path.as_str()).collect()
}

fn module_json(path: &str, version: &str, dir: &str) -> String {
    format!(
        r#"{{"Path": "{}", "Version": "{}", "Dir": "{}"}}"#,
        path, version, dir
    )
}

#[test]
fn test_no_imports_yields_empty_result_without_toolchain() {
    let fs = MockFileSystemProvider::new();
    let process = MockProcessProvider::new();

    let result = client(&fs, &process, &[]).collect().unwrap();

    assert!(result.modules.is_empty());
    assert!(result.manifest_file.is_none());
    assert!(process.get_calls().is_empty());
}

#[test]
fn test_local_component_imports_are_collected_in_preorder() {
    let fs = MockFileSystemProvider::new()
        .with_file(
            "/test/workdir/themes/a/config.toml",
            "theme = [\"b\", \"a\"]\n",
        )
        .with_directory("/test/workdir/themes/b");
    let process = MockProcessProvider::new();

    let result = client(&fs, &process, &["a"]).collect().unwrap();

    assert_eq!(paths(&result), vec!["a", "b"]);
    assert_eq!(result.modules[0].dir, "/test/workdir/themes/a/");
    assert_eq!(result.modules[0].owner, None);
    assert_eq!(result.modules[1].owner.as_deref(), Some("a"));
    assert!(!result.modules[0].is_package());
    // No go.mod: the toolchain is never consulted
    assert!(process.get_calls().is_empty());
}

#[test]
fn test_depth_first_order_across_siblings() {
    let fs = MockFileSystemProvider::new()
        .with_file("/test/workdir/themes/a/config.yaml", "theme: [c]\n")
        .with_directory("/test/workdir/themes/b")
        .with_directory("/test/workdir/themes/c");
    let process = MockProcessProvider::new();

    let result = client(&fs, &process, &["a", "b"]).collect().unwrap();

    assert_eq!(paths(&result), vec!["a", "c", "b"]);
}

#[test]
fn test_cycles_terminate() {
    let fs = MockFileSystemProvider::new()
        .with_file("/test/workdir/themes/a/config.toml", "theme = \"b\"\n")
        .with_file("/test/workdir/themes/b/config.json", r#"{"theme": ["a"]}"#);
    let process = MockProcessProvider::new();

    let result = client(&fs, &process, &["a"]).collect().unwrap();

    assert_eq!(paths(&result), vec!["a", "b"]);
}

#[test]
fn test_duplicate_imports_differing_in_case_are_collected_once() {
    let fs = MockFileSystemProvider::new().with_directory("/test/workdir/themes/Theme");
    let process = MockProcessProvider::new();

    let result = client(&fs, &process, &["Theme", "theme", "THEME"])
        .collect()
        .unwrap();

    assert_eq!(paths(&result), vec!["Theme"]);
}

#[test]
fn test_collection_is_deterministic() {
    let fs = MockFileSystemProvider::new()
        .with_file("/test/workdir/themes/a/config.toml", "theme = [\"c\", \"b\"]\n")
        .with_file("/test/workdir/themes/b/config.toml", "theme = [\"d\"]\n")
        .with_directory("/test/workdir/themes/c")
        .with_directory("/test/workdir/themes/d");
    let process = MockProcessProvider::new();
    let client = client(&fs, &process, &["a"]);

    let first = client.collect().unwrap();
    let second = client.collect().unwrap();

    assert_eq!(paths(&first), vec!["a", "c", "b", "d"]);
    assert_eq!(first.modules, second.modules);
}

#[test]
fn test_resolved_module_backs_component() {
    let fs = MockFileSystemProvider::new()
        .with_file("/test/workdir/go.mod", "module example.com/site\n")
        .with_directory("/cache/github.com/a/theme@v1.0.0");
    let process = MockProcessProvider::new().with_success(
        LIST,
        &module_json(
            "github.com/a/theme",
            "v1.0.0",
            "/cache/github.com/a/theme@v1.0.0",
        ),
    );

    let result = client(&fs, &process, &["github.com/a/theme"])
        .collect()
        .unwrap();

    let component = &result.modules[0];
    assert!(component.is_package());
    assert!(!component.vendored);
    assert_eq!(component.version(), "v1.0.0");
    assert_eq!(component.dir, "/cache/github.com/a/theme@v1.0.0/");
    assert_eq!(
        result.manifest_file,
        Some(PathBuf::from("/test/workdir/go.mod"))
    );
    assert_eq!(result.packages().count(), 1);
}

#[test]
fn test_resolved_lookup_ignores_case() {
    let fs = MockFileSystemProvider::new()
        .with_file("/test/workdir/go.mod", "module example.com/site\n")
        .with_directory("/cache/a");
    let process = MockProcessProvider::new()
        .with_success(LIST, &module_json("github.com/A/Theme", "v1.0.0", "/cache/a"));

    let result = client(&fs, &process, &["github.com/a/theme"])
        .collect()
        .unwrap();

    assert_eq!(result.modules[0].path(), "github.com/A/Theme");
    assert_eq!(result.modules[0].import_path, "github.com/a/theme");
}

#[test]
fn test_owner_is_declared_import_path_of_module_parent() {
    let fs = MockFileSystemProvider::new()
        .with_file("/test/workdir/go.mod", "module example.com/site\n")
        .with_file("/cache/a/config.toml", "theme = \"b\"\n")
        .with_directory("/test/workdir/themes/b");
    let process = MockProcessProvider::new()
        .with_success(LIST, &module_json("github.com/A/Theme", "v1.0.0", "/cache/a"));

    let result = client(&fs, &process, &["github.com/a/theme"])
        .collect()
        .unwrap();

    assert_eq!(paths(&result), vec!["github.com/a/theme", "b"]);
    assert_eq!(result.modules[1].owner.as_deref(), Some("github.com/a/theme"));
}

#[test]
fn test_missing_module_is_fetched_on_demand() {
    let fs = MockFileSystemProvider::new()
        .with_file("/test/workdir/go.mod", "module example.com/site\n")
        .with_directory("/cache/b");
    let process = MockProcessProvider::new()
        .with_success(LIST, "")
        .with_success(LIST, &module_json("github.com/b/theme", "v2.0.0", "/cache/b"));

    let result = client(&fs, &process, &["github.com/b/theme"])
        .collect()
        .unwrap();

    assert_eq!(result.modules[0].version(), "v2.0.0");
    assert_eq!(
        process.get_call_lines(),
        vec![
            "go mod download",
            LIST,
            "go get github.com/b/theme",
            "go mod download",
            LIST,
        ]
    );
}

#[test]
fn test_paths_without_slash_are_never_fetched() {
    let fs = MockFileSystemProvider::new()
        .with_file("/test/workdir/go.mod", "module example.com/site\n")
        .with_directory("/test/workdir/themes/plain");
    let process = MockProcessProvider::new();

    let result = client(&fs, &process, &["plain"]).collect().unwrap();

    assert_eq!(result.modules[0].dir, "/test/workdir/themes/plain/");
    assert!(!process.verify_call("go get plain"));
}

#[test]
fn test_snapshot_takes_precedence_over_resolved_module() {
    let fs = MockFileSystemProvider::new()
        .with_file("/test/workdir/go.mod", "module example.com/site\n")
        .with_file(
            "/test/workdir/_vendor/modules.txt",
            "# github.com/a/theme v1.0.0\n",
        )
        .with_directory("/test/workdir/_vendor/github.com/a/theme")
        .with_directory("/cache/a");
    let process = MockProcessProvider::new()
        .with_success(LIST, &module_json("github.com/a/theme", "v1.1.0", "/cache/a"));
    let client = client(&fs, &process, &["github.com/a/theme"]);

    let vendored = client.collect().unwrap();
    let component = &vendored.modules[0];
    assert!(component.vendored);
    assert!(!component.is_package());
    assert_eq!(component.dir, "/test/workdir/_vendor/github.com/a/theme/");
    assert!(component.replacement().is_none());

    let live = client.collect_with(false).unwrap();
    assert!(!live.modules[0].vendored);
    assert_eq!(live.modules[0].dir, "/cache/a/");
}

#[test]
fn test_nested_imports_use_the_importers_snapshot() {
    let fs = MockFileSystemProvider::new()
        .with_file("/test/workdir/themes/a/config.toml", "theme = [\"b\"]\n")
        .with_file("/test/workdir/themes/a/_vendor/modules.txt", "# b v0.1.0\n")
        .with_directory("/test/workdir/themes/a/_vendor/b");
    let process = MockProcessProvider::new();

    let result = client(&fs, &process, &["a"]).collect().unwrap();

    assert_eq!(result.modules[1].dir, "/test/workdir/themes/a/_vendor/b/");
    assert!(result.modules[1].vendored);
}

#[test]
fn test_missing_local_component_reports_themes_dir() {
    let fs = MockFileSystemProvider::new();
    let process = MockProcessProvider::new();

    let err = client(&fs, &process, &["ghost"]).collect().unwrap_err();

    match &err {
        CollectError::ComponentNotFound { path, hint, .. } => {
            assert_eq!(path, "ghost");
            assert_eq!(*hint, None);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    let message = err.to_string();
    assert!(message.contains("\"ghost\" not found"));
    assert!(message.contains("/test/workdir/themes"));
}

#[test]
fn test_not_found_hint_when_go_is_missing() {
    let fs = MockFileSystemProvider::new()
        .with_file("/test/workdir/go.mod", "module example.com/site\n");
    let process = MockProcessProvider::new().with_missing_command("go");

    let err = client(&fs, &process, &["github.com/a/theme"])
        .collect()
        .unwrap_err();

    assert!(matches!(
        err,
        CollectError::ComponentNotFound {
            hint: Some(NotFoundHint::ToolchainMissing),
            ..
        }
    ));
    assert!(err.to_string().contains("you need to install Go"));
}

#[test]
fn test_not_found_hint_when_go_is_too_old() {
    let fs = MockFileSystemProvider::new()
        .with_file("/test/workdir/go.mod", "module example.com/site\n");
    let process = MockProcessProvider::new()
        .with_failure("go mod download", "flag provided but not defined: -json");

    let err = client(&fs, &process, &["github.com/a/theme"])
        .collect()
        .unwrap_err();

    assert!(matches!(
        err,
        CollectError::ComponentNotFound {
            hint: Some(NotFoundHint::ToolchainTooOld),
            ..
        }
    ));
}

#[test]
fn test_resolved_dir_missing_on_disk_is_not_found() {
    let fs = MockFileSystemProvider::new()
        .with_file("/test/workdir/go.mod", "module example.com/site\n");
    let process = MockProcessProvider::new()
        .with_success(LIST, &module_json("github.com/a/theme", "v1.0.0", "/cache/gone"));

    let err = client(&fs, &process, &["github.com/a/theme"])
        .collect()
        .unwrap_err();

    assert!(matches!(err, CollectError::ComponentNotFound { .. }));
    assert!(err.to_string().contains("/cache/gone"));
}

#[test]
fn test_undecodable_component_config_aborts() {
    let fs = MockFileSystemProvider::new()
        .with_file("/test/workdir/themes/a/config.toml", "theme = [\n");
    let process = MockProcessProvider::new();

    let err = client(&fs, &process, &["a"]).collect().unwrap_err();

    match err {
        CollectError::ConfigDecode { file, .. } => {
            assert_eq!(file, PathBuf::from("/test/workdir/themes/a/config.toml"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_malformed_snapshot_index_aborts() {
    let fs = MockFileSystemProvider::new()
        .with_file("/test/workdir/_vendor/modules.txt", "# lonely\n")
        .with_directory("/test/workdir/themes/a");
    let process = MockProcessProvider::new();

    let err = client(&fs, &process, &["a"]).collect().unwrap_err();

    assert!(matches!(
        err,
        CollectError::SnapshotIndexMalformed { ref line, .. } if line == "# lonely"
    ));
}

#[test]
fn test_ignoring_snapshots_skips_malformed_index() {
    let fs = MockFileSystemProvider::new()
        .with_file("/test/workdir/_vendor/modules.txt", "# lonely\n")
        .with_directory("/test/workdir/themes/a");
    let process = MockProcessProvider::new();

    let result = client(&fs, &process, &["a"]).collect_with(false).unwrap();

    assert_eq!(paths(&result), vec!["a"]);
}

#[test]
fn test_toolchain_failure_propagates() {
    let fs = MockFileSystemProvider::new()
        .with_file("/test/workdir/go.mod", "module example.com/site\n");
    let process = MockProcessProvider::new().with_failure(LIST, "go: broken go.mod");

    let err = client(&fs, &process, &["github.com/a/theme"])
        .collect()
        .unwrap_err();

    assert!(matches!(
        err,
        CollectError::Toolchain(ToolchainError::CommandFailed { .. })
    ));
}

#[test]
fn test_component_config_file_is_recorded() {
    let fs = MockFileSystemProvider::new()
        .with_file("/test/workdir/themes/a/config.yml", "title: A\n");
    let process = MockProcessProvider::new();

    let result = client(&fs, &process, &["a"]).collect().unwrap();

    assert_eq!(
        result.modules[0].config_file(),
        Some(Path::new("/test/workdir/themes/a/config.yml"))
    );
    assert!(result.modules[0].imports().is_empty());
}
