use super::*;
use crate::application::session_mocks::{MockFileSystemProvider, MockProcessProvider};
use crate::modules::client::ClientSettings;

const LIST: &str = "go list -m -json all";

const RESOLVED: &str = r#"{"Path": "example.com/site", "Main": true, "Dir": "/test/workdir"}
{"Path": "github.com/a/theme", "Version": "v1.2.0", "Dir": "/cache/a"}
"#;

fn module_project() -> MockFileSystemProvider {
    MockFileSystemProvider::new()
        .with_file("/test/workdir/go.mod", "module example.com/site\n")
        .with_file("/cache/a/theme.toml", "name = \"a\"")
        .with_file("/cache/a/layouts/index.html", "<html>")
        .with_file("/cache/a/layouts/partials/head.html", "<head>")
        .with_file("/cache/a/static/css/site.css", "body {}")
        .with_file("/cache/a/node_modules/dep/index.js", "js")
        .with_file("/cache/a/.cache/blob", "cached")
}

fn client<'a>(
    fs: &'a MockFileSystemProvider,
    process: &'a MockProcessProvider,
    imports: &[&str],
) -> ModuleClient<'a> {
    ModuleClient::new(
        fs,
        process,
        ClientSettings::new("/test/workdir").with_imports(imports.iter().copied()),
    )
}

#[test]
fn test_should_vendor_allow_list() {
    assert!(should_vendor(Path::new("layouts")));
    assert!(should_vendor(Path::new("i18n")));
    assert!(should_vendor(Path::new("layouts/partials")));
    assert!(should_vendor(Path::new("node_modules/dep")));
    assert!(!should_vendor(Path::new("node_modules")));
    assert!(!should_vendor(Path::new(".cache")));
    assert!(!should_vendor(Path::new("")));
}

#[test]
fn test_vendor_copies_allow_listed_folders_and_root_files() {
    let fs = module_project();
    let process = MockProcessProvider::new().with_success(LIST, RESOLVED);

    let report = client(&fs, &process, &["github.com/a/theme"])
        .vendor()
        .unwrap();

    assert_eq!(
        report.vendored,
        vec![("github.com/a/theme".to_string(), "v1.2.0".to_string())]
    );
    assert_eq!(
        fs.files_under("/test/workdir/_vendor/github.com/a/theme"),
        vec![
            PathBuf::from("/test/workdir/_vendor/github.com/a/theme/layouts/index.html"),
            PathBuf::from("/test/workdir/_vendor/github.com/a/theme/layouts/partials/head.html"),
            PathBuf::from("/test/workdir/_vendor/github.com/a/theme/static/css/site.css"),
            PathBuf::from("/test/workdir/_vendor/github.com/a/theme/theme.toml"),
        ]
    );
}

#[test]
fn test_vendor_writes_index_in_collection_order() {
    let fs = module_project()
        .with_file("/cache/a/config.toml", "theme = [\"github.com/b/theme\"]\n")
        .with_file("/cache/b/layouts/b.html", "b");
    let process = MockProcessProvider::new().with_success(
        LIST,
        &format!(
            "{}{}",
            RESOLVED, r#"{"Path": "github.com/b/theme", "Version": "v0.3.1", "Dir": "/cache/b"}"#
        ),
    );

    let report = client(&fs, &process, &["github.com/a/theme"])
        .vendor()
        .unwrap();

    assert_eq!(
        report.index_file,
        Some(PathBuf::from("/test/workdir/_vendor/modules.txt"))
    );
    assert_eq!(
        fs.file("/test/workdir/_vendor/modules.txt").unwrap(),
        "# github.com/a/theme v1.2.0\n# github.com/b/theme v0.3.1\n"
    );
}

#[test]
fn test_vendor_replaces_stale_snapshot() {
    let fs = module_project()
        .with_file(
            "/test/workdir/_vendor/modules.txt",
            "# github.com/a/theme v1.0.0\n",
        )
        .with_file(
            "/test/workdir/_vendor/github.com/a/theme/layouts/old.html",
            "stale",
        );
    let process = MockProcessProvider::new().with_success(LIST, RESOLVED);

    client(&fs, &process, &["github.com/a/theme"])
        .vendor()
        .unwrap();

    assert!(
        fs.file("/test/workdir/_vendor/github.com/a/theme/layouts/old.html")
            .is_none()
    );
    assert_eq!(
        fs.file("/test/workdir/_vendor/modules.txt").unwrap(),
        "# github.com/a/theme v1.2.0\n"
    );
}

#[test]
fn test_vendor_skips_local_components() {
    let fs = module_project().with_file("/test/workdir/themes/local/layouts/x.html", "x");
    let process = MockProcessProvider::new().with_success(LIST, RESOLVED);

    let report = client(&fs, &process, &["local"]).vendor().unwrap();

    assert!(report.vendored.is_empty());
    assert_eq!(report.index_file, None);
    assert!(fs.file("/test/workdir/_vendor/modules.txt").is_none());
}

#[test]
fn test_vendor_requires_main_module() {
    let fs = module_project();
    let process = MockProcessProvider::new().with_success(
        LIST,
        r#"{"Path": "github.com/a/theme", "Version": "v1.2.0", "Dir": "/cache/a"}"#,
    );

    let err = client(&fs, &process, &["github.com/a/theme"])
        .vendor()
        .unwrap_err();

    assert!(matches!(err, VendorError::MainModuleNotFound));
}

#[test]
fn test_vendor_without_manifest_has_no_main_module() {
    let fs = MockFileSystemProvider::new().with_directory("/test/workdir/themes/a");
    let process = MockProcessProvider::new();

    let err = client(&fs, &process, &["a"]).vendor().unwrap_err();

    assert!(matches!(err, VendorError::MainModuleNotFound));
    assert!(process.get_calls().is_empty());
}

#[test]
fn test_vendor_copy_failure_aborts() {
    let fs = MockFileSystemProvider::new()
        .with_file("/test/workdir/go.mod", "module example.com/site\n")
        .with_file("/cache/a", "not a directory");
    let process = MockProcessProvider::new().with_success(LIST, RESOLVED);

    let err = client(&fs, &process, &["github.com/a/theme"])
        .vendor()
        .unwrap_err();

    assert!(matches!(err, VendorError::SnapshotWrite { .. }));
    assert!(fs.file("/test/workdir/_vendor/modules.txt").is_none());
}
