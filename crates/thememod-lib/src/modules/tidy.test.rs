use super::*;
use crate::application::session_mocks::{MockFileSystemProvider, MockProcessProvider};
use crate::modules::client::ClientSettings;

const LIST: &str = "go list -m -json all";

const MANIFEST: &str = "module example.com/site

go 1.12

require (
\tgithub.com/a/theme v1.2.0
\tgithub.com/old/theme v0.1.0 // indirect
)

require github.com/gone/theme v0.0.1
";

const CHECKSUMS: &str = "github.com/a/theme v1.2.0 h1:abc=
github.com/a/theme v1.2.0/go.mod h1:def=
github.com/old/theme v0.1.0 h1:ghi=
github.com/old/theme v0.1.0/go.mod h1:jkl=
";

fn active(pairs: &[&str]) -> HashSet<String> {
    pairs.iter().map(|p| p.to_string()).collect()
}

#[test]
fn test_prune_manifest_drops_inactive_requirements() {
    let pruned = prune_manifest(MANIFEST, &active(&["github.com/a/theme v1.2.0"])).unwrap();

    assert_eq!(pruned.removed, 2);
    assert_eq!(
        pruned.content,
        "module example.com/site

go 1.12

require (
\tgithub.com/a/theme v1.2.0
)

"
    );
}

#[test]
fn test_prune_manifest_is_idempotent() {
    let keep = active(&["github.com/a/theme v1.2.0"]);
    let first = prune_manifest(MANIFEST, &keep).unwrap();

    assert_eq!(prune_manifest(&first.content, &keep), None);
}

#[test]
fn test_prune_manifest_empty_require_block_keeps_following_directives() {
    let content = "module example.com/site

require ()

go 1.12

replace github.com/a/theme => github.com/b/theme v1.0.0

require ( )
toolchain go1.21.0
";
    assert_eq!(prune_manifest(content, &HashSet::new()), None);
}

#[test]
fn test_prune_manifest_block_opened_with_comment() {
    let content = "require ( // themes
\tgithub.com/old/theme v0.1.0
)
go 1.12
";
    let pruned = prune_manifest(content, &HashSet::new()).unwrap();

    assert_eq!(pruned.removed, 1);
    assert_eq!(pruned.content, "require ( // themes\n)\ngo 1.12\n");
}

#[test]
fn test_prune_checksums_dropping_everything_leaves_empty_file() {
    let pruned = prune_checksums(CHECKSUMS, &HashSet::new()).unwrap();

    assert_eq!(pruned.removed, 4);
    assert_eq!(pruned.content, "");
}

#[test]
fn test_prune_manifest_ignores_non_dependency_lines() {
    let content = "module example.com/site\n\nreplace github.com/a/theme => ../a\n";
    assert_eq!(prune_manifest(content, &HashSet::new()), None);
}

#[test]
fn test_prune_manifest_block_keeps_comments() {
    let content = "require (\n\t// pinned\n\tgithub.com/a/theme v1.0.0\n)\n";
    let pruned = prune_manifest(content, &HashSet::new()).unwrap();
    assert_eq!(pruned.content, "require (\n\t// pinned\n)\n");
}

#[test]
fn test_prune_checksums_matches_go_mod_entries() {
    let pruned = prune_checksums(CHECKSUMS, &active(&["github.com/a/theme v1.2.0"])).unwrap();

    assert_eq!(pruned.removed, 2);
    assert_eq!(
        pruned.content,
        "github.com/a/theme v1.2.0 h1:abc=\ngithub.com/a/theme v1.2.0/go.mod h1:def=\n"
    );
}

#[test]
fn test_prune_checksums_untouched_when_all_active() {
    let keep = active(&["github.com/a/theme v1.2.0", "github.com/old/theme v0.1.0"]);
    assert_eq!(prune_checksums(CHECKSUMS, &keep), None);
}

fn project() -> MockFileSystemProvider {
    MockFileSystemProvider::new()
        .with_file("/test/workdir/go.mod", MANIFEST)
        .with_file("/test/workdir/go.sum", CHECKSUMS)
        .with_directory("/cache/a")
}

fn resolved() -> MockProcessProvider {
    MockProcessProvider::new().with_success(
        LIST,
        r#"{"Path": "example.com/site", "Main": true}
{"Path": "github.com/a/theme", "Version": "v1.2.0", "Dir": "/cache/a"}"#,
    )
}

fn client<'a>(fs: &'a MockFileSystemProvider, process: &'a MockProcessProvider) -> ModuleClient<'a> {
    ModuleClient::new(
        fs,
        process,
        ClientSettings::new("/test/workdir").with_imports(["github.com/a/theme"]),
    )
}

#[test]
fn test_tidy_rewrites_both_files() {
    let fs = project();
    let process = resolved();

    let report = client(&fs, &process).tidy().unwrap();

    assert_eq!(
        report,
        TidyReport {
            manifest_removed: 2,
            checksum_removed: 2,
        }
    );
    let manifest = fs.file("/test/workdir/go.mod").unwrap();
    assert!(manifest.contains("github.com/a/theme v1.2.0"));
    assert!(!manifest.contains("github.com/old/theme"));
    assert!(!manifest.contains("github.com/gone/theme"));
    assert!(!fs.file("/test/workdir/go.sum").unwrap().contains("old/theme"));
}

#[test]
fn test_second_tidy_leaves_files_byte_identical() {
    let fs = project();
    let process = resolved();
    let client = client(&fs, &process);

    client.tidy().unwrap();
    let manifest = fs.file("/test/workdir/go.mod").unwrap();
    let checksums = fs.file("/test/workdir/go.sum").unwrap();

    let report = client.tidy().unwrap();

    assert!(report.is_clean());
    assert_eq!(fs.file("/test/workdir/go.mod").unwrap(), manifest);
    assert_eq!(fs.file("/test/workdir/go.sum").unwrap(), checksums);
}

#[test]
fn test_tidy_tolerates_missing_checksum_file() {
    let fs = MockFileSystemProvider::new()
        .with_file("/test/workdir/go.mod", MANIFEST)
        .with_directory("/cache/a");
    let process = resolved();

    let report = client(&fs, &process).tidy().unwrap();

    assert_eq!(report.checksum_removed, 0);
    assert!(fs.file("/test/workdir/go.sum").is_none());
}

#[test]
fn test_tidy_without_manifest_is_a_no_op() {
    let fs = MockFileSystemProvider::new().with_directory("/test/workdir/themes/github.com/a/theme");
    let process = MockProcessProvider::new();

    let report = client(&fs, &process).tidy().unwrap();

    assert!(report.is_clean());
    assert!(process.get_calls().is_empty());
}

#[test]
fn test_tidy_aborts_when_collection_fails() {
    let fs = MockFileSystemProvider::new().with_file("/test/workdir/go.mod", MANIFEST);
    let process = MockProcessProvider::new();

    let err = client(&fs, &process).tidy().unwrap_err();

    assert!(matches!(err, TidyError::Collect(_)));
    assert_eq!(fs.file("/test/workdir/go.mod").unwrap(), MANIFEST);
}
