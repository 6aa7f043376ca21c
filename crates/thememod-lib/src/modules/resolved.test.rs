use super::*;

const LIST_OUTPUT: &str = r#"{
	"Path": "example.com/site",
	"Main": true,
	"Dir": "/work/site",
	"GoMod": "/work/site/go.mod"
}
{
	"Path": "github.com/bep/hugotestmods/mypartials",
	"Version": "v1.0.7",
	"Time": "2019-06-25T12:45:43Z",
	"Indirect": true,
	"Dir": "/go/pkg/mod/github.com/bep/hugotestmods/mypartials@v1.0.7",
	"GoMod": "/go/pkg/mod/cache/download/github.com/bep/hugotestmods/mypartials/@v/v1.0.7.mod"
}
{
	"Path": "github.com/bep/broken",
	"Version": "v0.1.0",
	"Error": {
		"Err": "module lookup disabled"
	}
}
{
	"Path": "github.com/old/theme",
	"Version": "v1.2.0",
	"Replace": {
		"Path": "github.com/new/theme",
		"Version": "v1.3.0",
		"Dir": "/go/pkg/mod/github.com/new/theme@v1.3.0"
	},
	"Dir": "/go/pkg/mod/github.com/new/theme@v1.3.0"
}
"#;

#[test]
fn test_parse_resolved_stream() {
    let packages = parse_resolved_stream(LIST_OUTPUT).unwrap();
    assert_eq!(packages.len(), 4);

    assert!(packages[0].main);
    assert_eq!(packages[0].version, "");

    assert_eq!(packages[1].version, "v1.0.7");
    assert!(packages[1].indirect);
    assert!(packages[1].has_directory());

    assert!(!packages[2].has_directory());
    assert_eq!(
        packages[2].error.as_ref().map(|e| e.err.as_str()),
        Some("module lookup disabled")
    );

    let replacement = packages[3].replace.as_ref().unwrap();
    assert_eq!(replacement.path, "github.com/new/theme");
    assert_eq!(replacement.version, "v1.3.0");
}

#[test]
fn test_parse_empty_stream() {
    assert!(parse_resolved_stream("").unwrap().is_empty());
    assert!(parse_resolved_stream("  \n").unwrap().is_empty());
}

#[test]
fn test_parse_truncated_stream_fails() {
    assert!(parse_resolved_stream(r#"{"Path": "a"} {"Path": "#).is_err());
}

#[test]
fn test_index_lookup_is_case_insensitive() {
    let index = ResolvedIndex::new(vec![ResolvedPackage::new(
        "github.com/Bep/Theme",
        "v1.0.0",
        "/cache/theme",
    )]);

    assert!(index.lookup("github.com/bep/theme").is_some());
    assert!(index.lookup("GITHUB.COM/BEP/THEME").is_some());
    assert!(index.lookup("github.com/bep/other").is_none());
}

#[test]
fn test_index_last_duplicate_wins() {
    let index = ResolvedIndex::new(vec![
        ResolvedPackage::new("a/b", "v1.0.0", "/first"),
        ResolvedPackage::new("A/B", "v2.0.0", "/second"),
    ]);

    assert_eq!(index.lookup("a/b").unwrap().dir, "/second");
    assert_eq!(index.len(), 2);
}

#[test]
fn test_main_package() {
    let packages = parse_resolved_stream(LIST_OUTPUT).unwrap();
    let index = ResolvedIndex::new(packages);
    assert_eq!(index.main_package().unwrap().path, "example.com/site");

    let no_main = ResolvedIndex::new(vec![ResolvedPackage::new("a/b", "v1", "/d")]);
    assert!(no_main.main_package().is_none());
}

#[test]
fn test_path_version() {
    let package = ResolvedPackage::new("github.com/a/b", "v0.3.1", "");
    assert_eq!(package.path_version(), "github.com/a/b v0.3.1");
}
