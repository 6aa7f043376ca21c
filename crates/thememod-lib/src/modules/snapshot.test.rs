use super::*;
use crate::application::session_mocks::MockFileSystemProvider;

#[test]
fn test_scan_maps_paths_to_snapshot_dirs() {
    let fs = MockFileSystemProvider::new().with_file(
        "/site/_vendor/modules.txt",
        "# github.com/a/theme v1.0.0\n# github.com/b/shortcodes v0.2.0\n",
    );
    let mut index = SnapshotIndex::new();

    index.scan(&fs, Path::new("/site")).unwrap();

    assert_eq!(index.len(), 2);
    assert_eq!(
        index.lookup("github.com/a/theme"),
        Some(Path::new("/site/_vendor/github.com/a/theme"))
    );
    assert!(index.lookup("github.com/A/theme").is_none());
}

#[test]
fn test_scan_skips_blank_lines() {
    let fs = MockFileSystemProvider::new()
        .with_file("/site/_vendor/modules.txt", "\n# a/b v1\n\n   \n#\n");
    let mut index = SnapshotIndex::new();

    index.scan(&fs, Path::new("/site")).unwrap();
    assert_eq!(index.len(), 1);
}

#[test]
fn test_scan_without_index_is_empty() {
    let fs = MockFileSystemProvider::new().with_directory("/site");
    let mut index = SnapshotIndex::new();

    index.scan(&fs, Path::new("/site")).unwrap();
    assert!(index.is_empty());
}

#[test]
fn test_malformed_line_is_an_error() {
    let fs = MockFileSystemProvider::new()
        .with_file("/site/_vendor/modules.txt", "# a/b v1\n# only-one-field\n");
    let mut index = SnapshotIndex::new();

    let err = index.scan(&fs, Path::new("/site")).unwrap_err();

    match err {
        SnapshotIndexError::Malformed { file, line } => {
            assert_eq!(file, PathBuf::from("/site/_vendor/modules.txt"));
            assert_eq!(line, "# only-one-field");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_first_index_wins() {
    let fs = MockFileSystemProvider::new()
        .with_file("/site/_vendor/modules.txt", "# a/b v1\n")
        .with_file("/site/themes/t/_vendor/modules.txt", "# a/b v2\n# c/d v1\n");
    let mut index = SnapshotIndex::new();

    index.scan(&fs, Path::new("/site")).unwrap();
    index.scan(&fs, Path::new("/site/themes/t")).unwrap();

    assert_eq!(index.lookup("a/b"), Some(Path::new("/site/_vendor/a/b")));
    assert_eq!(
        index.lookup("c/d"),
        Some(Path::new("/site/themes/t/_vendor/c/d"))
    );
}

#[test]
fn test_each_directory_is_scanned_once() {
    let fs = MockFileSystemProvider::new().with_file("/site/_vendor/modules.txt", "# a/b v1\n");
    let mut index = SnapshotIndex::new();
    index.scan(&fs, Path::new("/site")).unwrap();

    fs.write_file(Path::new("/site/_vendor/modules.txt"), "broken line here\n")
        .unwrap();
    index.scan(&fs, Path::new("/site")).unwrap();

    assert_eq!(index.len(), 1);
}

#[test]
fn test_render_index() {
    let rendered = render_index([("a/b", "v1.0.0"), ("c/d", "v0.1.0")]);
    assert_eq!(rendered, "# a/b v1.0.0\n# c/d v0.1.0\n");
}
