use super::*;
use crate::testing::TempDirFixture;

#[test]
fn test_copy_dir_filtered_skips_rejected_directories() {
    let fixture = TempDirFixture::new().unwrap();
    fixture.write_file("src/README.md", "readme").unwrap();
    fixture.write_file("src/layouts/index.html", "<html>").unwrap();
    fixture.write_file("src/layouts/partials/head.html", "<head>").unwrap();
    fixture.write_file("src/node_modules/pkg/index.js", "js").unwrap();

    let from = fixture.path().join("src");
    let to = fixture.path().join("dst");
    LiveFileSystemProvider
        .copy_dir_filtered(&from, &to, &|rel: &Path| !rel.starts_with("node_modules"))
        .unwrap();

    assert!(fixture.file_exists("dst/README.md"));
    assert!(fixture.file_exists("dst/layouts/index.html"));
    assert!(fixture.file_exists("dst/layouts/partials/head.html"));
    assert!(!fixture.file_exists("dst/node_modules"));
}

#[test]
fn test_copy_dir_filtered_receives_relative_paths() {
    let fixture = TempDirFixture::new().unwrap();
    fixture.write_file("src/a/b/file.txt", "x").unwrap();

    let seen = std::cell::RefCell::new(Vec::new());
    LiveFileSystemProvider
        .copy_dir_filtered(
            &fixture.path().join("src"),
            &fixture.path().join("dst"),
            &|rel: &Path| {
                seen.borrow_mut().push(rel.to_path_buf());
                true
            },
        )
        .unwrap();

    assert_eq!(
        seen.into_inner(),
        vec![PathBuf::from("a"), PathBuf::from("a/b")]
    );
}

#[test]
fn test_live_process_reports_missing_executable() {
    let provider = LiveProcessProvider::new();
    let result = provider.execute(
        "thememod-definitely-not-a-real-binary",
        &["version"],
        &env::temp_dir(),
        &[],
    );

    assert!(matches!(result, Err(ProcessError::NotFound { .. })));
}

#[test]
fn test_session_workdir_prefers_config() {
    let config = AppConfig {
        workdir: Some(PathBuf::from("/srv/site")),
        ..AppConfig::default()
    };
    let session = CommandSession::new_with_providers(
        LiveFileSystemProvider,
        LiveProcessProvider::new(),
        LiveConfigProvider::new(config),
    );

    assert_eq!(session.workdir().unwrap(), PathBuf::from("/srv/site"));
}
