//! Vendoring module components into `_vendor`

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use thememod_lib::application::cli::Commands;
use thememod_lib::application::commands::execute_command_with_session;
use thememod_lib::application::session::Session;
use thememod_lib::modules::{ModuleClient, VendorError};
use thememod_tests::{HermeticSessionBuilder, TestEnvironment, go_mock, main_module_json, module_json};

/// Site importing `github.com/a/theme`, which itself imports `github.com/b/theme`
fn two_module_site() -> Result<(HermeticSessionBuilder, PathBuf, PathBuf)> {
    let mut builder =
        HermeticSessionBuilder::new()?.with_site_project("site", &["github.com/a/theme"], Some("example.com/site"))?;
    let env: &TestEnvironment = builder.test_env();
    let a = env.add_cached_module(
        "github.com/a/theme",
        "v1.2.0",
        &[
            ("config.toml", "theme = [\"github.com/b/theme\"]\n"),
            ("theme.toml", "name = \"A\""),
            ("layouts/index.html", "<html>"),
            ("layouts/partials/head.html", "<head>"),
            ("static/css/site.css", "body {}"),
            ("node_modules/dep/index.js", "js"),
            ("resources/_gen/x.css", "gen"),
        ],
    )?;
    let b = env.add_cached_module("github.com/b/theme", "v0.3.0", &[("i18n/en.toml", "hi")])?;
    let workdir = env.work_path.join("site");
    let list = [
        main_module_json("example.com/site", &workdir),
        module_json("github.com/a/theme", "v1.2.0", &a),
        module_json("github.com/b/theme", "v0.3.0", &b),
    ]
    .join("\n");
    builder
        .test_env_mut()
        .add_mock_executable("go", go_mock(&list, ""))?;
    Ok((builder, a, b))
}

#[test]
fn vendor_copies_only_allow_listed_folders() -> Result<()> {
    let (builder, _a, _b) = two_module_site()?;
    let (session, _env) = builder.build()?;
    let vendor = session.workdir()?.join("_vendor");

    let report = ModuleClient::from_session(&session)?.vendor()?;

    assert_eq!(report.vendored.len(), 2);
    let a = vendor.join("github.com/a/theme");
    assert!(a.join("theme.toml").is_file());
    assert!(a.join("config.toml").is_file());
    assert!(a.join("layouts/partials/head.html").is_file());
    assert!(a.join("static/css/site.css").is_file());
    assert!(a.join("resources/_gen/x.css").is_file());
    assert!(!a.join("node_modules").exists());
    assert!(vendor.join("github.com/b/theme/i18n/en.toml").is_file());
    Ok(())
}

#[test]
fn vendor_index_lists_packages_in_collection_order() -> Result<()> {
    let (builder, _a, _b) = two_module_site()?;
    let (session, _env) = builder.build()?;

    execute_command_with_session(Commands::Vendor, &session)?;

    let index = fs::read_to_string(session.workdir()?.join("_vendor/modules.txt"))?;
    assert_eq!(
        index,
        "# github.com/a/theme v1.2.0\n# github.com/b/theme v0.3.0\n"
    );
    Ok(())
}

#[test]
fn collection_after_vendor_uses_snapshot() -> Result<()> {
    let (builder, _a, _b) = two_module_site()?;
    let (session, _env) = builder.build()?;
    let client = ModuleClient::from_session(&session)?;

    client.vendor()?;
    let collected = client.collect()?;

    assert_eq!(collected.modules.len(), 2);
    assert!(collected.modules.iter().all(|c| c.vendored));
    assert!(collected.modules[1].dir.contains("_vendor/github.com/b/theme"));
    Ok(())
}

#[test]
fn vendor_refresh_removes_stale_files() -> Result<()> {
    let (builder, _a, _b) = two_module_site()?;
    let (session, _env) = builder.build()?;
    let stale = session
        .workdir()?
        .join("_vendor/github.com/a/theme/layouts/old.html");
    fs::create_dir_all(stale.parent().unwrap_or(&stale))?;
    fs::write(&stale, "old")?;

    ModuleClient::from_session(&session)?.vendor()?;

    assert!(!stale.exists());
    Ok(())
}

#[test]
fn vendor_without_main_module_fails() -> Result<()> {
    let (session, _env) = HermeticSessionBuilder::new()?
        .with_site_project("site", &["a"], Some("example.com/site"))?
        .with_mock_executable("go", go_mock("", ""))?
        .build()?;

    let err = ModuleClient::from_session(&session)?.vendor().unwrap_err();

    assert!(matches!(err, VendorError::MainModuleNotFound));
    assert!(!session.workdir()?.join("_vendor").exists());
    Ok(())
}
