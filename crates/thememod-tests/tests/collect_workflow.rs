//! Collection against a real filesystem and a mock go toolchain

use anyhow::Result;
use std::fs;
use thememod_lib::application::session::Session;
use thememod_lib::modules::{CollectError, ModuleClient, NotFoundHint};
use thememod_tests::{
    HermeticSessionBuilder, MockBehavior, go_mock, main_module_json, module_json,
    write_component_config,
};

#[test]
fn collects_local_themes_in_import_order() -> Result<()> {
    let (session, _env) = HermeticSessionBuilder::new()?
        .with_site_project("site", &["a"], None)?
        .build()?;
    let workdir = session.workdir()?;
    fs::create_dir_all(workdir.join("themes/a"))?;
    fs::create_dir_all(workdir.join("themes/b"))?;
    write_component_config(&workdir.join("themes/a"), &["b", "a"])?;

    let client = ModuleClient::from_session(&session)?;
    let collected = client.collect()?;

    let paths: Vec<&str> = collected.modules.iter().map(|c| c.path()).collect();
    assert_eq!(paths, vec!["a", "b"]);
    assert!(collected.modules[1].dir.ends_with("themes/b/"));
    assert_eq!(collected.modules[1].owner.as_deref(), Some("a"));
    Ok(())
}

#[test]
fn collects_module_from_cache_via_go() -> Result<()> {
    let mut builder =
        HermeticSessionBuilder::new()?.with_site_project("site", &["github.com/a/theme"], Some("example.com/site"))?;
    let module_dir = builder.test_env().add_cached_module(
        "github.com/a/theme",
        "v1.2.0",
        &[("layouts/index.html", "<html>")],
    )?;
    let workdir = builder.test_env().work_path.join("site");
    let list = format!(
        "{}\n{}",
        main_module_json("example.com/site", &workdir),
        module_json("github.com/a/theme", "v1.2.0", &module_dir)
    );
    builder
        .test_env_mut()
        .add_mock_executable("go", go_mock(&list, ""))?;
    let (session, env) = builder.build()?;

    let collected = ModuleClient::from_session(&session)?.collect()?;

    assert_eq!(collected.modules.len(), 1);
    assert_eq!(collected.modules[0].version(), "v1.2.0");
    assert!(collected.modules[0].is_package());
    assert!(env.verify_mock_call("go", &["mod", "download"])?);
    assert!(env.verify_mock_call("go", &["list", "-m", "-json", "all"])?);
    Ok(())
}

#[test]
fn go_invocations_run_in_project_with_proxy() -> Result<()> {
    let mut builder =
        HermeticSessionBuilder::new()?.with_site_project("site", &["local"], Some("example.com/site"))?;
    let capture = builder.test_env().root_path.join("env.txt");
    builder.test_env_mut().add_mock_executable(
        "go",
        MockBehavior::script(format!(
            "echo \"$PWD|$GOPROXY\" > \"{}\"",
            capture.display()
        )),
    )?;
    let (session, _env) = builder.build()?;
    fs::create_dir_all(session.workdir()?.join("themes/local"))?;

    ModuleClient::from_session(&session)?.collect()?;

    let recorded = fs::read_to_string(&capture)?;
    assert_eq!(
        recorded.trim_end(),
        format!("{}|direct", session.workdir()?.display())
    );
    Ok(())
}

#[test]
fn snapshot_wins_over_module_cache() -> Result<()> {
    let mut builder =
        HermeticSessionBuilder::new()?.with_site_project("site", &["github.com/a/theme"], Some("example.com/site"))?;
    let module_dir = builder
        .test_env()
        .add_cached_module("github.com/a/theme", "v1.2.0", &[("layouts/a.html", "a")])?;
    let workdir = builder.test_env().work_path.join("site");
    fs::create_dir_all(workdir.join("_vendor/github.com/a/theme/layouts"))?;
    fs::write(
        workdir.join("_vendor/modules.txt"),
        "# github.com/a/theme v1.0.0\n",
    )?;
    let list = module_json("github.com/a/theme", "v1.2.0", &module_dir);
    builder
        .test_env_mut()
        .add_mock_executable("go", go_mock(&list, ""))?;
    let (session, _env) = builder.build()?;
    let client = ModuleClient::from_session(&session)?;

    let collected = client.collect()?;
    assert!(collected.modules[0].vendored);
    assert!(collected.modules[0].dir.contains("_vendor"));

    let live = client.collect_with(false)?;
    assert!(!live.modules[0].vendored);
    assert!(live.modules[0].dir.starts_with(&module_dir.display().to_string()));
    Ok(())
}

#[test]
fn ignore_vendor_setting_bypasses_snapshot() -> Result<()> {
    let (session, _env) = HermeticSessionBuilder::new()?
        .with_site_project("site", &["a"], None)?
        .with_ignore_vendor()
        .build()?;
    let workdir = session.workdir()?;
    fs::create_dir_all(workdir.join("themes/a"))?;
    fs::create_dir_all(workdir.join("_vendor/a"))?;
    fs::write(workdir.join("_vendor/modules.txt"), "# a v1.0.0\n")?;

    let collected = ModuleClient::from_session(&session)?.collect()?;

    assert!(!collected.modules[0].vendored);
    assert!(collected.modules[0].dir.ends_with("themes/a/"));
    Ok(())
}

#[test]
fn too_old_go_adds_hint_to_not_found() -> Result<()> {
    let (session, env) = HermeticSessionBuilder::new()?
        .with_site_project("site", &["github.com/a/theme"], Some("example.com/site"))?
        .with_mock_executable(
            "go",
            MockBehavior::AlwaysFail {
                error: "flag provided but not defined: -json".to_string(),
            },
        )?
        .build()?;

    let err = ModuleClient::from_session(&session)?
        .collect()
        .unwrap_err();

    assert!(matches!(
        err,
        CollectError::ComponentNotFound {
            hint: Some(NotFoundHint::ToolchainTooOld),
            ..
        }
    ));
    // The toolchain is not retried once it is known to be too old
    assert_eq!(env.get_mock_calls("go")?.len(), 1);
    Ok(())
}

#[test]
fn fetches_missing_module_on_demand() -> Result<()> {
    let mut builder =
        HermeticSessionBuilder::new()?.with_site_project("site", &["github.com/b/theme"], Some("example.com/site"))?;
    let module_dir = builder
        .test_env()
        .add_cached_module("github.com/b/theme", "v0.3.0", &[("layouts/b.html", "b")])?;
    let marker = builder.test_env().root_path.join("fetched");
    let listed = module_json("github.com/b/theme", "v0.3.0", &module_dir);
    let script = format!(
        r#"case "$*" in
  "get github.com/b/theme") touch "{marker}" ;;
  "list -m -json all") if [ -f "{marker}" ]; then echo '{listed}'; fi ;;
esac"#,
        marker = marker.display(),
        listed = listed
    );
    builder
        .test_env_mut()
        .add_mock_executable("go", MockBehavior::script(script))?;
    let (session, env) = builder.build()?;

    let collected = ModuleClient::from_session(&session)?.collect()?;

    assert_eq!(collected.modules[0].version(), "v0.3.0");
    assert!(env.verify_mock_call("go", &["get", "github.com/b/theme"])?);
    Ok(())
}
