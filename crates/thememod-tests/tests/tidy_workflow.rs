//! Pruning go.mod and go.sum

use anyhow::Result;
use std::fs;
use thememod_lib::application::session::Session;
use thememod_lib::modules::ModuleClient;
use thememod_tests::{HermeticSessionBuilder, go_mock, module_json};

const MANIFEST: &str = "module example.com/site

go 1.12

require (
\tgithub.com/a/theme v1.2.0
\tgithub.com/unused/theme v0.9.0 // indirect
)
";

const CHECKSUMS: &str = "github.com/a/theme v1.2.0 h1:aaa=
github.com/a/theme v1.2.0/go.mod h1:bbb=
github.com/unused/theme v0.9.0 h1:ccc=
github.com/unused/theme v0.9.0/go.mod h1:ddd=
";

fn site() -> Result<HermeticSessionBuilder> {
    let mut builder =
        HermeticSessionBuilder::new()?.with_site_project("site", &["github.com/a/theme"], Some("example.com/site"))?;
    let a = builder
        .test_env()
        .add_cached_module("github.com/a/theme", "v1.2.0", &[("layouts/a.html", "a")])?;
    let workdir = builder.test_env().work_path.join("site");
    fs::write(workdir.join("go.mod"), MANIFEST)?;
    fs::write(workdir.join("go.sum"), CHECKSUMS)?;
    let list = module_json("github.com/a/theme", "v1.2.0", &a);
    builder
        .test_env_mut()
        .add_mock_executable("go", go_mock(&list, ""))?;
    Ok(builder)
}

#[test]
fn tidy_drops_unreachable_requirements() -> Result<()> {
    let (session, _env) = site()?.build()?;
    let workdir = session.workdir()?;

    let report = ModuleClient::from_session(&session)?.tidy()?;

    assert_eq!(report.manifest_removed, 1);
    assert_eq!(report.checksum_removed, 2);
    let manifest = fs::read_to_string(workdir.join("go.mod"))?;
    assert!(manifest.contains("\tgithub.com/a/theme v1.2.0"));
    assert!(!manifest.contains("unused"));
    assert!(manifest.starts_with("module example.com/site\n\ngo 1.12\n"));
    let checksums = fs::read_to_string(workdir.join("go.sum"))?;
    assert_eq!(
        checksums,
        "github.com/a/theme v1.2.0 h1:aaa=\ngithub.com/a/theme v1.2.0/go.mod h1:bbb=\n"
    );
    Ok(())
}

#[test]
fn second_tidy_does_not_touch_files() -> Result<()> {
    let (session, _env) = site()?.build()?;
    let workdir = session.workdir()?;
    let client = ModuleClient::from_session(&session)?;

    client.tidy()?;
    let manifest = fs::read(workdir.join("go.mod"))?;
    let modified = fs::metadata(workdir.join("go.mod"))?.modified()?;

    let report = client.tidy()?;

    assert!(report.is_clean());
    assert_eq!(fs::read(workdir.join("go.mod"))?, manifest);
    assert_eq!(fs::metadata(workdir.join("go.mod"))?.modified()?, modified);
    Ok(())
}
