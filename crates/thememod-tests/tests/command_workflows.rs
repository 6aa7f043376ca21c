//! Commands run end to end through a live session

use anyhow::Result;
use std::fs;
use thememod_lib::application::cli::Commands;
use thememod_lib::application::commands::execute_command_with_session;
use thememod_lib::application::session::Session;
use thememod_lib::modules::{ModuleClient, ModuleGraph};
use thememod_tests::{HermeticSessionBuilder, MockBehavior, go_mock, module_json};

#[test]
fn requirements_probes_go_version() -> Result<()> {
    let (session, env) = HermeticSessionBuilder::new()?
        .with_site_project("site", &[], None)?
        .with_mock_executable("go", MockBehavior::stdout("go version go1.22.1 linux/amd64"))?
        .build()?;

    execute_command_with_session(Commands::Requirements, &session)?;

    assert!(env.verify_mock_call("go", &["version"])?);
    Ok(())
}

#[test]
fn init_creates_manifest() -> Result<()> {
    let (session, env) = HermeticSessionBuilder::new()?
        .with_site_project("site", &[], None)?
        .with_mock_executable(
            "go",
            MockBehavior::script("[ \"$1 $2\" = \"mod init\" ] && echo \"module $3\" > go.mod"),
        )?
        .build()?;

    execute_command_with_session(
        Commands::Init {
            path: "example.com/site".to_string(),
        },
        &session,
    )?;

    assert!(env.verify_mock_call("go", &["mod", "init", "example.com/site"])?);
    let manifest = fs::read_to_string(session.workdir()?.join("go.mod"))?;
    assert_eq!(manifest.trim_end(), "module example.com/site");
    assert!(ModuleClient::from_session(&session)?.is_manifest_enabled());
    Ok(())
}

#[test]
fn init_refuses_existing_module() -> Result<()> {
    let (session, env) = HermeticSessionBuilder::new()?
        .with_site_project("site", &[], Some("example.com/site"))?
        .with_mock_executable("go", MockBehavior::AlwaysSucceed)?
        .build()?;

    let result = execute_command_with_session(
        Commands::Init {
            path: "example.com/other".to_string(),
        },
        &session,
    );

    assert!(result.is_err());
    assert!(env.get_mock_calls("go")?.is_empty());
    Ok(())
}

#[test]
fn graph_is_filtered_to_collected_modules() -> Result<()> {
    let mut builder =
        HermeticSessionBuilder::new()?.with_site_project("site", &["github.com/a/theme"], Some("example.com/site"))?;
    let a = builder
        .test_env()
        .add_cached_module("github.com/a/theme", "v1.2.0", &[("layouts/a.html", "a")])?;
    let graph = "example.com/site github.com/a/theme@v1.2.0\n\
                 example.com/site golang.org/x/text@v0.3.0";
    builder.test_env_mut().add_mock_executable(
        "go",
        go_mock(&module_json("github.com/a/theme", "v1.2.0", &a), graph),
    )?;
    let (session, _env) = builder.build()?;
    let client = ModuleClient::from_session(&session)?;

    let full: ModuleGraph = client.module_graph()?;
    let filtered = full.filtered_to(&client.collect()?);

    assert_eq!(full.edge_count(), 2);
    assert_eq!(
        filtered.render(),
        "example.com/site github.com/a/theme@v1.2.0\n"
    );
    execute_command_with_session(Commands::Graph { filter: true }, &session)?;
    Ok(())
}

#[test]
fn collect_command_reports_missing_theme() -> Result<()> {
    let (session, _env) = HermeticSessionBuilder::new()?
        .with_site_project("site", &["ghost"], None)?
        .build()?;

    let err = execute_command_with_session(Commands::Collect, &session).unwrap_err();

    assert!(format!("{:#}", err).contains("\"ghost\" not found"));
    Ok(())
}
