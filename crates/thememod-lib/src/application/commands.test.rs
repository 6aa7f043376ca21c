use super::*;
use crate::application::session_mocks::{
    MockCommandSession, MockFileSystemProvider, MockProcessProvider,
};
use crate::display::DisplayCall;

const LIST: &str = "go list -m -json all";

const RESOLVED: &str = r#"{"Path": "example.com/site", "Main": true, "Dir": "/test/workdir"}
{"Path": "github.com/a/theme", "Version": "v1.2.0", "Dir": "/cache/a"}"#;

fn module_site() -> MockFileSystemProvider {
    MockFileSystemProvider::new()
        .with_file("/test/workdir/go.mod", "module example.com/site\n\nrequire (\n\tgithub.com/a/theme v1.2.0\n\tgithub.com/old/theme v0.1.0\n)\n")
        .with_file("/test/workdir/config.toml", "theme = [\"github.com/a/theme\"]\n")
        .with_file("/cache/a/layouts/index.html", "<html>")
}

#[test]
fn test_version_reports_crate_version() {
    let session = MockCommandSession::new();

    execute_command_with_session(Commands::Version, &session).unwrap();

    assert!(
        session
            .mock_display()
            .mentions(&format!("thememod {}", env!("CARGO_PKG_VERSION")))
    );
    assert_eq!(session.mock_display().count_calls("structured_properties"), 1);
}

#[test]
fn test_requirements_with_go_available() {
    let session = MockCommandSession::new().with_process(
        MockProcessProvider::new().with_success("go version", "go version go1.22.1 linux/amd64\n"),
    );

    execute_command_with_session(Commands::Requirements, &session).unwrap();

    assert!(session.mock_display().has_call(&DisplayCall::StatusToolCheck {
        tool: "go".to_string(),
        available: true,
        version: "go version go1.22.1 linux/amd64".to_string(),
    }));
}

#[test]
fn test_requirements_without_go() {
    let session = MockCommandSession::new()
        .with_process(MockProcessProvider::new().with_missing_command("go"));

    execute_command_with_session(Commands::Requirements, &session).unwrap();

    assert!(session.mock_display().has_call(&DisplayCall::StatusToolCheck {
        tool: "go".to_string(),
        available: false,
        version: String::new(),
    }));
    assert!(session.mock_display().mentions("golang.org/dl"));
}

#[test]
fn test_collect_prints_components_in_order() {
    let fs = MockFileSystemProvider::new()
        .with_file("/test/workdir/config.toml", "theme = [\"a\"]\n")
        .with_file("/test/workdir/themes/a/config.toml", "theme = [\"b\", \"a\"]\n")
        .with_directory("/test/workdir/themes/b");
    let session = MockCommandSession::new().with_filesystem(fs);

    execute_command_with_session(Commands::Collect, &session).unwrap();

    let table = session
        .mock_display()
        .get_calls()
        .into_iter()
        .find_map(|call| match call {
            DisplayCall::StructuredTable { rows, .. } => Some(rows),
            _ => None,
        })
        .unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table[0][0], "a");
    assert_eq!(table[1][0], "b");
    assert_eq!(table[1][2], "local");
    assert_eq!(table[1][3], "a");
    assert!(session.mock_display().mentions("Collected 2 components"));
}

#[test]
fn test_collect_without_imports() {
    let session = MockCommandSession::new();

    execute_command_with_session(Commands::Collect, &session).unwrap();

    assert!(session.mock_display().mentions("No theme imports configured"));
    assert!(session.mock_process().get_calls().is_empty());
}

#[test]
fn test_collect_missing_component_fails() {
    let fs = MockFileSystemProvider::new().with_file("/test/workdir/config.toml", "theme = \"ghost\"\n");
    let session = MockCommandSession::new().with_filesystem(fs);

    let err = execute_command_with_session(Commands::Collect, &session).unwrap_err();

    assert!(format!("{:#}", err).contains("\"ghost\" not found"));
}

#[test]
fn test_vendor_reports_packages() {
    let session = MockCommandSession::new()
        .with_filesystem(module_site())
        .with_process(MockProcessProvider::new().with_success(LIST, RESOLVED));

    execute_command_with_session(Commands::Vendor, &session).unwrap();

    assert!(session.mock_display().has_call(&DisplayCall::StatusSuccess {
        item: "github.com/a/theme".to_string(),
        details: "v1.2.0".to_string(),
    }));
    assert_eq!(
        session
            .mock_filesystem()
            .file("/test/workdir/_vendor/modules.txt")
            .unwrap(),
        "# github.com/a/theme v1.2.0\n"
    );
}

#[test]
fn test_tidy_without_manifest_warns() {
    let session = MockCommandSession::new();

    execute_command_with_session(Commands::Tidy, &session).unwrap();

    assert_eq!(session.mock_display().count_calls("status_warning"), 1);
}

#[test]
fn test_tidy_prunes_manifest() {
    let session = MockCommandSession::new()
        .with_filesystem(module_site())
        .with_process(MockProcessProvider::new().with_success(LIST, RESOLVED));

    execute_command_with_session(Commands::Tidy, &session).unwrap();

    let manifest = session
        .mock_filesystem()
        .file("/test/workdir/go.mod")
        .unwrap();
    assert!(!manifest.contains("github.com/old/theme"));
    assert!(session.mock_display().mentions("1 requirements removed"));
}

#[test]
fn test_graph_filter_limits_edges() {
    let process = MockProcessProvider::new()
        .with_success(LIST, RESOLVED)
        .with_success(
            "go mod graph",
            "example.com/site github.com/a/theme@v1.2.0\nexample.com/site golang.org/x/text@v0.3.0\n",
        );
    let session = MockCommandSession::new()
        .with_filesystem(module_site())
        .with_process(process);

    execute_command_with_session(Commands::Graph { filter: true }, &session).unwrap();

    assert!(session.mock_display().has_call(&DisplayCall::StatusMessage {
        text: "example.com/site github.com/a/theme@v1.2.0".to_string(),
    }));
    assert!(!session.mock_display().mentions("golang.org/x/text"));
}

#[test]
fn test_init_runs_go_mod_init() {
    let session = MockCommandSession::new();

    execute_command_with_session(
        Commands::Init {
            path: "example.com/site".to_string(),
        },
        &session,
    )
    .unwrap();

    assert!(session.mock_process().verify_call("go mod init example.com/site"));
    assert!(session.mock_display().mentions("example.com/site"));
}

#[test]
fn test_init_refuses_existing_manifest() {
    let session = MockCommandSession::new().with_filesystem(module_site());

    let result = execute_command_with_session(
        Commands::Init {
            path: "example.com/site".to_string(),
        },
        &session,
    );

    assert!(result.is_err());
    assert!(session.mock_process().get_calls().is_empty());
}
