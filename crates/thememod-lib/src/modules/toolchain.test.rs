use super::*;
use crate::application::session_mocks::MockProcessProvider;

const LIST: &str = "go list -m -json all";

fn workdir() -> PathBuf {
    PathBuf::from("/site")
}

#[test]
fn test_list_resolved_downloads_then_lists() {
    let process = MockProcessProvider::new().with_success(
        LIST,
        r#"{"Path": "example.com/site", "Main": true}
{"Path": "github.com/a/theme", "Version": "v1.0.0", "Dir": "/cache/a"}"#,
    );
    let toolchain = ModuleToolchain::new(&process, &workdir(), "direct");

    let packages = toolchain.list_resolved().unwrap();

    assert_eq!(packages.len(), 2);
    assert_eq!(
        process.get_call_lines(),
        vec!["go mod download".to_string(), LIST.to_string()]
    );
}

#[test]
fn test_invocations_carry_workdir_and_proxy() {
    let process = MockProcessProvider::new();
    let toolchain = ModuleToolchain::new(&process, &workdir(), "https://proxy.example");

    toolchain.dependency_graph().unwrap();

    let call = &process.get_calls()[0];
    assert_eq!(call.working_dir, workdir());
    assert!(call.env.contains(&("PWD".to_string(), "/site".to_string())));
    assert!(
        call.env
            .contains(&("GOPROXY".to_string(), "https://proxy.example".to_string()))
    );
}

#[test]
fn test_missing_binary_degrades_once() {
    let process = MockProcessProvider::new().with_missing_command("go");
    let toolchain = ModuleToolchain::new(&process, &workdir(), "direct");

    assert!(toolchain.list_resolved().unwrap().is_empty());
    assert_eq!(toolchain.status(), ToolchainStatus::NotFound);

    toolchain.fetch("github.com/a/theme").unwrap();
    assert_eq!(toolchain.dependency_graph().unwrap(), "");

    // Only the first spawn attempt reached the process provider
    assert_eq!(process.get_calls().len(), 1);
}

#[test]
fn test_too_old_binary_degrades() {
    let process = MockProcessProvider::new().with_failure(
        "go mod download",
        "flag provided but not defined: -json",
    );
    let toolchain = ModuleToolchain::new(&process, &workdir(), "direct");

    assert!(toolchain.list_resolved().unwrap().is_empty());
    assert_eq!(toolchain.status(), ToolchainStatus::TooOld);
    assert_eq!(process.get_calls().len(), 1);
}

#[test]
fn test_command_failure_carries_stderr() {
    let process = MockProcessProvider::new()
        .with_failure("go get github.com/a/missing", "go: module not found\n");
    let toolchain = ModuleToolchain::new(&process, &workdir(), "direct");

    let err = toolchain.fetch("github.com/a/missing").unwrap_err();

    match err {
        ToolchainError::CommandFailed { command, stderr } => {
            assert_eq!(command, "go get github.com/a/missing");
            assert_eq!(stderr, "go: module not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(toolchain.status(), ToolchainStatus::Ok);
}

#[test]
fn test_malformed_list_output_is_decode_error() {
    let process = MockProcessProvider::new().with_success(LIST, "{\"Path\": ");
    let toolchain = ModuleToolchain::new(&process, &workdir(), "direct");

    assert!(matches!(
        toolchain.list_resolved(),
        Err(ToolchainError::Decode { .. })
    ));
}

#[test]
fn test_init_requires_working_binary() {
    let ok = MockProcessProvider::new();
    ModuleToolchain::new(&ok, &workdir(), "direct")
        .init("example.com/site")
        .unwrap();
    assert!(ok.verify_call("go mod init example.com/site"));

    let missing = MockProcessProvider::new().with_missing_command("go");
    let err = ModuleToolchain::new(&missing, &workdir(), "direct")
        .init("example.com/site")
        .unwrap_err();
    assert!(matches!(err, ToolchainError::Init { .. }));
    assert!(err.to_string().contains("not found"));
}
