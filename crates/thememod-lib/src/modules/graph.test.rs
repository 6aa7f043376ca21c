use super::*;
use crate::application::session_mocks::{MockFileSystemProvider, MockProcessProvider};
use crate::modules::client::ClientSettings;

const GRAPH: &str = "example.com/site github.com/a/theme@v1.2.0
example.com/site github.com/b/theme@v0.3.0
github.com/a/theme@v1.2.0 github.com/c/shortcodes@v0.1.0
github.com/a/theme@v1.2.0 golang.org/x/text@v0.3.2

";

#[test]
fn test_parse_keeps_edge_order() {
    let graph = ModuleGraph::parse(GRAPH).unwrap();

    assert_eq!(graph.node_count(), 5);
    assert_eq!(graph.edge_count(), 4);
    assert_eq!(
        graph.edges().next(),
        Some(("example.com/site", "github.com/a/theme@v1.2.0"))
    );
    assert_eq!(graph.render(), GRAPH.trim_end().to_string() + "\n");
}

#[test]
fn test_parse_rejects_malformed_lines() {
    let err = ModuleGraph::parse("a b\nlonely\n").unwrap_err();
    assert!(matches!(err, GraphError::MalformedEdge { ref line } if line == "lonely"));
}

#[test]
fn test_duplicate_edges_collapse() {
    let graph = ModuleGraph::parse("a b@v1\na b@v1\n").unwrap();
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn test_node_path_strips_version() {
    assert_eq!(node_path("github.com/a/theme@v1.2.0"), "github.com/a/theme");
    assert_eq!(node_path("example.com/site"), "example.com/site");
}

#[test]
fn test_filtered_keeps_edges_into_requested_paths() {
    let graph = ModuleGraph::parse(GRAPH).unwrap();

    let filtered = graph.filtered(["GitHub.com/A/Theme", "github.com/c/shortcodes"]);

    assert_eq!(
        filtered.render(),
        "example.com/site github.com/a/theme@v1.2.0\n\
         github.com/a/theme@v1.2.0 github.com/c/shortcodes@v0.1.0\n"
    );
}

#[test]
fn test_module_graph_without_manifest_is_empty() {
    let fs = MockFileSystemProvider::new();
    let process = MockProcessProvider::new();
    let client = ModuleClient::new(&fs, &process, ClientSettings::new("/test/workdir"));

    let graph = client.module_graph().unwrap();

    assert_eq!(graph.edge_count(), 0);
    assert!(process.get_calls().is_empty());
}

#[test]
fn test_module_graph_runs_go_mod_graph() {
    let fs = MockFileSystemProvider::new().with_file("/test/workdir/go.mod", "module x\n");
    let process = MockProcessProvider::new().with_success("go mod graph", GRAPH);
    let client = ModuleClient::new(&fs, &process, ClientSettings::new("/test/workdir"));

    let graph = client.module_graph().unwrap();

    assert_eq!(graph.edge_count(), 4);
    assert!(process.verify_call("go mod graph"));
}
