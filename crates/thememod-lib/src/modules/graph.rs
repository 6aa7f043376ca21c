//! Module requirement graph
//!
//! Parses `go mod graph` output (`<from> <to>` per line, nodes written as
//! `path@version` except for the main module) into a directed graph.

use crate::modules::client::ModuleClient;
use crate::modules::collect::{CollectError, ModulesConfig};
use crate::modules::toolchain::ToolchainError;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("malformed graph line: {line:?}")]
    MalformedEdge { line: String },

    #[error(transparent)]
    Toolchain(#[from] ToolchainError),

    #[error(transparent)]
    Collect(#[from] CollectError),
}

/// Module path of a graph node, without the `@version` suffix
pub fn node_path(node: &str) -> &str {
    node.split_once('@').map(|(path, _)| path).unwrap_or(node)
}

/// Directed requirement graph; edges keep their input order
#[derive(Debug, Default)]
pub struct ModuleGraph {
    graph: DiGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
}

impl ModuleGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw `go mod graph` text; blank lines are skipped
    pub fn parse(text: &str) -> Result<Self, GraphError> {
        let mut graph = Self::new();
        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let fields: Vec<&str> = trimmed.split_whitespace().collect();
            let [from, to] = fields.as_slice() else {
                return Err(GraphError::MalformedEdge {
                    line: line.to_string(),
                });
            };
            graph.add_edge(from, to);
        }
        tracing::trace!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "parsed module graph"
        );
        Ok(graph)
    }

    fn add_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.node_map.insert(name.to_string(), idx);
        idx
    }

    /// Add an edge unless it is already present
    pub fn add_edge(&mut self, from: &str, to: &str) {
        let from = self.add_node(from);
        let to = self.add_node(to);
        if self.graph.find_edge(from, to).is_none() {
            self.graph.add_edge(from, to, ());
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// `(from, to)` pairs in order of first appearance
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.graph.edge_references().map(|edge| {
            (
                self.graph[edge.source()].as_str(),
                self.graph[edge.target()].as_str(),
            )
        })
    }

    /// Subgraph of the edges pointing at one of `paths` (compared without
    /// version, case-insensitively)
    pub fn filtered<'p>(&self, paths: impl IntoIterator<Item = &'p str>) -> Self {
        let keep: HashSet<String> = paths.into_iter().map(str::to_lowercase).collect();
        let mut filtered = Self::new();
        for (from, to) in self.edges() {
            if keep.contains(&node_path(to).to_lowercase()) {
                filtered.add_edge(from, to);
            }
        }
        filtered
    }

    /// Edges restricted to the packages of a collection run
    pub fn filtered_to(&self, collected: &ModulesConfig) -> Self {
        self.filtered(collected.packages().map(|(_, package)| package.path.as_str()))
    }

    /// One `<from> <to>` line per edge
    pub fn render(&self) -> String {
        self.edges()
            .map(|(from, to)| format!("{} {}\n", from, to))
            .collect()
    }
}

impl ModuleClient<'_> {
    /// Requirement graph of the project; empty for projects without go.mod
    pub fn module_graph(&self) -> Result<ModuleGraph, GraphError> {
        if !self.is_manifest_enabled() {
            return Ok(ModuleGraph::new());
        }
        ModuleGraph::parse(&self.graph()?)
    }
}

#[cfg(test)]
mod tests {
    include!("graph.test.rs");
}
