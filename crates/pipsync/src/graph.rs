//! Dependency graph retrieval.
//!
//! The graph maps each package name to its direct dependencies' names. It is
//! obtained from an external resolver (`pipenv graph --json`) once per run
//! and treated as read-only input afterwards. The [`GraphProvider`] trait
//! keeps the reconciliation core testable with an in-memory graph.

use std::env;
use std::path::PathBuf;
use std::process::Command;

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::error::SyncError;

/// Package name -> direct dependency names, all lower-cased.
pub type DependencyGraph = FxHashMap<String, Vec<String>>;

/// Source of the dependency graph for a run.
pub trait GraphProvider {
    /// Fetch the full dependency graph. Called once per run.
    fn dependency_graph(&self) -> Result<DependencyGraph, SyncError>;
}

/// Overrides the external graph command.
///
/// The value is split on whitespace into an argv; there is no quoting, so
/// program paths or arguments containing spaces are not supported.
///
/// Primarily for tests, which substitute a command that prints a fixture
/// graph instead of invoking pipenv.
const GRAPH_COMMAND_ENV: &str = "PIPSYNC_GRAPH_COMMAND";

/// One node in pipenv's `graph --json` output.
#[derive(Debug, Deserialize)]
struct GraphNode {
    package: GraphPackage,
    #[serde(default)]
    dependencies: Vec<GraphPackage>,
}

/// A package reference within a graph node.
#[derive(Debug, Deserialize)]
struct GraphPackage {
    key: String,
}

/// Fetches the dependency graph by running `pipenv graph --json` in the
/// project root.
#[derive(Debug)]
pub struct PipenvGraph {
    project_dir: PathBuf,
}

impl PipenvGraph {
    /// Create a provider that runs the graph command in `project_dir`.
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
        }
    }
}

impl GraphProvider for PipenvGraph {
    fn dependency_graph(&self) -> Result<DependencyGraph, SyncError> {
        let argv: Vec<String> = match env::var(GRAPH_COMMAND_ENV) {
            Ok(command) => command.split_whitespace().map(String::from).collect(),
            Err(_) => ["pipenv", "graph", "--json"]
                .into_iter()
                .map(String::from)
                .collect(),
        };
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| SyncError::GraphCommand("graph command is empty".to_owned()))?;

        let output = Command::new(program)
            .args(args)
            .current_dir(&self.project_dir)
            .output()
            .map_err(|err| SyncError::GraphCommand(format!("failed to run '{program}': {err}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SyncError::GraphCommand(format!(
                "'{program}' exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        parse_graph_json(&output.stdout)
    }
}

/// Parse pipenv's JSON node list into an adjacency map.
fn parse_graph_json(bytes: &[u8]) -> Result<DependencyGraph, SyncError> {
    let nodes: Vec<GraphNode> = serde_json::from_slice(bytes)
        .map_err(|err| SyncError::GraphCommand(format!("unparseable graph output: {err}")))?;

    let mut graph = DependencyGraph::default();
    for node in nodes {
        graph.insert(
            node.package.key.to_lowercase(),
            node.dependencies
                .into_iter()
                .map(|dep| dep.key.to_lowercase())
                .collect(),
        );
    }
    Ok(graph)
}
