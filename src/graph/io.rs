//! Text formats for graphs and paths.
//!
//! Graph: one line per vertex, whitespace-separated integers; the first is
//! the vertex id, the rest its neighbours. Blank lines are skipped.
//!
//! Path: whitespace-separated vertex ids in visiting order.

use std::path::Path;
use std::str::FromStr;

use super::{Graph, GraphPath, Vertex, VertexId};
use crate::error::{EvoError, EvoResult};

fn parse_id(token: &str, line: usize) -> EvoResult<VertexId> {
    token
        .parse()
        .map_err(|e| EvoError::parse(line, format!("invalid vertex id '{token}': {e}")))
}

/// Parse a graph from adjacency-list text.
///
/// # Errors
///
/// Returns [`EvoError::Parse`] for non-integer tokens, and the
/// [`Graph::new`] errors for empty or duplicate vertex sets.
pub fn parse_graph(text: &str) -> EvoResult<Graph> {
    let mut vertices = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let mut tokens = line.split_whitespace();
        let Some(first) = tokens.next() else {
            continue;
        };
        let id = parse_id(first, idx + 1)?;
        let neighbours = tokens
            .map(|token| parse_id(token, idx + 1))
            .collect::<EvoResult<Vec<_>>>()?;
        vertices.push(Vertex::new(id, neighbours));
    }

    Graph::new(vertices)
}

/// Parse a path from whitespace-separated ids.
///
/// # Errors
///
/// Returns [`EvoError::Parse`] for non-integer tokens or an empty input.
pub fn parse_path(text: &str) -> EvoResult<GraphPath> {
    let mut ids = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        for token in line.split_whitespace() {
            ids.push(parse_id(token, idx + 1)?);
        }
    }

    if ids.is_empty() {
        return Err(EvoError::parse(1, "path is empty"));
    }
    Ok(GraphPath::new(ids))
}

/// Render a graph back into adjacency-list text.
#[must_use]
pub fn format_graph(graph: &Graph) -> String {
    let mut out = String::new();
    for vertex in graph.vertices() {
        out.push_str(&vertex.id.to_string());
        for n in &vertex.neighbours {
            out.push(' ');
            out.push_str(&n.to_string());
        }
        out.push('\n');
    }
    out
}

/// Read and parse a graph file.
///
/// # Errors
///
/// Returns [`EvoError::Io`] if the file cannot be read, otherwise as
/// [`parse_graph`].
pub fn load_graph<P: AsRef<Path>>(path: P) -> EvoResult<Graph> {
    let content = std::fs::read_to_string(path)?;
    parse_graph(&content)
}

/// Read and parse a path file.
///
/// # Errors
///
/// Returns [`EvoError::Io`] if the file cannot be read, otherwise as
/// [`parse_path`].
pub fn load_path<P: AsRef<Path>>(path: P) -> EvoResult<GraphPath> {
    let content = std::fs::read_to_string(path)?;
    parse_path(&content)
}

impl FromStr for Graph {
    type Err = EvoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_graph(s)
    }
}

impl FromStr for GraphPath {
    type Err = EvoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_path(s)
    }
}
