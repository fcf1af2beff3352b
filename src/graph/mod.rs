//! Graph model and path primitives.
//!
//! The graph is an immutable adjacency list, stored exactly as given: an
//! edge `u -> v` exists iff `v` is listed among the neighbours of `u`. No
//! symmetrisation happens on construction, so asymmetric inputs keep their
//! direction.
//!
//! Neighbour ids with no matching vertex are tolerated. Every query treats
//! them as "no such neighbour", so a malformed input degrades into paths that
//! fail [`Graph::is_valid`] instead of a crash.
//!
//! # Example
//!
//! ```rust
//! use longpath::engine::rng::EvoRng;
//! use longpath::graph::{Graph, GraphPath};
//!
//! let graph = Graph::undirected(&[(1, 2), (2, 3), (3, 4), (4, 1), (2, 4)]).unwrap();
//! assert!(graph.is_valid(&GraphPath::from(vec![1, 2, 3, 4])));
//! assert!(!graph.is_valid(&GraphPath::from(vec![1, 3])));
//!
//! let mut rng = EvoRng::new(42);
//! let path = graph.random_path(&mut rng);
//! assert!(graph.is_valid(&path));
//! ```

pub mod codec;
pub mod io;

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::rng::EvoRng;
use crate::error::{EvoError, EvoResult};

pub use codec::{AllPaths, PathCodec};

/// Vertex identifier.
pub type VertexId = usize;

thread_local! {
    /// One validity scratch set per worker thread.
    static VALIDITY_SCRATCH: RefCell<HashSet<VertexId>> = RefCell::new(HashSet::new());
}

/// A vertex and its outgoing neighbour list, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vertex {
    /// Vertex identifier.
    pub id: VertexId,
    /// Neighbour identifiers (forward adjacency).
    pub neighbours: Vec<VertexId>,
}

impl Vertex {
    /// Create a vertex with the given neighbours.
    #[must_use]
    pub fn new(id: VertexId, neighbours: Vec<VertexId>) -> Self {
        Self { id, neighbours }
    }
}

/// An ordered, immutable sequence of vertex ids.
///
/// `len()` counts vertices, not edges. Two paths are equal iff their
/// sequences are identical in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraphPath {
    vertices: Vec<VertexId>,
}

impl GraphPath {
    /// Create a path from an id sequence.
    #[must_use]
    pub const fn new(vertices: Vec<VertexId>) -> Self {
        Self { vertices }
    }

    /// Number of vertices on the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the path has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The id sequence.
    #[must_use]
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    /// Whether the path visits `id`.
    #[must_use]
    pub fn contains(&self, id: VertexId) -> bool {
        self.vertices.contains(&id)
    }

    /// The same vertices in reverse order.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new(self.vertices.iter().rev().copied().collect())
    }

    /// Canonical signature: the sorted multiset of vertex ids.
    ///
    /// Paths visiting the same vertices in a different order share a
    /// signature.
    #[must_use]
    pub fn signature(&self) -> Vec<VertexId> {
        let mut sig = self.vertices.clone();
        sig.sort_unstable();
        sig
    }

    /// Consume the path, returning its id sequence.
    #[must_use]
    pub fn into_vec(self) -> Vec<VertexId> {
        self.vertices
    }
}

impl From<Vec<VertexId>> for GraphPath {
    fn from(vertices: Vec<VertexId>) -> Self {
        Self::new(vertices)
    }
}

impl FromIterator<VertexId> for GraphPath {
    fn from_iter<I: IntoIterator<Item = VertexId>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for GraphPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for id in &self.vertices {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{id}")?;
            first = false;
        }
        Ok(())
    }
}

/// Immutable graph with O(1) adjacency queries.
#[derive(Debug, Clone)]
pub struct Graph {
    vertices: Vec<Vertex>,
    /// id -> index into `vertices`.
    lookup: HashMap<VertexId, usize>,
    /// Forward edges `(u, v)` with `v ∈ neighbours(u)`.
    edges: HashSet<(VertexId, VertexId)>,
}

impl Graph {
    /// Build a graph from its vertices.
    ///
    /// # Errors
    ///
    /// Returns [`EvoError::EmptyGraph`] for an empty vertex set and
    /// [`EvoError::DuplicateVertex`] when an id is declared twice.
    pub fn new(vertices: Vec<Vertex>) -> EvoResult<Self> {
        if vertices.is_empty() {
            return Err(EvoError::EmptyGraph);
        }

        let mut lookup = HashMap::with_capacity(vertices.len());
        let mut edges = HashSet::new();
        for (idx, vertex) in vertices.iter().enumerate() {
            if lookup.insert(vertex.id, idx).is_some() {
                return Err(EvoError::DuplicateVertex(vertex.id));
            }
            for &n in &vertex.neighbours {
                edges.insert((vertex.id, n));
            }
        }

        Ok(Self {
            vertices,
            lookup,
            edges,
        })
    }

    /// Build a symmetric graph from an undirected edge list.
    ///
    /// Vertices are the edge endpoints in ascending id order. Self-loops
    /// register the vertex but add no edge.
    ///
    /// # Errors
    ///
    /// Returns [`EvoError::EmptyGraph`] when `edges` is empty.
    pub fn undirected(edges: &[(VertexId, VertexId)]) -> EvoResult<Self> {
        let ids: BTreeSet<VertexId> = edges.iter().flat_map(|&(u, v)| [u, v]).collect();
        let mut adjacency: HashMap<VertexId, Vec<VertexId>> =
            ids.iter().map(|&id| (id, Vec::new())).collect();

        for &(u, v) in edges {
            if u == v {
                continue;
            }
            for (a, b) in [(u, v), (v, u)] {
                if let Some(list) = adjacency.get_mut(&a) {
                    if !list.contains(&b) {
                        list.push(b);
                    }
                }
            }
        }

        let vertices = ids
            .into_iter()
            .map(|id| Vertex::new(id, adjacency.remove(&id).unwrap_or_default()))
            .collect();
        Self::new(vertices)
    }

    /// Number of vertices (the maximum possible fitness).
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Vertices in construction order.
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Whether `id` is a vertex of the graph.
    #[must_use]
    pub fn contains(&self, id: VertexId) -> bool {
        self.lookup.contains_key(&id)
    }

    /// Neighbours of `id` as listed in the input; empty for unknown ids.
    #[must_use]
    pub fn neighbours_of(&self, id: VertexId) -> &[VertexId] {
        self.lookup
            .get(&id)
            .map_or(&[], |&idx| self.vertices[idx].neighbours.as_slice())
    }

    /// Whether the forward edge `u -> v` exists and both ends are vertices.
    #[must_use]
    pub fn has_edge(&self, u: VertexId, v: VertexId) -> bool {
        self.contains(v) && self.edges.contains(&(u, v))
    }

    /// Edges `(u, v)` whose target `v` is not a vertex of the graph.
    #[must_use]
    pub fn dangling_neighbours(&self) -> Vec<(VertexId, VertexId)> {
        self.vertices
            .iter()
            .flat_map(|vertex| {
                vertex
                    .neighbours
                    .iter()
                    .filter(|&&n| !self.contains(n))
                    .map(move |&n| (vertex.id, n))
            })
            .collect()
    }

    /// Sample a random maximal walk without revisits.
    ///
    /// Starts at a uniformly random vertex and keeps moving to a uniformly
    /// random unvisited neighbour until none is left. The result is always a
    /// simple path; it has length 1 when the start vertex has no usable
    /// neighbour.
    pub fn random_path(&self, rng: &mut EvoRng) -> GraphPath {
        let start = self.vertices[rng.gen_index(self.vertices.len())].id;
        let mut path = vec![start];
        let mut visited = HashSet::from([start]);
        self.extend_walk(&mut path, &mut visited, 0.0, rng);
        GraphPath::new(path)
    }

    /// Check that `path` is a simple path of at least two vertices.
    ///
    /// Uses this thread's scratch set, so concurrent callers on different
    /// threads never share state.
    #[must_use]
    pub fn is_valid(&self, path: &GraphPath) -> bool {
        VALIDITY_SCRATCH.with(|scratch| self.is_valid_with(path, &mut scratch.borrow_mut()))
    }

    /// [`Graph::is_valid`] with a caller-owned scratch set.
    ///
    /// The set is cleared before use.
    pub fn is_valid_with(&self, path: &GraphPath, scratch: &mut HashSet<VertexId>) -> bool {
        if path.len() < 2 {
            return false;
        }

        scratch.clear();
        for &id in path.vertices() {
            if !self.contains(id) || !scratch.insert(id) {
                return false;
            }
        }

        path.vertices()
            .windows(2)
            .all(|pair| self.has_edge(pair[0], pair[1]))
    }

    /// Cut `path` near its end and regrow it randomly.
    ///
    /// Positions are scanned from the end toward the start. A position is a
    /// candidate cut when its vertex still has a neighbour outside the prefix
    /// ending there. The first `max_modify_vertices` candidates are skipped
    /// and the path is cut at the next one, then extended with the same walk
    /// as [`Graph::random_path`]. Each extension stops early with probability
    /// `1 / (2 * path.len())` once the new path has more than one vertex.
    ///
    /// Without a candidate cut a fresh random path is returned.
    pub fn random_modify(
        &self,
        path: &GraphPath,
        max_modify_vertices: usize,
        rng: &mut EvoRng,
    ) -> GraphPath {
        let ids = path.vertices();

        let mut first_position: HashMap<VertexId, usize> = HashMap::with_capacity(ids.len());
        for (idx, &id) in ids.iter().enumerate() {
            first_position.entry(id).or_insert(idx);
        }

        let cut = (0..ids.len())
            .rev()
            .filter(|&i| {
                self.neighbours_of(ids[i]).iter().any(|&n| {
                    self.contains(n) && first_position.get(&n).map_or(true, |&pos| pos > i)
                })
            })
            .nth(max_modify_vertices);

        let Some(cut) = cut else {
            return self.random_path(rng);
        };

        let mut prefix = ids[..=cut].to_vec();
        let mut visited: HashSet<VertexId> = prefix.iter().copied().collect();
        let stop_probability = 1.0 / (2.0 * ids.len() as f64);
        self.extend_walk(&mut prefix, &mut visited, stop_probability, rng);
        GraphPath::new(prefix)
    }

    /// Grow `path` from its last vertex through unvisited neighbours.
    fn extend_walk(
        &self,
        path: &mut Vec<VertexId>,
        visited: &mut HashSet<VertexId>,
        stop_probability: f64,
        rng: &mut EvoRng,
    ) {
        while let Some(&current) = path.last() {
            if stop_probability > 0.0 && path.len() > 1 && rng.gen_bool(stop_probability) {
                break;
            }

            let candidates: Vec<VertexId> = self
                .neighbours_of(current)
                .iter()
                .copied()
                .filter(|&n| self.contains(n) && !visited.contains(&n))
                .collect();

            let Some(&next) = rng.choose(&candidates) else {
                break;
            };
            visited.insert(next);
            path.push(next);
        }
    }
}
