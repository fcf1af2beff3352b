//! Mixed-radix path codec.
//!
//! A vertex sequence is read as the digits of an integer in base
//! `|V| + 1`, most significant first. Digit 0 is an empty slot; digit `k`
//! stands for the `k`-th vertex of the codec alphabet (the graph's ids in
//! ascending order, so on a graph with ids `0..|V|` digit `k` is id `k - 1`).
//!
//! Counting through the integers therefore walks every candidate sequence in
//! a fixed total order. [`PathCodec::next`] steps to the next valid simple
//! path in that order and [`Graph::all_paths`] enumerates all of them, which
//! is only practical on small graphs but gives an exact reference.

use std::collections::HashMap;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};

use super::{Graph, GraphPath, VertexId};
use crate::error::{EvoError, EvoResult};

/// Encoder/decoder between vertex sequences and big integers.
#[derive(Debug, Clone)]
pub struct PathCodec {
    /// Digit `k` (1-based) maps to `alphabet[k - 1]`.
    alphabet: Vec<VertexId>,
    /// Inverse of `alphabet`, already shifted to digit values.
    digit_of: HashMap<VertexId, u32>,
    radix: BigUint,
    max_path: BigUint,
}

impl PathCodec {
    /// Build the codec for `graph`.
    #[must_use]
    pub fn new(graph: &Graph) -> Self {
        let mut alphabet: Vec<VertexId> = graph.vertices().iter().map(|v| v.id).collect();
        alphabet.sort_unstable();

        let digit_of: HashMap<VertexId, u32> = alphabet
            .iter()
            .zip(1u32..)
            .map(|(&id, digit)| (id, digit))
            .collect();

        let radix = BigUint::from(alphabet.len()) + 1u32;
        let max_path = (1..=alphabet.len())
            .rev()
            .fold(BigUint::zero(), |acc, digit| acc * &radix + digit);

        Self {
            alphabet,
            digit_of,
            radix,
            max_path,
        }
    }

    /// Numeric base, `|V| + 1`.
    #[must_use]
    pub fn radix(&self) -> &BigUint {
        &self.radix
    }

    /// Encoding of the digit sequence `[|V|, |V| - 1, …, 1]`.
    ///
    /// No simple path encodes above it; it is the wrap-around modulus.
    #[must_use]
    pub fn max_path(&self) -> &BigUint {
        &self.max_path
    }

    /// Encode a path as an integer.
    ///
    /// # Errors
    ///
    /// Returns [`EvoError::UnknownVertex`] if the path references an id the
    /// graph does not contain.
    pub fn encode(&self, path: &GraphPath) -> EvoResult<BigUint> {
        path.vertices().iter().try_fold(BigUint::zero(), |acc, id| {
            let digit = self.digit_of.get(id).ok_or(EvoError::UnknownVertex(*id))?;
            Ok(acc * &self.radix + *digit)
        })
    }

    /// Digits of `n` in the codec base, most significant first.
    ///
    /// Zero has no digits.
    #[must_use]
    pub fn digits(&self, n: &BigUint) -> Vec<usize> {
        let mut digits = Vec::new();
        let mut rest = n.clone();
        while !rest.is_zero() {
            let (quotient, remainder) = rest.div_rem(&self.radix);
            digits.push(remainder.to_usize().unwrap_or(0));
            rest = quotient;
        }
        digits.reverse();
        digits
    }

    /// Decode an integer into a vertex sequence.
    ///
    /// Returns `None` for zero and for numbers with a zero digit anywhere,
    /// since a path cannot contain an empty slot. The result is not checked
    /// against the graph's edges.
    #[must_use]
    pub fn decode(&self, n: &BigUint) -> Option<GraphPath> {
        let digits = self.digits(n);
        if digits.is_empty() {
            return None;
        }
        digits
            .into_iter()
            .map(|digit| digit.checked_sub(1).and_then(|i| self.alphabet.get(i).copied()))
            .collect::<Option<Vec<_>>>()
            .map(GraphPath::new)
    }

    /// The next valid simple path after `path` in codec order.
    ///
    /// Increments modulo [`PathCodec::max_path`] until a decode passes
    /// [`Graph::is_valid`]. Gives up after one full wrap, returning
    /// `Ok(None)` when the graph has no valid path at all.
    ///
    /// # Errors
    ///
    /// Returns [`EvoError::UnknownVertex`] if `path` cannot be encoded.
    pub fn next(&self, graph: &Graph, path: &GraphPath) -> EvoResult<Option<GraphPath>> {
        let mut n = self.encode(path)? % &self.max_path;
        let mut remaining = self.max_path.clone();

        while !remaining.is_zero() {
            n = (n + 1u32) % &self.max_path;
            remaining -= 1u32;

            if let Some(candidate) = self.decode(&n) {
                if graph.is_valid(&candidate) {
                    return Ok(Some(candidate));
                }
            }
        }

        Ok(None)
    }
}

/// Lazy enumeration of every valid simple path, in codec order.
///
/// Created by [`Graph::all_paths`]; each call starts a fresh enumeration.
#[derive(Debug)]
pub struct AllPaths<'g> {
    graph: &'g Graph,
    codec: PathCodec,
    current: BigUint,
}

impl Iterator for AllPaths<'_> {
    type Item = GraphPath;

    fn next(&mut self) -> Option<Self::Item> {
        while self.current <= *self.codec.max_path() {
            let candidate = self.codec.decode(&self.current);
            self.current += 1u32;

            if let Some(path) = candidate {
                if self.graph.is_valid(&path) {
                    return Some(path);
                }
            }
        }
        None
    }
}

impl Graph {
    /// Codec over this graph's vertex alphabet.
    #[must_use]
    pub fn codec(&self) -> PathCodec {
        PathCodec::new(self)
    }

    /// The next valid simple path after `path` in codec order.
    ///
    /// Builds a codec per call; hold a [`PathCodec`] when stepping
    /// repeatedly.
    ///
    /// # Errors
    ///
    /// Returns [`EvoError::UnknownVertex`] if `path` cannot be encoded.
    pub fn next_path(&self, path: &GraphPath) -> EvoResult<Option<GraphPath>> {
        self.codec().next(self, path)
    }

    /// Enumerate every valid simple path by counting from 1 to
    /// `max_path` inclusive.
    #[must_use]
    pub fn all_paths(&self) -> AllPaths<'_> {
        AllPaths {
            graph: self,
            codec: self.codec(),
            current: BigUint::one(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::graph::Vertex;
    use std::collections::HashSet;

    fn zero_based_triangle() -> Graph {
        Graph::undirected(&[(0, 1), (1, 2), (2, 0)]).unwrap()
    }

    fn diamond() -> Graph {
        Graph::undirected(&[(1, 2), (2, 3), (3, 4), (4, 1), (2, 4)]).unwrap()
    }

    /// Brute-force DFS count of simple paths with at least two vertices.
    fn dfs_count(graph: &Graph) -> usize {
        fn walk(graph: &Graph, path: &mut Vec<VertexId>, seen: &mut HashSet<VertexId>) -> usize {
            let mut count = usize::from(path.len() >= 2);
            let last = path[path.len() - 1];
            for &n in graph.neighbours_of(last) {
                if graph.contains(n) && seen.insert(n) {
                    path.push(n);
                    count += walk(graph, path, seen);
                    path.pop();
                    seen.remove(&n);
                }
            }
            count
        }

        graph
            .vertices()
            .iter()
            .map(|v| walk(graph, &mut vec![v.id], &mut HashSet::from([v.id])))
            .sum()
    }

    #[test]
    fn test_encode_zero_based_digits() {
        let g = zero_based_triangle();
        let codec = g.codec();
        assert_eq!(codec.radix(), &BigUint::from(4u32));
        // [0, 2, 1] -> digits [1, 3, 2] -> 1*16 + 3*4 + 2
        let n = codec.encode(&GraphPath::from(vec![0, 2, 1])).unwrap();
        assert_eq!(n, BigUint::from(30u32));
        assert_eq!(codec.digits(&n), vec![1, 3, 2]);
    }

    #[test]
    fn test_max_path_is_descending_digits() {
        let codec = zero_based_triangle().codec();
        // digits [3, 2, 1] in base 4
        assert_eq!(codec.max_path(), &BigUint::from(57u32));
        assert_eq!(codec.decode(codec.max_path()), Some(GraphPath::from(vec![2, 1, 0])));
    }

    #[test]
    fn test_decode_rejects_gaps_and_zero() {
        let codec = zero_based_triangle().codec();
        assert_eq!(codec.decode(&BigUint::zero()), None);
        // digits [1, 0] has an empty trailing slot
        assert_eq!(codec.decode(&BigUint::from(4u32)), None);
        // digits [2, 0, 1] has an interior gap
        assert_eq!(codec.decode(&BigUint::from(33u32)), None);
    }

    #[test]
    fn test_encode_unknown_vertex() {
        let codec = zero_based_triangle().codec();
        let err = codec.encode(&GraphPath::from(vec![0, 7])).unwrap_err();
        assert!(matches!(err, EvoError::UnknownVertex(7)));
    }

    #[test]
    fn test_sparse_ids_are_representable() {
        let g = diamond();
        let codec = g.codec();
        let path = GraphPath::from(vec![4, 1, 2]);
        let n = codec.encode(&path).unwrap();
        assert_eq!(codec.decode(&n), Some(path));
    }

    #[test]
    fn test_next_path_advances_in_order() {
        let g = zero_based_triangle();
        let codec = g.codec();
        let start = GraphPath::from(vec![0, 1]);
        let next = codec.next(&g, &start).unwrap().unwrap();
        // digits [1, 2] -> [1, 3], i.e. the path 0 -> 2
        assert_eq!(next, GraphPath::from(vec![0, 2]));
        assert!(codec.encode(&next).unwrap() > codec.encode(&start).unwrap());
    }

    #[test]
    fn test_next_path_wraps_around() {
        let g = zero_based_triangle();
        let last = GraphPath::from(vec![2, 1, 0]);
        let first = g.all_paths().next().unwrap();
        assert_eq!(g.next_path(&last).unwrap(), Some(first));
    }

    #[test]
    fn test_next_path_without_edges() {
        let g = Graph::new(vec![Vertex::new(0, vec![]), Vertex::new(1, vec![])]).unwrap();
        assert_eq!(g.next_path(&GraphPath::from(vec![0])).unwrap(), None);
        assert_eq!(g.all_paths().count(), 0);
    }

    #[test]
    fn test_all_paths_matches_dfs() {
        for g in [zero_based_triangle(), diamond()] {
            let enumerated: Vec<_> = g.all_paths().collect();
            assert_eq!(enumerated.len(), dfs_count(&g));
            assert!(enumerated.iter().all(|p| g.is_valid(p)));
        }
    }

    #[test]
    fn test_all_paths_matches_dfs_on_directed_graph() {
        let g = Graph::new(vec![
            Vertex::new(0, vec![1, 2]),
            Vertex::new(1, vec![2]),
            Vertex::new(2, vec![3]),
            Vertex::new(3, vec![0, 5]),
        ])
        .unwrap();
        assert_eq!(g.all_paths().count(), dfs_count(&g));
    }

    #[test]
    fn test_all_paths_is_fresh_each_call() {
        let g = diamond();
        let first: Vec<_> = g.all_paths().collect();
        let second: Vec<_> = g.all_paths().collect();
        assert_eq!(first, second);
        let unique: HashSet<_> = first.iter().collect();
        assert_eq!(unique.len(), first.len());
    }

    #[test]
    fn test_longest_enumerated_path_is_hamiltonian() {
        let g = diamond();
        let longest = g.all_paths().map(|p| p.len()).max();
        assert_eq!(longest, Some(4));
    }
}
