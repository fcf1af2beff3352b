//! Single-edge crossover.
//!
//! Offspring are built by gluing a prefix of one parent to a prefix of the
//! other through a single edge, in all four orientations. Only structurally
//! valid results survive.

use std::collections::{HashMap, HashSet};

use super::CrossoverOperator;
use crate::graph::{Graph, GraphPath, VertexId};

/// Single-edge recombination of two parents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SingleEdgeCrossover;

/// The four concatenations of `left` and `right` with either side reversed.
fn joins(left: &[VertexId], right: &[VertexId]) -> [GraphPath; 4] {
    let left_rev: Vec<VertexId> = left.iter().rev().copied().collect();
    let right_rev: Vec<VertexId> = right.iter().rev().copied().collect();
    let concat = |a: &[VertexId], b: &[VertexId]| -> GraphPath {
        a.iter().chain(b).copied().collect()
    };

    [
        concat(left, right),
        concat(&left_rev, right),
        concat(left, &right_rev),
        concat(&left_rev, &right_rev),
    ]
}

impl CrossoverOperator for SingleEdgeCrossover {
    fn crossover(&self, graph: &Graph, first: &GraphPath, second: &GraphPath) -> Vec<GraphPath> {
        let p1 = first.vertices();
        let p2 = second.vertices();

        let mut position_in_second: HashMap<VertexId, usize> = HashMap::with_capacity(p2.len());
        for (idx, &id) in p2.iter().enumerate() {
            position_in_second.entry(id).or_insert(idx);
        }

        let mut candidates: Vec<GraphPath> = joins(p1, p2).into();

        for i in 1..p1.len().saturating_sub(1) {
            let mut seen = HashSet::new();
            for &n in graph.neighbours_of(p1[i]) {
                if !seen.insert(n) {
                    continue;
                }
                if let Some(&j) = position_in_second.get(&n) {
                    candidates.extend(joins(&p1[..=i], &p2[..=j]));
                }
            }
        }

        candidates.retain(|candidate| graph.is_valid(candidate));
        candidates
    }
}
