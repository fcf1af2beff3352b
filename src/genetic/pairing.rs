//! Single-edge-distance pairing.
//!
//! Two genomes are paired when one contains a vertex adjacent to the other.
//! Genomes are visited in population order and every visited genome claims
//! its vertices: later genomes cannot pair through a claimed vertex. This
//! bounds the number of pairs and favours genomes lying close together in
//! the graph.

use std::collections::{HashMap, HashSet, VecDeque};

use super::PairingOperator;
use crate::graph::{Graph, GraphPath, VertexId};

/// Pairing by adjacency through unclaimed vertices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SingleEdgeDistance;

impl PairingOperator for SingleEdgeDistance {
    fn pairs<'a>(
        &'a self,
        graph: &'a Graph,
        population: &'a [GraphPath],
    ) -> Box<dyn Iterator<Item = (usize, usize)> + 'a> {
        Box::new(SingleEdgePairs::new(graph, population))
    }
}

/// Single-pass iterator over `(current, partner)` index pairs.
///
/// A partner is emitted once per matching candidate vertex, so the same
/// pair can repeat.
#[derive(Debug)]
pub struct SingleEdgePairs<'a> {
    graph: &'a Graph,
    population: &'a [GraphPath],
    genomes_by_vertex: HashMap<VertexId, Vec<usize>>,
    introspected: HashSet<VertexId>,
    next_genome: usize,
    pending: VecDeque<(usize, usize)>,
}

impl<'a> SingleEdgePairs<'a> {
    /// Index `population` and start before its first genome.
    #[must_use]
    pub fn new(graph: &'a Graph, population: &'a [GraphPath]) -> Self {
        let mut genomes_by_vertex: HashMap<VertexId, Vec<usize>> = HashMap::new();
        for (idx, genome) in population.iter().enumerate() {
            for &id in genome.vertices() {
                genomes_by_vertex.entry(id).or_default().push(idx);
            }
        }

        Self {
            graph,
            population,
            genomes_by_vertex,
            introspected: HashSet::new(),
            next_genome: 0,
            pending: VecDeque::new(),
        }
    }

    /// Queue every pair for `current`, then claim its vertices.
    fn introspect(&mut self, current: usize) {
        let genome = &self.population[current];
        let own: HashSet<VertexId> = genome.vertices().iter().copied().collect();
        let mut seen = HashSet::new();

        for &id in genome.vertices() {
            for &candidate in self.graph.neighbours_of(id) {
                if own.contains(&candidate)
                    || self.introspected.contains(&candidate)
                    || !seen.insert(candidate)
                {
                    continue;
                }
                if let Some(partners) = self.genomes_by_vertex.get(&candidate) {
                    self.pending
                        .extend(partners.iter().map(|&partner| (current, partner)));
                }
            }
        }

        self.introspected.extend(own);
    }
}

impl Iterator for SingleEdgePairs<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(pair) = self.pending.pop_front() {
                return Some(pair);
            }
            if self.next_genome >= self.population.len() {
                return None;
            }
            let current = self.next_genome;
            self.next_genome += 1;
            self.introspect(current);
        }
    }
}
