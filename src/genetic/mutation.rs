//! Tail-regrowth mutation.

use super::MutationOperator;
use crate::engine::rng::EvoRng;
use crate::graph::{Graph, GraphPath};

/// Cuts a genome at a random depth and regrows it with
/// [`Graph::random_modify`].
///
/// The number of skipped cut candidates is drawn uniformly from
/// `[1, len / 2)`; short genomes that leave that range empty use 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifyVertices;

impl ModifyVertices {
    /// Draw the cut depth for a genome of `len` vertices.
    pub fn cut_depth(len: usize, rng: &mut EvoRng) -> usize {
        let upper = len / 2;
        if upper > 1 {
            rng.gen_range_usize(1, upper)
        } else {
            1
        }
    }
}

impl MutationOperator for ModifyVertices {
    fn mutate(&self, graph: &Graph, genome: &GraphPath, rng: &mut EvoRng) -> GraphPath {
        let depth = Self::cut_depth(genome.len(), rng);
        graph.random_modify(genome, depth, rng)
    }
}
