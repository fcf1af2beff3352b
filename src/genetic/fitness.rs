//! Fitness of a genome: the number of vertices it visits.
//!
//! Evaluation is a pure function over read-only data, so a population can be
//! scored on the rayon pool without any locking.

use rayon::prelude::*;

use crate::graph::GraphPath;

/// Fitness score (vertex count).
pub type Fitness = usize;

/// Fitness of a single path.
#[must_use]
pub fn fitness(path: &GraphPath) -> Fitness {
    path.len()
}

/// Score every genome, in population order.
#[must_use]
pub fn evaluate_population(population: &[GraphPath], parallel: bool) -> Vec<Fitness> {
    if parallel {
        population.par_iter().map(fitness).collect()
    } else {
        population.iter().map(fitness).collect()
    }
}

/// Indices ordered by descending fitness; ties keep population order.
#[must_use]
pub fn rank_descending(scores: &[Fitness]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].cmp(&scores[a]));
    order
}

/// First genome with the highest fitness.
#[must_use]
pub fn fittest(population: &[GraphPath]) -> Option<&GraphPath> {
    population.iter().fold(None, |best, genome| match best {
        Some(current) if fitness(current) >= fitness(genome) => Some(current),
        _ => Some(genome),
    })
}
