//! One generation of the genetic search.

use std::collections::HashSet;
use std::fmt;

use super::{
    evaluate_population, fitness::rank_descending, log_sink, CrossoverOperator,
    ModifyVertices, MutationOperator, PairingOperator, ProgressSink, RouletteSelection,
    SelectionOperator, SingleEdgeCrossover, SingleEdgeDistance,
};
use crate::config::GeneticConfig;
use crate::engine::rng::EvoRng;
use crate::error::{EvoError, EvoResult};
use crate::graph::{Graph, GraphPath};

/// Number of elites kept for a population of `size`: at least one.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn elite_count(fraction: f64, size: usize) -> usize {
    let rounded = (fraction * size as f64).round();
    (rounded.max(0.0) as usize).max(1)
}

/// Keep the first genome of every canonical signature, in order.
#[must_use]
pub fn deduplicate(population: Vec<GraphPath>) -> Vec<GraphPath> {
    let mut seen = HashSet::with_capacity(population.len());
    population
        .into_iter()
        .filter(|genome| seen.insert(genome.signature()))
        .collect()
}

/// Runs selection, elitism, pairing, crossover, deduplication and mutation.
///
/// Each island owns one iterator, so operators can differ between islands.
pub struct GeneticIterator {
    config: GeneticConfig,
    selection: Box<dyn SelectionOperator>,
    pairing: Box<dyn PairingOperator>,
    crossover: Box<dyn CrossoverOperator>,
    mutation: Box<dyn MutationOperator>,
    sink: ProgressSink,
}

impl GeneticIterator {
    /// Iterator with the default operators and a `log::info!` sink.
    #[must_use]
    pub fn new(config: GeneticConfig) -> Self {
        Self {
            config,
            selection: Box::new(RouletteSelection {
                beta: config.selection_beta,
            }),
            pairing: Box::new(SingleEdgeDistance),
            crossover: Box::new(SingleEdgeCrossover),
            mutation: Box::new(ModifyVertices),
            sink: log_sink(),
        }
    }

    /// Replace the selection operator.
    #[must_use]
    pub fn with_selection(mut self, selection: impl SelectionOperator + 'static) -> Self {
        self.selection = Box::new(selection);
        self
    }

    /// Replace the pairing operator.
    #[must_use]
    pub fn with_pairing(mut self, pairing: impl PairingOperator + 'static) -> Self {
        self.pairing = Box::new(pairing);
        self
    }

    /// Replace the crossover operator.
    #[must_use]
    pub fn with_crossover(mut self, crossover: impl CrossoverOperator + 'static) -> Self {
        self.crossover = Box::new(crossover);
        self
    }

    /// Replace the mutation operator.
    #[must_use]
    pub fn with_mutation(mut self, mutation: impl MutationOperator + 'static) -> Self {
        self.mutation = Box::new(mutation);
        self
    }

    /// Send progress lines somewhere other than the log.
    #[must_use]
    pub fn with_sink(mut self, sink: ProgressSink) -> Self {
        self.sink = sink;
        self
    }

    /// Operator probabilities.
    #[must_use]
    pub const fn config(&self) -> &GeneticConfig {
        &self.config
    }

    /// Produce the next generation from `population`.
    ///
    /// Signatures are unique after the dedup stage; mutation runs afterwards
    /// and may produce genomes that collide again.
    ///
    /// # Errors
    ///
    /// Returns [`EvoError::PopulationExtinct`] when `population` is empty or
    /// the step leaves no genome behind.
    pub fn step(
        &self,
        graph: &Graph,
        generation: usize,
        population: &[GraphPath],
        rng: &mut EvoRng,
    ) -> EvoResult<Vec<GraphPath>> {
        let bred = self.breed(graph, generation, population, rng)?;

        let next: Vec<GraphPath> = bred
            .population
            .into_iter()
            .map(|genome| {
                if rng.gen_bool(self.config.mutation_probability) {
                    self.mutation.mutate(graph, &genome, rng)
                } else {
                    genome
                }
            })
            .collect();

        if next.is_empty() {
            return Err(EvoError::PopulationExtinct { generation });
        }

        (self.sink)(&format!(
            "[GEN: {generation}] Parent population: {}, Population: {}, Elite: {}",
            bred.parents,
            next.len(),
            bred.elites
        ));

        Ok(next)
    }

    /// Selection, elitism, pairing, crossover and dedup; everything but
    /// mutation.
    fn breed(
        &self,
        graph: &Graph,
        generation: usize,
        population: &[GraphPath],
        rng: &mut EvoRng,
    ) -> EvoResult<Bred> {
        if population.is_empty() {
            return Err(EvoError::PopulationExtinct { generation });
        }

        let scores = evaluate_population(population, self.config.parallel_fitness);
        let scored: Vec<(GraphPath, usize)> = population
            .iter()
            .cloned()
            .zip(scores.iter().copied())
            .collect();

        let parents = self.selection.select(graph, &scored, rng);

        let elites = elite_count(self.config.elite_fraction, population.len());
        let mut next: Vec<GraphPath> = rank_descending(&scores)
            .into_iter()
            .take(elites)
            .map(|idx| population[idx].clone())
            .collect();

        for (a, b) in self.pairing.pairs(graph, &parents) {
            if rng.gen_bool(self.config.crossover_probability) {
                next.extend(self.crossover.crossover(graph, &parents[a], &parents[b]));
            } else {
                next.push(parents[a].clone());
                next.push(parents[b].clone());
            }
        }

        Ok(Bred {
            population: deduplicate(next),
            parents: parents.len(),
            elites,
        })
    }
}

/// Pre-mutation output of one generation.
struct Bred {
    population: Vec<GraphPath>,
    parents: usize,
    elites: usize,
}

impl Default for GeneticIterator {
    fn default() -> Self {
        Self::new(GeneticConfig::default())
    }
}

impl fmt::Debug for GeneticIterator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneticIterator")
            .field("config", &self.config)
            .field("selection", &self.selection)
            .field("pairing", &self.pairing)
            .field("crossover", &self.crossover)
            .field("mutation", &self.mutation)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::genetic::silent_sink;

    fn ring(n: usize) -> Graph {
        let edges: Vec<_> = (0..n).map(|i| (i, (i + 1) % n)).collect();
        Graph::undirected(&edges).unwrap()
    }

    /// `w x h` grid; random walks dead-end at varying lengths.
    fn grid(w: usize, h: usize) -> Graph {
        let mut edges = Vec::new();
        for y in 0..h {
            for x in 0..w {
                let id = y * w + x;
                if x + 1 < w {
                    edges.push((id, id + 1));
                }
                if y + 1 < h {
                    edges.push((id, id + w));
                }
            }
        }
        Graph::undirected(&edges).unwrap()
    }

    fn seeded(graph: &Graph, size: usize, rng: &mut EvoRng) -> Vec<GraphPath> {
        (0..size).map(|_| graph.random_path(rng)).collect()
    }

    #[test]
    fn test_elite_count() {
        assert_eq!(elite_count(0.1, 20), 2);
        assert_eq!(elite_count(0.05, 10), 1);
        assert_eq!(elite_count(0.0, 50), 1);
        assert_eq!(elite_count(0.05, 30), 2);
        assert_eq!(elite_count(1.0, 7), 7);
    }

    #[test]
    fn test_deduplicate_keeps_first_representative() {
        let population = vec![
            GraphPath::from(vec![1, 2, 3]),
            GraphPath::from(vec![3, 2, 1]),
            GraphPath::from(vec![2, 3]),
            GraphPath::from(vec![1, 3, 2]),
        ];
        assert_eq!(
            deduplicate(population),
            vec![GraphPath::from(vec![1, 2, 3]), GraphPath::from(vec![2, 3])]
        );
    }

    #[test]
    fn test_deduplicate_does_not_alias_multi_digit_ids() {
        let population = vec![GraphPath::from(vec![1, 23]), GraphPath::from(vec![12, 3])];
        assert_eq!(deduplicate(population).len(), 2);
    }

    #[test]
    fn test_dedup_stage_signatures_unique_under_full_mutation() {
        let g = grid(3, 2);
        let config = GeneticConfig {
            mutation_probability: 1.0,
            ..GeneticConfig::default()
        };
        let iterator = GeneticIterator::new(config).with_sink(silent_sink());

        for seed in 0..50 {
            let mut rng = EvoRng::new(seed);
            let population = seeded(&g, 30, &mut rng);
            let bred = iterator.breed(&g, 0, &population, &mut rng).unwrap();
            let signatures: HashSet<_> =
                bred.population.iter().map(GraphPath::signature).collect();
            assert_eq!(signatures.len(), bred.population.len(), "seed {seed}");
        }
    }

    #[test]
    fn test_step_without_mutation_keeps_signatures_unique() {
        let g = grid(4, 4);
        let mut rng = EvoRng::new(42);
        let config = GeneticConfig {
            mutation_probability: 0.0,
            ..GeneticConfig::default()
        };
        let iterator = GeneticIterator::new(config).with_sink(silent_sink());
        let mut population = seeded(&g, 40, &mut rng);

        for generation in 0..10 {
            population = iterator.step(&g, generation, &population, &mut rng).unwrap();
            let signatures: HashSet<_> = population.iter().map(GraphPath::signature).collect();
            assert_eq!(signatures.len(), population.len());
        }
    }

    #[test]
    fn test_config_accessor_reflects_construction() {
        let config = GeneticConfig {
            elite_fraction: 0.25,
            ..GeneticConfig::default()
        };
        assert_eq!(GeneticIterator::new(config).config(), &config);
    }

    #[test]
    fn test_step_keeps_elite() {
        let g = ring(10);
        let mut rng = EvoRng::new(5);
        let best = GraphPath::from((0..10).collect::<Vec<_>>());
        let mut population: Vec<_> = (0..19)
            .map(|i| GraphPath::from(vec![i % 10, (i + 1) % 10]))
            .collect();
        population.push(best.clone());

        let config = GeneticConfig {
            mutation_probability: 0.0,
            ..GeneticConfig::default()
        };
        let iterator = GeneticIterator::new(config).with_sink(silent_sink());
        let next = iterator.step(&g, 0, &population, &mut rng).unwrap();
        assert_eq!(next[0], best);
    }

    #[test]
    fn test_step_without_crossover_copies_parents() {
        let g = ring(8);
        let mut rng = EvoRng::new(3);
        let population = seeded(&g, 20, &mut rng);
        let config = GeneticConfig {
            crossover_probability: 0.0,
            mutation_probability: 0.0,
            ..GeneticConfig::default()
        };
        let iterator = GeneticIterator::new(config).with_sink(silent_sink());
        let next = iterator.step(&g, 0, &population, &mut rng).unwrap();

        let originals: HashSet<_> = population.iter().map(GraphPath::signature).collect();
        assert!(next.iter().all(|g| originals.contains(&g.signature())));
    }

    #[test]
    fn test_step_empty_population_is_extinct() {
        let g = ring(4);
        let mut rng = EvoRng::new(1);
        let err = GeneticIterator::default()
            .with_sink(silent_sink())
            .step(&g, 7, &[], &mut rng)
            .unwrap_err();
        assert!(matches!(err, EvoError::PopulationExtinct { generation: 7 }));
    }

    #[test]
    fn test_step_reports_progress() {
        let g = grid(3, 3);
        let mut rng = EvoRng::new(2);
        let population = seeded(&g, 10, &mut rng);
        let lines = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&lines);
        let iterator = GeneticIterator::default()
            .with_sink(Arc::new(move |line: &str| {
                captured.lock().unwrap().push(line.to_string());
            }));

        let next = iterator.step(&g, 4, &population, &mut rng).unwrap();
        let lines = lines.lock().unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("[GEN: 4] Parent population: "));
        assert!(lines[0].contains(&format!("Population: {}, Elite: 1", next.len())));
    }

    #[test]
    fn test_step_is_deterministic() {
        let g = grid(5, 3);
        let run = |seed| {
            let mut rng = EvoRng::new(seed);
            let iterator = GeneticIterator::default().with_sink(silent_sink());
            let mut population = seeded(&g, 30, &mut rng);
            for generation in 0..5 {
                population = iterator.step(&g, generation, &population, &mut rng).unwrap();
            }
            population
        };
        assert_eq!(run(11), run(11));
    }
}
