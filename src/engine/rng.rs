//! Deterministic random number generation.
//!
//! Every stochastic operator in the crate draws from an explicitly passed
//! [`EvoRng`] handle. There is no global generator: given the same master
//! seed, a genetic run, an island run or a baseline heuristic replays
//! bitwise-identically.
//!
//! Islands get independent streams via [`EvoRng::partition`], so the order in
//! which islands consume randomness does not couple their sequences.

use rand::prelude::*;
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

/// Seeded PCG-64 handle threaded through every solver.
///
/// Cloning snapshots the stream: the clone replays the same draws.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvoRng {
    /// Seed every stream derives from.
    master_seed: u64,
    /// 0 for a master handle, 1.. for partitions.
    stream: u64,
    /// PCG-64 state.
    rng: Pcg64,
}

impl EvoRng {
    /// Master handle for `master_seed`, on stream 0.
    #[must_use]
    pub fn new(master_seed: u64) -> Self {
        let rng = Pcg64::seed_from_u64(master_seed);
        Self {
            master_seed,
            stream: 0,
            rng,
        }
    }

    /// Seed this handle was derived from.
    #[must_use]
    pub const fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Stream index of this handle.
    #[must_use]
    pub const fn stream(&self) -> u64 {
        self.stream
    }

    /// Create partitioned RNGs, one per independent consumer.
    ///
    /// Each partition gets a stream derived from the master seed, so the
    /// sequences do not depend on how the partitions are interleaved.
    ///
    /// # Example
    ///
    /// ```rust
    /// use longpath::engine::rng::EvoRng;
    ///
    /// let mut rng = EvoRng::new(42);
    /// let partitions = rng.partition(4);
    /// assert_eq!(partitions.len(), 4);
    /// ```
    #[must_use]
    pub fn partition(&mut self, n: usize) -> Vec<Self> {
        let partitions: Vec<Self> = (0..n)
            .map(|i| {
                // Stream 0 is the master itself; partitions start at 1.
                let stream = self.stream + 1 + i as u64;
                let seed = self
                    .master_seed
                    .wrapping_add(stream.wrapping_mul(0x9E37_79B9_7F4A_7C15));
                Self {
                    master_seed: self.master_seed,
                    stream,
                    rng: Pcg64::seed_from_u64(seed),
                }
            })
            .collect();

        self.stream += n as u64;
        partitions
    }

    /// Uniform draw in `[0, 1)`.
    pub fn gen_f64(&mut self) -> f64 {
        self.rng.gen()
    }

    /// Uniform `u64`.
    pub fn gen_u64(&mut self) -> u64 {
        self.rng.gen()
    }

    /// Bernoulli trial: `true` with probability `p`.
    ///
    /// `p <= 0` never fires and `p >= 1` always fires.
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.gen_f64() < p
    }

    /// Uniform index in `[0, n)`. Returns 0 when `n == 0`.
    pub fn gen_index(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Uniform integer in `[low, high)`.
    ///
    /// # Panics
    ///
    /// Panics if `low >= high`.
    pub fn gen_range_usize(&mut self, low: usize, high: usize) -> usize {
        assert!(low < high, "Invalid range: low >= high");
        self.rng.gen_range(low..high)
    }

    /// Pick a uniformly random element of a slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    /// Standard normal draw (Box-Muller).
    pub fn gen_standard_normal(&mut self) -> f64 {
        let u1 = self.gen_f64();
        let u2 = self.gen_f64();

        let u1 = if u1 < f64::EPSILON { f64::EPSILON } else { u1 };

        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }

    /// Normal draw with the given mean and standard deviation.
    pub fn gen_normal(&mut self, mean: f64, std: f64) -> f64 {
        mean + std * self.gen_standard_normal()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn draws(rng: &mut EvoRng, n: usize) -> Vec<u64> {
        (0..n).map(|_| rng.gen_u64()).collect()
    }

    #[test]
    fn test_seed_replays_draws() {
        let a = draws(&mut EvoRng::new(42), 64);
        let b = draws(&mut EvoRng::new(42), 64);
        assert_eq!(a, b);
        assert_ne!(a, draws(&mut EvoRng::new(43), 64));
    }

    #[test]
    fn test_island_streams_are_distinct_and_replayable() {
        let mut first = EvoRng::new(9);
        let mut second = EvoRng::new(9);
        let mut a = first.partition(9);
        let mut b = second.partition(9);

        let seqs: Vec<Vec<u64>> = a.iter_mut().map(|rng| draws(rng, 8)).collect();
        for (rng, expected) in b.iter_mut().zip(&seqs) {
            assert_eq!(&draws(rng, 8), expected);
        }

        let distinct: std::collections::HashSet<&Vec<u64>> = seqs.iter().collect();
        assert_eq!(distinct.len(), 9);
        assert_eq!(first.stream(), 9);
        assert_eq!(a[3].stream(), 4);
    }

    #[test]
    fn test_partition_differs_from_master() {
        let mut master = EvoRng::new(42);
        let mut partitions = master.partition(1);
        let mut fresh = EvoRng::new(42);
        assert_ne!(draws(&mut partitions[0], 10), draws(&mut fresh, 10));
    }

    #[test]
    fn test_second_partition_continues_stream_numbering() {
        let mut master = EvoRng::new(1);
        let early = master.partition(2);
        let late = master.partition(2);
        assert_eq!(early[1].stream(), 2);
        assert_eq!(late[0].stream(), 3);
    }

    #[test]
    fn test_gen_bool_edges() {
        let mut rng = EvoRng::new(7);
        for _ in 0..1000 {
            assert!(!rng.gen_bool(0.0));
            assert!(rng.gen_bool(1.0));
        }
    }

    #[test]
    fn test_gen_index_bounds() {
        let mut rng = EvoRng::new(42);
        assert_eq!(rng.gen_index(0), 0);
        for _ in 0..1000 {
            assert!(rng.gen_index(5) < 5);
        }
    }

    #[test]
    fn test_gen_range_usize_bounds() {
        let mut rng = EvoRng::new(42);
        for _ in 0..1000 {
            let v = rng.gen_range_usize(1, 4);
            assert!((1..4).contains(&v), "Value out of range: {v}");
        }
    }

    #[test]
    fn test_choose() {
        let mut rng = EvoRng::new(42);
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
        let items = [3, 5, 8];
        for _ in 0..100 {
            let picked = rng.choose(&items).copied();
            assert!(matches!(picked, Some(3 | 5 | 8)));
        }
    }

    #[test]
    fn test_annealing_scale_moments() {
        // |N(3, 1)| / 6 averages close to 0.5.
        let mut rng = EvoRng::new(42);
        let n = 10_000;
        let mean = (0..n)
            .map(|_| (rng.gen_normal(3.0, 1.0) / 6.0).abs())
            .sum::<f64>()
            / f64::from(n);
        assert!((mean - 0.5).abs() < 0.02, "mean {mean}");
    }

    #[test]
    fn test_clone_continues_identically() {
        let mut rng = EvoRng::new(42);
        rng.gen_u64();
        let mut cloned = rng.clone();
        assert_eq!(rng.gen_u64(), cloned.gen_u64());
        assert_eq!(cloned.master_seed(), 42);
    }

    #[test]
    fn test_serde_snapshot_resumes_stream() {
        let mut rng = EvoRng::new(5);
        rng.gen_u64();
        let snapshot = serde_json::to_string(&rng).unwrap();
        let mut restored: EvoRng = serde_json::from_str(&snapshot).unwrap();
        assert_eq!(draws(&mut rng, 4), draws(&mut restored, 4));
    }
}
