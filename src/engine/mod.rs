//! Execution primitives shared by every solver.
//!
//! Currently the deterministic RNG: one master seed, partitioned into
//! independent PCG streams so islands never share random state.

pub mod rng;

pub use rng::EvoRng;
