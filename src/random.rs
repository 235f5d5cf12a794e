//! Seeded random number generation.
//!
//! Every run owns exactly one generator, created here and threaded by
//! `&mut` through initialization, selection, crossover, and mutation.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic RNG from a seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
