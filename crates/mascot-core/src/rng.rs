//! Deterministic per-mascot RNG.
//!
//! Each mascot driver owns one `SmallRng` seeded by
//!
//!   seed = global_seed XOR (mascot_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive mascot IDs uniformly across the seed space.
//! Behavior selection, `Select` compounds, and `Math.random()` all draw from
//! this generator, so a fixed seed replays a run exactly.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::MascotId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

pub struct MascotRng(SmallRng);

impl MascotRng {
    /// Seed deterministically from the run's global seed and a mascot ID.
    pub fn new(global_seed: u64, mascot: MascotId) -> Self {
        let seed = global_seed ^ (mascot.0 as u64).wrapping_mul(MIXING_CONSTANT);
        MascotRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform `f64` in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f64 {
        self.0.r#gen()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
