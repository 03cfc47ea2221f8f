//! The deterministic random stream of a simulation run.
//!
//! # Determinism strategy
//!
//! A run owns exactly one `SimRng`.  The scheduler's shuffles, every agent's
//! Bernoulli and Poisson draws, and the initial placement all pull from it in
//! a fixed order, so the same seed and configuration reproduce bit-identical
//! stage trajectories.  The stream is passed explicitly (`&mut SimRng`) from
//! the model into the scheduler and onward into each agent update; there is
//! no global generator.
//!
//! Independent runs of an ensemble each get their own `SimRng`, seeded from
//! draws on the ensemble's root stream made before any run starts.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Poisson};

/// Simulation-level RNG shared by the scheduler and all agent updates.
///
/// Intentionally not `Clone`: two copies of the same stream would silently
/// produce correlated draws.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
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

    /// `true` with probability `p` (clamped to [0, 1]).
    ///
    /// NaN is treated as 0.
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        if p.is_nan() {
            return false;
        }
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Draw from Poisson(`mean`), truncated to `u32`.
    ///
    /// A non-positive or non-finite mean yields 0 without consuming a draw.
    pub fn poisson(&mut self, mean: f64) -> u32 {
        if !(mean.is_finite() && mean > 0.0) {
            return 0;
        }
        match Poisson::new(mean) {
            Ok(dist) => {
                let v: f64 = dist.sample(&mut self.0);
                v.min(u32::MAX as f64) as u32
            }
            Err(_) => 0,
        }
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }

    /// `amount` distinct indices from `0..len`, uniformly without replacement.
    ///
    /// `amount` is capped at `len`.
    pub fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.0, len, amount.min(len)).into_vec()
    }
}
