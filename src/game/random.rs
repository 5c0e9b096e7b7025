use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the single uniform draw a fight needs.
pub trait RandomSource {
    /// Uniform value in `[0, 1)`.
    fn draw(&mut self) -> f64;
}

/// `RandomSource` backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl RngSource<StdRng> {
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }

    /// Reproducible sequence of draws.
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn draw(&mut self) -> f64 {
        self.0.gen_range(0.0..1.0)
    }
}
