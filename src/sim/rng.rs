use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Seedable source of independent standard-normal draws.
///
/// Wraps StdRng directly (concrete type, no Box<dyn Rng>) and is threaded
/// explicitly through the path simulator and ensemble driver. The state is
/// mutated sequentially, draw by draw: same seed, same parameters, same
/// ensemble.
pub struct NormalSource {
    rng: StdRng,
}

impl NormalSource {
    /// Deterministic source for reproducible runs and tests.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// OS-entropy source for normal operation.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// One draw z ~ N(0, 1).
    #[inline]
    pub fn next_normal(&mut self) -> f64 {
        self.rng.sample(StandardNormal)
    }

    /// Fill a buffer with independent N(0, 1) draws.
    pub fn fill_normal(&mut self, buf: &mut [f64]) {
        for slot in buf.iter_mut() {
            *slot = self.next_normal();
        }
    }
}
