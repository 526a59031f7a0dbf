// Random number generation.
//
// Two flavors, both over the `rand` crate: OS-entropy helpers for sampled
// consistency tests, and a seeded deterministic engine for reproducible
// failures.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::uint320::{U320, U320Ext};

/// Get a random u64 from OS entropy.
pub fn get_random_u64() -> u64 {
    rand::rng().random()
}

/// Get a random U320 from OS entropy.
pub fn get_random_u320() -> U320 {
    let mut rng = rand::rng();
    U320::from_limbs([
        rng.random(),
        rng.random(),
        rng.random(),
        rng.random(),
        rng.random(),
    ])
}

/// Deterministic RNG seeded from a u64, for reproducible tests.
pub struct DebugRng {
    inner: StdRng,
}

impl DebugRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    pub fn get_random_u64(&mut self) -> u64 {
        self.inner.random()
    }

    pub fn get_random_u320(&mut self) -> U320 {
        U320::from_limbs([
            self.inner.random(),
            self.inner.random(),
            self.inner.random(),
            self.inner.random(),
            self.inner.random(),
        ])
    }
}
