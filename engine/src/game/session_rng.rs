use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::Fruit;
use crate::identifiers::LevelId;

/// Seeded source for grid generation; the same seed always yields the same grid.
pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn random_seed() -> u64 {
        rand::rng().random()
    }

    /// Mixes a run seed with a level id (splitmix64 finaliser) so every level of a
    /// seeded run gets its own board while the run stays reproducible.
    pub fn derive_seed(run_seed: u64, level_id: LevelId) -> u64 {
        let mut z = run_seed ^ (level_id.get() as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15);
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform over the first `fruit_count` catalog fruits.
    pub fn pick_fruit(&mut self, fruit_count: usize) -> Fruit {
        let available = Fruit::available(fruit_count.max(1));
        available[self.random_range(0..available.len())]
    }

    pub fn random_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distr::uniform::SampleUniform,
        R: rand::distr::uniform::SampleRange<T>,
    {
        self.rng.random_range(range)
    }
}
