use std::fmt::Debug;
use std::sync::Mutex;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::bands::ScoreBand;

/// Chooses where inside a score band a candidate lands.
pub trait BandPlacement: Debug + Send + Sync {
    fn place(&self, band: ScoreBand) -> f64;
}

/// Reproducible placement at the centre of the band.
#[derive(Debug, Default, Clone, Copy)]
pub struct Midpoint;

impl BandPlacement for Midpoint {
    fn place(&self, band: ScoreBand) -> f64 {
        band.midpoint()
    }
}

/// Uniform placement within the band for presentation variety. Seeding makes a
/// sequence of draws repeatable.
#[derive(Debug)]
pub struct SeededJitter {
    rng: Mutex<ChaCha8Rng>,
}

impl SeededJitter {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::from_entropy()),
        }
    }
}

impl BandPlacement for SeededJitter {
    fn place(&self, band: ScoreBand) -> f64 {
        match self.rng.lock() {
            Ok(mut rng) => rng.gen_range(band.floor..=band.ceiling),
            Err(_) => band.midpoint(),
        }
    }
}
