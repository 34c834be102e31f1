//! RestartMove - replaces the schedule with a freshly constructed one.

use std::fmt;

use paintshop_core::{Position, Result, Schedule};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::construction::{Construction, Constructor};

/// Discards the schedule and builds a new one with `construction`.
///
/// The seed makes the result reproducible; a restart is a large
/// perturbation used for diversification, never a local edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RestartMove {
    construction: Construction,
    seed: u64,
}

impl RestartMove {
    pub fn new(construction: Construction, seed: u64) -> Self {
        Self { construction, seed }
    }

    pub fn construction(&self) -> Construction {
        self.construction
    }

    /// One restart per construction procedure, seeded from the schedule.
    pub fn enumerate(schedule: &Schedule) -> Vec<RestartMove> {
        let seed = schedule.fingerprint();
        Construction::ALL
            .iter()
            .map(|&construction| RestartMove::new(construction, seed))
            .collect()
    }

    pub fn apply(&self, schedule: &Schedule) -> Result<Schedule> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.construction.construct(schedule.instance(), &mut rng)
    }

    pub fn touches(&self, _position: Position) -> bool {
        true
    }
}

impl fmt::Display for RestartMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gnew: {}", self.construction)
    }
}
