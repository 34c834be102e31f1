//! Neighborhoods and move selection strategies.
//!
//! A [`Neighborhood`] enumerates the candidate moves of a schedule; a
//! [`SelectionStrategy`] walks them and picks one subject to an optional
//! acceptance predicate.

mod strategy;

use paintshop_config::NeighborhoodConfig;
use paintshop_core::Schedule;

use crate::heuristic::r#move::{
    Move, RelocateMove, SwapBatchMove, SwapMove, SwapQueuesMove,
};

pub use strategy::{
    Acceptance, BestStrategy, FirstStrategy, RandomStrategy, Selection, SelectionStrategy,
};

/// The move families a strategy draws from.
///
/// Moves are enumerated family by family in the order swap, relocate,
/// queue swap, batch swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighborhood {
    pub swap: bool,
    pub relocate: bool,
    pub swap_queues: bool,
    pub swap_batch: bool,
}

impl Neighborhood {
    /// Every local move family.
    pub fn all() -> Self {
        Self {
            swap: true,
            relocate: true,
            swap_queues: true,
            swap_batch: true,
        }
    }

    /// Single-order edits only.
    pub fn swap_and_relocate() -> Self {
        Self {
            swap: true,
            relocate: true,
            swap_queues: false,
            swap_batch: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.swap || self.relocate || self.swap_queues || self.swap_batch)
    }

    /// Lazily enumerates every enabled move for `schedule`.
    pub fn iter_moves(self, schedule: &Schedule) -> impl Iterator<Item = Move> + '_ {
        let swaps = self
            .swap
            .then(|| SwapMove::iter_moves(schedule).map(Move::from))
            .into_iter()
            .flatten();
        let relocations = self
            .relocate
            .then(|| RelocateMove::iter_moves(schedule).map(Move::from))
            .into_iter()
            .flatten();
        let queue_swaps = self
            .swap_queues
            .then(|| SwapQueuesMove::iter_moves(schedule).map(Move::from))
            .into_iter()
            .flatten();
        let batch_swaps = self
            .swap_batch
            .then(|| SwapBatchMove::iter_moves(schedule).map(Move::from))
            .into_iter()
            .flatten();
        swaps.chain(relocations).chain(queue_swaps).chain(batch_swaps)
    }

    pub fn moves(self, schedule: &Schedule) -> Vec<Move> {
        self.iter_moves(schedule).collect()
    }
}

impl Default for Neighborhood {
    fn default() -> Self {
        Self::all()
    }
}

impl From<NeighborhoodConfig> for Neighborhood {
    fn from(config: NeighborhoodConfig) -> Self {
        Self {
            swap: config.swap,
            relocate: config.relocate,
            swap_queues: config.swap_queues,
            swap_batch: config.swap_batch,
        }
    }
}
