//! Move selection strategies.

use std::fmt::Debug;

use paintshop_core::{Result, Schedule};
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::trace;

use super::Neighborhood;
use crate::heuristic::r#move::Move;
use crate::stats::SearchStats;

/// Acceptance predicate over a candidate's resulting schedule.
pub type Acceptance<'a> = &'a dyn Fn(&Schedule) -> bool;

/// A chosen move together with the schedule it produces.
#[derive(Debug, Clone)]
pub struct Selection {
    pub mv: Move,
    pub schedule: Schedule,
}

/// Picks one move of a neighborhood.
///
/// Returning `Ok(None)` means no move satisfied the predicate; it is a
/// termination signal, not an error.
pub trait SelectionStrategy: Debug {
    /// Selects a move from the neighborhood of `schedule`.
    ///
    /// Without a predicate every candidate is acceptable.
    fn select(
        &mut self,
        schedule: &Schedule,
        is_acceptable: Option<Acceptance<'_>>,
        stats: &mut SearchStats,
    ) -> Result<Option<Selection>>;

    fn neighborhood(&self) -> Neighborhood;

    fn name(&self) -> &'static str;
}

impl<S: SelectionStrategy + ?Sized> SelectionStrategy for Box<S> {
    fn select(
        &mut self,
        schedule: &Schedule,
        is_acceptable: Option<Acceptance<'_>>,
        stats: &mut SearchStats,
    ) -> Result<Option<Selection>> {
        (**self).select(schedule, is_acceptable, stats)
    }

    fn neighborhood(&self) -> Neighborhood {
        (**self).neighborhood()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

fn accepts(is_acceptable: Option<Acceptance<'_>>, schedule: &Schedule) -> bool {
    is_acceptable.map_or(true, |accept| accept(schedule))
}

/// Returns the first acceptable move in enumeration order.
///
/// Enumeration is lazy: moves past the selected one are never built.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstStrategy {
    neighborhood: Neighborhood,
}

impl FirstStrategy {
    pub fn new(neighborhood: Neighborhood) -> Self {
        Self { neighborhood }
    }
}

impl SelectionStrategy for FirstStrategy {
    fn select(
        &mut self,
        schedule: &Schedule,
        is_acceptable: Option<Acceptance<'_>>,
        stats: &mut SearchStats,
    ) -> Result<Option<Selection>> {
        for mv in self.neighborhood.iter_moves(schedule) {
            let next = mv.apply(schedule)?;
            let accepted = accepts(is_acceptable, &next);
            stats.record_move(accepted);
            if accepted {
                return Ok(Some(Selection { mv, schedule: next }));
            }
        }
        trace!(event = "exhausted", strategy = "first");
        Ok(None)
    }

    fn neighborhood(&self) -> Neighborhood {
        self.neighborhood
    }

    fn name(&self) -> &'static str {
        "first"
    }
}

/// Returns the cheapest acceptable move of the whole neighborhood.
///
/// Ties go to the move enumerated first.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestStrategy {
    neighborhood: Neighborhood,
}

impl BestStrategy {
    pub fn new(neighborhood: Neighborhood) -> Self {
        Self { neighborhood }
    }
}

impl SelectionStrategy for BestStrategy {
    fn select(
        &mut self,
        schedule: &Schedule,
        is_acceptable: Option<Acceptance<'_>>,
        stats: &mut SearchStats,
    ) -> Result<Option<Selection>> {
        let mut best: Option<Selection> = None;
        let mut evaluated = 0u64;
        for mv in self.neighborhood.iter_moves(schedule) {
            let next = mv.apply(schedule)?;
            evaluated += 1;
            let accepted = accepts(is_acceptable, &next);
            stats.record_move(accepted);
            if !accepted {
                continue;
            }
            let improves = best
                .as_ref()
                .map_or(true, |b| next.total_cost() < b.schedule.total_cost());
            if improves {
                best = Some(Selection { mv, schedule: next });
            }
        }
        trace!(
            event = "evaluated",
            strategy = "best",
            evaluated,
            found = best.is_some(),
        );
        Ok(best)
    }

    fn neighborhood(&self) -> Neighborhood {
        self.neighborhood
    }

    fn name(&self) -> &'static str {
        "best"
    }
}

/// Returns the first acceptable move of a shuffled neighborhood.
///
/// The random source is owned by the strategy, so a fixed seed reproduces
/// the same choices.
///
/// # Example
///
/// ```
/// use paintshop_solver::heuristic::selector::{Neighborhood, RandomStrategy, SelectionStrategy};
///
/// let strategy = RandomStrategy::new(Neighborhood::all(), 420);
/// assert_eq!(strategy.name(), "random");
/// assert_eq!(strategy.neighborhood(), Neighborhood::all());
/// ```
#[derive(Debug, Clone)]
pub struct RandomStrategy<R = ChaCha8Rng> {
    neighborhood: Neighborhood,
    rng: R,
}

impl RandomStrategy<ChaCha8Rng> {
    /// Creates a strategy drawing from a ChaCha8 generator seeded with `seed`.
    pub fn new(neighborhood: Neighborhood, seed: u64) -> Self {
        Self::with_rng(neighborhood, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomStrategy<R> {
    pub fn with_rng(neighborhood: Neighborhood, rng: R) -> Self {
        Self { neighborhood, rng }
    }

    /// The random source, shared with callers that need extra draws.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

impl<R: Rng + Debug> SelectionStrategy for RandomStrategy<R> {
    fn select(
        &mut self,
        schedule: &Schedule,
        is_acceptable: Option<Acceptance<'_>>,
        stats: &mut SearchStats,
    ) -> Result<Option<Selection>> {
        let mut moves = self.neighborhood.moves(schedule);
        trace!(event = "neighborhood", strategy = "random", size = moves.len());

        let Some(accept) = is_acceptable else {
            // Without a predicate the first shuffled move is a uniform pick.
            return match moves.choose(&mut self.rng) {
                Some(mv) => {
                    let next = mv.apply(schedule)?;
                    stats.record_move(true);
                    Ok(Some(Selection {
                        mv: mv.clone(),
                        schedule: next,
                    }))
                }
                None => Ok(None),
            };
        };

        moves.shuffle(&mut self.rng);
        for mv in moves {
            let next = mv.apply(schedule)?;
            let accepted = accept(&next);
            stats.record_move(accepted);
            if accepted {
                return Ok(Some(Selection { mv, schedule: next }));
            }
        }
        Ok(None)
    }

    fn neighborhood(&self) -> Neighborhood {
        self.neighborhood
    }

    fn name(&self) -> &'static str {
        "random"
    }
}
