//! Simulated annealing.

use std::fmt::Debug;
use std::time::Duration;

use paintshop_core::{Result, Schedule};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::warn;

use super::{SearchController, Trajectory};
use crate::heuristic::selector::{RandomStrategy, SelectionStrategy};
use crate::run::{RunRecord, TerminationReason};
use crate::termination::TimeBudget;

/// Exponents below this underflow to zero anyway.
const MIN_EXPONENT: f64 = -700.0;

/// Linear temperature schedules, from 1 down to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cooling {
    /// Iteration `i` runs at `1 - (i + 1) / total`.
    Iterations(u64),
    /// Runs at `1 - elapsed / budget`.
    Time(Duration),
}

/// Probability of accepting a cost change of `delta` at `temperature`.
///
/// Non-worsening changes are always accepted. Worsening changes are never
/// accepted at a non-positive temperature or scale.
///
/// # Example
///
/// ```
/// use paintshop_solver::phase::acceptance_probability;
///
/// assert_eq!(acceptance_probability(-3.0, 0.0, 1.0), 1.0);
/// assert_eq!(acceptance_probability(2.0, 0.0, 1.0), 0.0);
/// assert!((acceptance_probability(2.0, 0.5, 4.0) - (-1.0f64).exp()).abs() < 1e-12);
/// ```
pub fn acceptance_probability(delta: f64, temperature: f64, scale_factor: f64) -> f64 {
    if delta <= 0.0 {
        return 1.0;
    }
    if temperature <= 0.0 || scale_factor <= 0.0 {
        return 0.0;
    }
    let exponent = -delta / (temperature * scale_factor);
    if exponent < MIN_EXPONENT {
        0.0
    } else {
        exponent.exp()
    }
}

/// Random moves, accepted by the Metropolis criterion on a cooling
/// temperature.
///
/// Rejected candidates are recorded as iterations without a move. With
/// [`Cooling::Iterations`] of `n`, the run makes exactly `n - 1` iterations
/// unless the optional time limit stops it first.
#[derive(Debug, Clone)]
pub struct SimulatedAnnealing<R = ChaCha8Rng> {
    strategy: RandomStrategy<R>,
    scale_factor: f64,
    cooling: Cooling,
    time_limit: Option<Duration>,
}

impl<R: Rng + Debug> SimulatedAnnealing<R> {
    pub fn new(strategy: RandomStrategy<R>, scale_factor: f64, cooling: Cooling) -> Self {
        Self {
            strategy,
            scale_factor,
            cooling,
            time_limit: None,
        }
    }

    pub fn with_time_limit(mut self, time_limit: Option<Duration>) -> Self {
        self.time_limit = time_limit;
        self
    }

    pub fn cooling(&self) -> Cooling {
        self.cooling
    }
}

impl<R: Rng + Debug> SearchController for SimulatedAnnealing<R> {
    fn run(&mut self, initial: Schedule) -> Result<RunRecord> {
        let mut run = Trajectory::start(self.name(), initial, self.time_limit);
        if self.scale_factor <= 0.0 {
            warn!(
                event = "degenerate_config",
                scale_factor = self.scale_factor,
                "non-positive scale factor rejects every worsening move"
            );
        }
        let clock = match self.cooling {
            Cooling::Time(budget) => Some(TimeBudget::new(Some(budget))),
            Cooling::Iterations(_) => None,
        };

        let termination = loop {
            let temperature = match (self.cooling, clock) {
                (Cooling::Iterations(total), _) => {
                    1.0 - (run.step_index() + 1) as f64 / total as f64
                }
                (Cooling::Time(_), Some(clock)) => clock.remaining_fraction().unwrap_or(0.0),
                (Cooling::Time(_), None) => 0.0,
            };
            if temperature <= 0.0 {
                break TerminationReason::Cooled;
            }
            if run.budget.is_exceeded() {
                break TerminationReason::TimeLimit;
            }

            let Some(selection) = self.strategy.select(&run.current, None, &mut run.stats)? else {
                break TerminationReason::LocalOptimum;
            };
            let delta = selection.schedule.total_cost() - run.current.total_cost();
            let accepted = delta <= 0.0 || {
                let p = acceptance_probability(delta, temperature, self.scale_factor);
                self.strategy.rng_mut().random::<f64>() < p
            };

            if accepted {
                run.commit(selection.mv, selection.schedule)?;
            } else {
                run.reject();
            }
        };

        Ok(run.finish(termination))
    }

    fn name(&self) -> &'static str {
        "simulated_annealing"
    }
}

/// Runs a [`SimulatedAnnealing`] drawing moves and acceptance from
/// `strategy`.
pub fn run_annealing<R: Rng + Debug>(
    initial: Schedule,
    strategy: RandomStrategy<R>,
    scale_factor: f64,
    cooling: Cooling,
) -> Result<RunRecord> {
    SimulatedAnnealing::new(strategy, scale_factor, cooling).run(initial)
}
