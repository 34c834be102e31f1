//! Search controllers
//!
//! Controllers drive a selection strategy from an initial schedule until a
//! termination condition holds:
//! - [`GreedyDescent`]: strictly improving steps to a local optimum
//! - [`TabuSearch`]: improving steps, falling back to non-tabu steps
//! - [`SimulatedAnnealing`]: random steps accepted by temperature

mod annealing;
mod greedy;
mod tabu;

use std::fmt::Debug;
use std::time::Duration;

use paintshop_core::{PaintShopError, Result, Schedule};
use tracing::{debug, info};

use crate::heuristic::r#move::Move;
use crate::run::{Iteration, RunRecord, TerminationReason};
use crate::stats::SearchStats;
use crate::termination::TimeBudget;

pub use annealing::{acceptance_probability, run_annealing, Cooling, SimulatedAnnealing};
pub use greedy::{run_greedy, GreedyDescent};
pub use tabu::{run_tabu, RestartPolicy, TabuList, TabuSearch};

/// A metaheuristic that improves a schedule.
pub trait SearchController: Debug {
    /// Runs the search from `initial` and reports every committed step.
    ///
    /// # Errors
    ///
    /// Fails when a move cannot be applied or a committed move leaves the
    /// schedule infeasible; both indicate a defect, not a search outcome.
    fn run(&mut self, initial: Schedule) -> Result<RunRecord>;

    fn name(&self) -> &'static str;
}

impl<C: SearchController + ?Sized> SearchController for Box<C> {
    fn run(&mut self, initial: Schedule) -> Result<RunRecord> {
        (**self).run(initial)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Fails with [`PaintShopError::Infeasible`] if `schedule` lost or
/// duplicated an order.
pub fn ensure_feasible(mv: &Move, schedule: &Schedule) -> Result<()> {
    if schedule.is_feasible() {
        Ok(())
    } else {
        Err(PaintShopError::Infeasible(format!(
            "{mv} produced an infeasible schedule"
        )))
    }
}

/// Bookkeeping shared by every controller run.
struct Trajectory {
    controller: &'static str,
    initial: Schedule,
    current: Schedule,
    best: Schedule,
    iterations: Vec<Iteration>,
    stats: SearchStats,
    budget: TimeBudget,
}

impl Trajectory {
    fn start(controller: &'static str, initial: Schedule, time_limit: Option<Duration>) -> Self {
        let mut stats = SearchStats::default();
        stats.start();
        let budget = TimeBudget::new(time_limit);
        info!(
            event = "search_start",
            controller,
            orders = initial.instance().order_count(),
            machines = initial.machine_count(),
            cost = initial.total_cost(),
            time_limit_ms = budget.limit().map(|limit| limit.as_millis() as u64),
        );
        Self {
            controller,
            current: initial.clone(),
            best: initial.clone(),
            initial,
            iterations: Vec::new(),
            stats,
            budget,
        }
    }

    fn step_index(&self) -> u64 {
        self.iterations.len() as u64
    }

    /// Makes `schedule` the current one, keeping it as best if cheaper.
    fn commit(&mut self, mv: Move, schedule: Schedule) -> Result<()> {
        ensure_feasible(&mv, &schedule)?;
        self.stats.record_step();
        debug!(
            event = "step",
            controller = self.controller,
            step = self.step_index(),
            mv = %mv,
            cost = schedule.total_cost(),
            elapsed_ms = self.budget.elapsed().as_millis() as u64,
        );
        if schedule.total_cost() < self.best.total_cost() {
            self.best = schedule.clone();
        }
        self.push(Some(mv), schedule.clone());
        self.current = schedule;
        Ok(())
    }

    /// Records an iteration that left the current schedule unchanged.
    fn reject(&mut self) {
        self.push(None, self.current.clone());
    }

    fn push(&mut self, mv: Option<Move>, result: Schedule) {
        self.iterations.push(Iteration {
            index: self.step_index(),
            elapsed: self.budget.elapsed(),
            mv,
            cost: result.total_cost(),
            result,
        });
    }

    fn finish(self, termination: TerminationReason) -> RunRecord {
        let total_time = self.budget.elapsed();
        info!(
            event = "search_end",
            controller = self.controller,
            iterations = self.iterations.len(),
            steps = self.stats.step_count,
            moves_evaluated = self.stats.moves_evaluated,
            moves_per_second = self.stats.moves_per_second(),
            initial_cost = self.initial.total_cost(),
            best_cost = self.best.total_cost(),
            termination = %termination,
            converged = termination.is_converged(),
            duration_ms = total_time.as_millis() as u64,
        );
        RunRecord {
            initial: self.initial,
            best: self.best,
            iterations: self.iterations,
            termination,
            stats: self.stats,
            total_time,
        }
    }
}

#[cfg(test)]
mod tests;
