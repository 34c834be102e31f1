//! Run records returned by every search controller.

use std::fmt;
use std::time::Duration;

use paintshop_core::Schedule;

use crate::heuristic::r#move::Move;
use crate::stats::SearchStats;

/// Why a controller stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminationReason {
    /// No acceptable move was left.
    LocalOptimum,
    /// The iteration cap was reached.
    IterationLimit,
    /// The wall-clock budget ran out.
    TimeLimit,
    /// The annealing temperature reached zero.
    Cooled,
}

impl TerminationReason {
    /// True when the search stopped for lack of moves rather than budget.
    pub fn is_converged(&self) -> bool {
        matches!(self, TerminationReason::LocalOptimum)
    }
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TerminationReason::LocalOptimum => "local_optimum",
            TerminationReason::IterationLimit => "iteration_limit",
            TerminationReason::TimeLimit => "time_limit",
            TerminationReason::Cooled => "cooled",
        };
        f.write_str(name)
    }
}

/// One recorded iteration.
///
/// `mv` is `None` for annealing steps whose candidate was rejected; `result`
/// is then the unchanged current schedule.
#[derive(Debug, Clone)]
pub struct Iteration {
    pub index: u64,
    pub elapsed: Duration,
    pub mv: Option<Move>,
    pub cost: f64,
    pub result: Schedule,
}

/// The outcome of one controller run.
#[derive(Debug, Clone)]
pub struct RunRecord {
    pub initial: Schedule,
    pub best: Schedule,
    pub iterations: Vec<Iteration>,
    pub termination: TerminationReason,
    pub stats: SearchStats,
    pub total_time: Duration,
}

impl RunRecord {
    /// The schedule the run ended on.
    pub fn last(&self) -> &Schedule {
        self.iterations
            .last()
            .map_or(&self.initial, |iteration| &iteration.result)
    }

    /// Cost trajectory, starting with the initial cost.
    pub fn costs(&self) -> Vec<f64> {
        std::iter::once(self.initial.total_cost())
            .chain(self.iterations.iter().map(|iteration| iteration.cost))
            .collect()
    }

    /// Moves that were committed, in order.
    pub fn moves(&self) -> impl Iterator<Item = &Move> + '_ {
        self.iterations.iter().filter_map(|iteration| iteration.mv.as_ref())
    }

    pub fn best_cost(&self) -> f64 {
        self.best.total_cost()
    }
}
