//! Greedy descent.

use std::time::Duration;

use paintshop_core::{Result, Schedule};

use super::{SearchController, Trajectory};
use crate::heuristic::selector::SelectionStrategy;
use crate::run::{RunRecord, TerminationReason};

/// Commits strictly improving moves until none is left.
///
/// Cost never increases from one step to the next, so the last schedule is
/// also the best one.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use paintshop_core::{Order, ProblemInstance, Schedule};
/// use paintshop_solver::heuristic::selector::{BestStrategy, Neighborhood};
/// use paintshop_solver::phase::{GreedyDescent, SearchController};
/// use paintshop_solver::run::TerminationReason;
///
/// let instance = Arc::new(
///     ProblemInstance::builder()
///         .with_order(Order::new(10.0, 0, 5.0, 1.0))
///         .with_order(Order::new(10.0, 0, 5.0, 1.0))
///         .with_order(Order::new(5.0, 1, 5.0, 1.0))
///         .with_machine(1.0)
///         .with_setup(0, 1, 2.0)
///         .build()
///         .unwrap(),
/// );
/// let initial = Schedule::from_queues(instance, vec![vec![0, 1, 2]]).unwrap();
///
/// let mut greedy = GreedyDescent::new(BestStrategy::new(Neighborhood::all()));
/// let record = greedy.run(initial).unwrap();
///
/// assert_eq!(record.termination, TerminationReason::LocalOptimum);
/// assert_eq!(record.best.total_cost(), 30.0);
/// ```
#[derive(Debug, Clone)]
pub struct GreedyDescent<S> {
    strategy: S,
    time_limit: Option<Duration>,
}

impl<S: SelectionStrategy> GreedyDescent<S> {
    pub fn new(strategy: S) -> Self {
        Self {
            strategy,
            time_limit: None,
        }
    }

    pub fn with_time_limit(mut self, time_limit: Option<Duration>) -> Self {
        self.time_limit = time_limit;
        self
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }
}

impl<S: SelectionStrategy> SearchController for GreedyDescent<S> {
    fn run(&mut self, initial: Schedule) -> Result<RunRecord> {
        let mut run = Trajectory::start(self.name(), initial, self.time_limit);

        let termination = loop {
            let cost = run.current.total_cost();
            let improves = |s: &Schedule| s.total_cost() < cost;
            let Some(selection) =
                self.strategy
                    .select(&run.current, Some(&improves), &mut run.stats)?
            else {
                break TerminationReason::LocalOptimum;
            };
            // Polled between selection and commit.
            if run.budget.is_exceeded() {
                break TerminationReason::TimeLimit;
            }
            run.commit(selection.mv, selection.schedule)?;
        };

        Ok(run.finish(termination))
    }

    fn name(&self) -> &'static str {
        "greedy_descent"
    }
}

/// Runs a [`GreedyDescent`] with `strategy` from `initial`.
pub fn run_greedy(
    initial: Schedule,
    strategy: impl SelectionStrategy,
    time_limit: Option<Duration>,
) -> Result<RunRecord> {
    GreedyDescent::new(strategy)
        .with_time_limit(time_limit)
        .run(initial)
}
