//! Tabu search.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use paintshop_core::{Result, Schedule};
use tracing::debug;

use super::{SearchController, Trajectory};
use crate::construction::Construction;
use crate::heuristic::r#move::RestartMove;
use crate::heuristic::selector::{Selection, SelectionStrategy};
use crate::run::{RunRecord, TerminationReason};

/// Recently visited schedule fingerprints.
///
/// With a window of `w` only the `w` most recent records are tabu, evicted
/// oldest first; without a window every record stays tabu. A record may
/// occur several times inside the window.
///
/// # Example
///
/// ```
/// use paintshop_solver::phase::TabuList;
///
/// let mut tabu = TabuList::new(Some(2));
/// tabu.record(1);
/// tabu.record(2);
/// tabu.record(3);
///
/// assert!(!tabu.contains(1));
/// assert!(tabu.contains(2) && tabu.contains(3));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TabuList {
    window: Option<usize>,
    order: VecDeque<u64>,
    counts: HashMap<u64, usize>,
}

impl TabuList {
    pub fn new(window: Option<usize>) -> Self {
        Self {
            window,
            order: VecDeque::new(),
            counts: HashMap::new(),
        }
    }

    pub fn window(&self) -> Option<usize> {
        self.window
    }

    pub fn record(&mut self, fingerprint: u64) {
        if self.window == Some(0) {
            return;
        }
        self.order.push_back(fingerprint);
        *self.counts.entry(fingerprint).or_insert(0) += 1;

        if let Some(window) = self.window {
            while self.order.len() > window {
                if let Some(evicted) = self.order.pop_front() {
                    self.forget(evicted);
                }
            }
        }
    }

    fn forget(&mut self, fingerprint: u64) {
        if let Some(count) = self.counts.get_mut(&fingerprint) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(&fingerprint);
            }
        }
    }

    pub fn contains(&self, fingerprint: u64) -> bool {
        self.counts.contains_key(&fingerprint)
    }

    /// Number of records inside the window, duplicates included.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.counts.clear();
    }
}

/// Restarts a stuck tabu search instead of stopping.
///
/// Restart `r` (0-based) is seeded with `seed + r`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestartPolicy {
    pub construction: Construction,
    pub max_restarts: u32,
    pub seed: u64,
}

impl RestartPolicy {
    pub fn new(construction: Construction, max_restarts: u32, seed: u64) -> Self {
        Self {
            construction,
            max_restarts,
            seed,
        }
    }
}

/// Improving steps when possible, otherwise the selected non-tabu step.
///
/// The schedule current at the start of every iteration is recorded as
/// tabu, so the fallback step never returns to a schedule inside the
/// window. Worsening steps are allowed; the best schedule seen is kept
/// separately.
#[derive(Debug, Clone)]
pub struct TabuSearch<I, D> {
    improve: I,
    diversify: D,
    max_iterations: u64,
    taboo_window: Option<usize>,
    time_limit: Option<Duration>,
    restart: Option<RestartPolicy>,
}

impl<I: SelectionStrategy, D: SelectionStrategy> TabuSearch<I, D> {
    pub fn new(improve: I, diversify: D, max_iterations: u64) -> Self {
        Self {
            improve,
            diversify,
            max_iterations,
            taboo_window: None,
            time_limit: None,
            restart: None,
        }
    }

    pub fn with_taboo_window(mut self, window: Option<usize>) -> Self {
        self.taboo_window = window;
        self
    }

    pub fn with_time_limit(mut self, time_limit: Option<Duration>) -> Self {
        self.time_limit = time_limit;
        self
    }

    pub fn with_restart(mut self, restart: Option<RestartPolicy>) -> Self {
        self.restart = restart;
        self
    }
}

impl<I: SelectionStrategy, D: SelectionStrategy> SearchController for TabuSearch<I, D> {
    fn run(&mut self, initial: Schedule) -> Result<RunRecord> {
        let mut run = Trajectory::start(self.name(), initial, self.time_limit);
        let mut tabu = TabuList::new(self.taboo_window);
        let mut restarts = 0u32;

        let termination = loop {
            if run.step_index() >= self.max_iterations {
                break TerminationReason::IterationLimit;
            }
            if run.budget.is_exceeded() {
                break TerminationReason::TimeLimit;
            }
            tabu.record(run.current.fingerprint());

            let cost = run.current.total_cost();
            let improves = |s: &Schedule| s.total_cost() < cost;
            let mut selection = self
                .improve
                .select(&run.current, Some(&improves), &mut run.stats)?;

            if selection.is_none() {
                let not_tabu = |s: &Schedule| !tabu.contains(s.fingerprint());
                selection = self
                    .diversify
                    .select(&run.current, Some(&not_tabu), &mut run.stats)?;
            }

            if selection.is_none() {
                if let Some(policy) = self.restart.filter(|p| restarts < p.max_restarts) {
                    let mv = RestartMove::new(
                        policy.construction,
                        policy.seed.wrapping_add(u64::from(restarts)),
                    );
                    let schedule = mv.apply(&run.current)?;
                    run.stats.record_move(true);
                    restarts += 1;
                    debug!(event = "restart", restart = restarts, cost = schedule.total_cost());
                    selection = Some(Selection {
                        mv: mv.into(),
                        schedule,
                    });
                }
            }

            let Some(selection) = selection else {
                break TerminationReason::LocalOptimum;
            };
            run.commit(selection.mv, selection.schedule)?;
        };

        Ok(run.finish(termination))
    }

    fn name(&self) -> &'static str {
        "tabu_search"
    }
}

/// Runs a [`TabuSearch`] without restarts.
pub fn run_tabu(
    initial: Schedule,
    improve: impl SelectionStrategy,
    diversify: impl SelectionStrategy,
    max_iterations: u64,
    taboo_window: Option<usize>,
    time_limit: Option<Duration>,
) -> Result<RunRecord> {
    TabuSearch::new(improve, diversify, max_iterations)
        .with_taboo_window(taboo_window)
        .with_time_limit(time_limit)
        .run(initial)
}
