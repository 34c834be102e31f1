//! Paint shop search engine
//!
//! This crate provides:
//! - Construction procedures for initial and restart schedules
//! - Move system and neighborhoods
//! - Move selection strategies (first, best, random)
//! - Search controllers (greedy descent, tabu search, simulated annealing)
//! - Run records, time budgets and statistics
//! - Configuration wiring (builder module)

pub mod builder;
pub mod construction;
pub mod heuristic;
pub mod phase;
pub mod run;
pub mod stats;
pub mod termination;

pub use builder::SolverBuilder;
pub use construction::{
    Construction, Constructor, EarliestDeadlineConstructor, LeastLoadedConstructor,
    SampledConstructor,
};
pub use heuristic::{
    BestStrategy, FirstStrategy, Move, Neighborhood, RandomStrategy, RelocateMove, RestartMove,
    ScheduleMove, Selection, SelectionStrategy, SwapBatchMove, SwapMove, SwapQueuesMove,
};
pub use phase::{
    acceptance_probability, ensure_feasible, run_annealing, run_greedy, run_tabu, Cooling,
    GreedyDescent, RestartPolicy, SearchController, SimulatedAnnealing, TabuList, TabuSearch,
};
pub use run::{Iteration, RunRecord, TerminationReason};
pub use stats::SearchStats;
pub use termination::TimeBudget;
