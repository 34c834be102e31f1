//! Paint shop scheduling
//!
//! Assigns colored orders to machine queues, minimizing total weighted
//! tardiness including color setup times, with local search.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use paintshop::prelude::*;
//!
//! let instance = Arc::new(
//!     ProblemInstance::builder()
//!         .with_order(Order::new(10.0, 0, 5.0, 1.0))
//!         .with_order(Order::new(10.0, 0, 5.0, 1.0))
//!         .with_order(Order::new(5.0, 1, 5.0, 1.0))
//!         .with_machine(1.0)
//!         .with_setup(0, 1, 2.0)
//!         .build()
//!         .unwrap(),
//! );
//!
//! let config = SolverConfig::new().with_search(SearchConfig::GreedyDescent(
//!     GreedyDescentConfig { strategy: StrategyType::Best },
//! ));
//! let record = paintshop::solve(instance, &config).unwrap();
//!
//! assert!(record.best.is_feasible());
//! assert_eq!(record.best.total_cost(), 30.0);
//! ```

pub mod console;
mod solver;

pub use solver::solve;

pub use paintshop_config::{
    ConfigError, ConstructionType, CoolingConfig, GreedyDescentConfig, NeighborhoodConfig,
    RestartConfig, SearchConfig, SimulatedAnnealingConfig, SolverConfig, StrategyType,
    TabuSearchConfig, TerminationConfig,
};
pub use paintshop_core::{
    Batch, CombinatorialIndexer, Machine, MachineId, Order, OrderId, PaintShopError, Position,
    ProblemInstance, ProblemInstanceBuilder, Result, Schedule,
};
pub use paintshop_solver::{
    run_annealing, run_greedy, run_tabu, BestStrategy, Construction, Cooling, FirstStrategy,
    GreedyDescent, Iteration, Move, Neighborhood, RandomStrategy, RunRecord, SearchController,
    SearchStats, SelectionStrategy, SimulatedAnnealing, SolverBuilder, TabuSearch,
    TerminationReason,
};

pub mod prelude {
    pub use super::{
        GreedyDescentConfig, SearchConfig, SimulatedAnnealingConfig, SolverConfig,
        StrategyType, TabuSearchConfig,
    };
    pub use super::{Order, PaintShopError, ProblemInstance, Schedule};
    pub use super::{Move, RunRecord, SearchController, TerminationReason};
}
