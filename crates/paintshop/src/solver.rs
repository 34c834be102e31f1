//! Solver entry point that hides all internal wiring.

use std::sync::Arc;

use paintshop_config::SolverConfig;
use paintshop_core::{ProblemInstance, Result};
use paintshop_solver::{RunRecord, SolverBuilder};
use tracing::info;

/// Builds an initial schedule with the configured construction and improves
/// it with the configured search controller.
///
/// # Errors
///
/// Returns [`paintshop_core::PaintShopError::Config`] for an invalid
/// configuration, and any error the search itself reports.
pub fn solve(instance: Arc<ProblemInstance>, config: &SolverConfig) -> Result<RunRecord> {
    let mut controller = SolverBuilder::controller(config)?;
    let initial = SolverBuilder::initial_schedule(&instance, config)?;
    info!(
        event = "solve_start",
        construction = ?config.construction,
        controller = controller.name(),
        seed = config.seed(),
        initial_cost = initial.total_cost(),
    );
    let record = controller.run(initial)?;
    info!(
        event = "solve_end",
        best_cost = record.best.total_cost(),
        termination = %record.termination,
        duration_ms = record.total_time.as_millis() as u64,
    );
    Ok(record)
}
