//! Tests for the search controllers.

use std::sync::Arc;
use std::time::Duration;

use paintshop_core::Schedule;
use paintshop_test::{
    assert_cost_consistent, random_instance, round_robin, three_order_instance,
};

use super::*;
use crate::heuristic::r#move::{Move, SwapMove};
use crate::heuristic::selector::{
    BestStrategy, FirstStrategy, Neighborhood, RandomStrategy, SelectionStrategy,
};
use crate::run::TerminationReason;

mod annealing;
mod tabu;

fn scenario() -> Schedule {
    Schedule::from_queues(three_order_instance(), vec![vec![0, 1, 2]]).unwrap()
}

/// Two orders on one machine: the only distinct schedules are `[0, 1]`
/// and `[1, 0]`.
fn two_states() -> Schedule {
    Schedule::from_queues(random_instance(2, 1, 2, 6), vec![vec![0, 1]]).unwrap()
}

fn assert_record_consistent(record: &crate::run::RunRecord) {
    for iteration in &record.iterations {
        assert!(iteration.result.is_feasible());
        assert_cost_consistent(&iteration.result);
        assert_eq!(iteration.cost, iteration.result.total_cost());
        assert!(record.best.total_cost() <= iteration.cost);
    }
    assert!(record.best.total_cost() <= record.initial.total_cost());
    assert_eq!(record.costs().len(), record.iterations.len() + 1);
}

#[test]
fn test_ensure_feasible_flags_lost_orders() {
    let instance = three_order_instance();
    let broken = Schedule::from_queues(Arc::clone(&instance), vec![vec![0, 1]]).unwrap();
    let mv = Move::from(SwapMove::new(
        paintshop_core::Position::new(0, 0),
        paintshop_core::Position::new(0, 1),
    ));

    let err = ensure_feasible(&mv, &broken).unwrap_err();
    assert!(matches!(err, paintshop_core::PaintShopError::Infeasible(ref m) if m.starts_with("swap:")));
    assert!(ensure_feasible(&mv, &scenario()).is_ok());
}

#[test]
fn test_controllers_behind_trait_objects() {
    let instance = random_instance(6, 2, 2, 21);
    let start = round_robin(&instance);
    let mut controllers: Vec<Box<dyn SearchController>> = vec![
        Box::new(GreedyDescent::new(FirstStrategy::new(Neighborhood::all()))),
        Box::new(TabuSearch::new(
            BestStrategy::new(Neighborhood::all()),
            BestStrategy::new(Neighborhood::all()),
            15,
        )),
        Box::new(SimulatedAnnealing::new(
            RandomStrategy::new(Neighborhood::all(), 2),
            5.0,
            Cooling::Iterations(30),
        )),
    ];

    let names: Vec<&str> = controllers.iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["greedy_descent", "tabu_search", "simulated_annealing"]);
    for controller in &mut controllers {
        let record = controller.run(start.clone()).unwrap();
        assert_record_consistent(&record);
        assert_eq!(record.initial, start);
    }
}
