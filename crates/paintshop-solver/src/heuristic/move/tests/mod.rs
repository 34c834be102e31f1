//! Tests for the move module.

use std::collections::HashSet;
use std::sync::Arc;

use paintshop_core::{Batch, PaintShopError, Position, Schedule};
use paintshop_test::{
    assert_cost_consistent, batched_instance, random_instance, round_robin, three_order_instance,
    two_machine_instance,
};

use super::*;

mod restart;
mod swap;
mod swap_batch;

fn schedule(instance: &Arc<paintshop_core::ProblemInstance>, queues: Vec<Vec<usize>>) -> Schedule {
    Schedule::from_queues(Arc::clone(instance), queues).unwrap()
}

fn pos(machine: usize, index: usize) -> Position {
    Position::new(machine, index)
}

#[test]
fn test_move_display_and_kind() {
    let moves: Vec<Move> = vec![
        SwapMove::new(pos(0, 1), pos(1, 2)).into(),
        RelocateMove::new(pos(0, 3), pos(1, 0)).into(),
        SwapQueuesMove::new(0, 1).into(),
        SwapBatchMove::new((0, Batch { start: 1, end: 3 }), (1, Batch { start: 0, end: 2 })).into(),
        RestartMove::new(crate::construction::Construction::Sampled, 3).into(),
    ];
    let shown: Vec<String> = moves.iter().map(ToString::to_string).collect();
    assert_eq!(
        shown,
        vec![
            "swap: (0, 1) <=> (1, 2)",
            "move: (0, 3) => (1, 0)",
            "qswp: 0 <=> 1",
            "bswp: (0,[1,3]) <=> (1,[0,2])",
            "gnew: sampled",
        ]
    );
    let kinds: Vec<&str> = moves.iter().map(Move::kind).collect();
    assert_eq!(kinds, vec!["swap", "move", "qswp", "bswp", "gnew"]);
}

#[test]
fn test_every_local_move_preserves_feasibility() {
    for seed in 0..4 {
        let instance = random_instance(9, 3, 2, seed);
        let start = round_robin(&instance);
        let moves: Vec<Move> = SwapMove::iter_moves(&start)
            .map(Move::from)
            .chain(RelocateMove::iter_moves(&start).map(Move::from))
            .chain(SwapQueuesMove::iter_moves(&start).map(Move::from))
            .chain(SwapBatchMove::iter_moves(&start).map(Move::from))
            .collect();
        assert!(!moves.is_empty());
        for mv in moves {
            let next = mv.apply(&start).unwrap();
            assert!(next.is_feasible(), "{mv} broke feasibility");
            assert_cost_consistent(&next);
        }
        assert_cost_consistent(&start);
    }
}

#[test]
fn test_chained_moves_stay_consistent() {
    let instance = batched_instance();
    let mut current = round_robin(&instance);
    for step in 0..40 {
        let moves: Vec<Move> = SwapMove::iter_moves(&current)
            .map(Move::from)
            .chain(RelocateMove::iter_moves(&current).map(Move::from))
            .chain(SwapBatchMove::iter_moves(&current).map(Move::from))
            .collect();
        let mv = &moves[(step * 7) % moves.len()];
        current = mv.apply(&current).unwrap();
        assert!(current.is_feasible());
        assert_cost_consistent(&current);
    }
}

#[test]
fn test_apply_to_incompatible_shape_is_error() {
    let instance = two_machine_instance();
    let small = schedule(&instance, vec![vec![0, 1, 2, 3, 4], vec![]]);
    let err = SwapMove::new(pos(1, 0), pos(0, 1)).apply(&small).unwrap_err();
    assert!(matches!(err, PaintShopError::PositionOutOfRange { machine: 1, .. }));

    let err = Move::from(SwapQueuesMove::new(0, 4)).apply(&small).unwrap_err();
    assert!(matches!(err, PaintShopError::MachineOutOfRange { machine: 4, .. }));
}

#[test]
fn test_scenario_swap_reports_39() {
    let instance = three_order_instance();
    let start = schedule(&instance, vec![vec![0, 1, 2]]);
    assert_eq!(start.total_cost(), 42.0);

    let mv = Move::from(SwapMove::new(pos(0, 1), pos(0, 2)));
    let next = mv.apply(&start).unwrap();

    assert_eq!(next.queue(0), &[0, 2, 1]);
    assert_eq!(next.total_cost(), 39.0);
    assert_eq!(start.total_cost(), 42.0);
    assert_eq!(start.queue(0), &[0, 1, 2]);
    let distinct: HashSet<_> = [start, next].into_iter().collect();
    assert_eq!(distinct.len(), 2);
}
