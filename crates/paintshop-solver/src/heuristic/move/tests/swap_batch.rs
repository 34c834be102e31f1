use super::*;

fn batch(start: usize, end: usize) -> Batch {
    Batch { start, end }
}

#[test]
fn test_batch_pairs_enumerated() {
    let instance = batched_instance();
    // Colors: 0 0 1 1 0 0 1 1 for orders 0..8.
    let start = schedule(&instance, vec![vec![0, 1, 2, 3, 4], vec![5, 6, 7]]);
    let moves = SwapBatchMove::enumerate(&start);

    assert_eq!(
        moves,
        vec![
            SwapBatchMove::new((0, batch(0, 2)), (0, batch(2, 4))),
            SwapBatchMove::new((0, batch(0, 2)), (1, batch(1, 3))),
            SwapBatchMove::new((0, batch(2, 4)), (1, batch(1, 3))),
        ]
    );
}

#[test]
fn test_same_machine_unequal_batches() {
    let instance = batched_instance();
    let start = schedule(&instance, vec![vec![0, 1, 4, 2, 5, 3, 6], vec![7]]);
    assert_eq!(start.batches(0).unwrap(), &[batch(0, 3), batch(5, 7)]);

    // Arguments in either order describe the same move.
    let mv = SwapBatchMove::new((0, batch(5, 7)), (0, batch(0, 3)));
    assert_eq!(mv, SwapBatchMove::new((0, batch(0, 3)), (0, batch(5, 7))));

    let next = mv.apply(&start).unwrap();
    assert_eq!(next.queue(0), &[3, 6, 2, 5, 0, 1, 4]);
    assert!(next.is_feasible());
    assert_cost_consistent(&next);

    assert!(mv.touches(pos(0, 0)));
    assert!(mv.touches(pos(0, 1)));
    assert!(!mv.touches(pos(0, 2)));
    assert!(!mv.touches(pos(0, 3)));
    assert!(mv.touches(pos(0, 4)));
    assert!(mv.touches(pos(0, 6)));
}

#[test]
fn test_cross_machine_batches() {
    let instance = batched_instance();
    let start = schedule(&instance, vec![vec![0, 1, 2, 4], vec![3, 6, 7, 5]]);
    let mv = SwapBatchMove::new((0, batch(0, 2)), (1, batch(0, 3)));
    let next = mv.apply(&start).unwrap();

    assert_eq!(next.queue(0), &[3, 6, 7, 2, 4]);
    assert_eq!(next.queue(1), &[0, 1, 5]);
    assert!(next.is_feasible());
    assert_cost_consistent(&next);
    assert!(mv.touches(pos(0, 2)));
    assert!(!mv.touches(pos(0, 3)));
    assert!(mv.touches(pos(1, 1)));
}

#[test]
fn test_overlapping_batches_rejected() {
    let instance = batched_instance();
    let start = schedule(&instance, vec![vec![0, 1, 4, 5], vec![2, 3, 6, 7]]);
    let mv = SwapBatchMove::new((0, batch(0, 3)), (0, batch(2, 4)));
    assert!(mv.apply(&start).is_err());
}
