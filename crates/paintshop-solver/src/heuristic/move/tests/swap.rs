use super::*;

#[test]
fn test_swap_enumerates_unordered_pairs() {
    let instance = two_machine_instance();
    let start = schedule(&instance, vec![vec![0, 1, 2], vec![3, 4]]);
    let moves = SwapMove::enumerate(&start);

    assert_eq!(moves.len(), 10);
    assert_eq!(moves[0], SwapMove::new(pos(0, 0), pos(0, 1)));
    assert_eq!(moves[9], SwapMove::new(pos(1, 0), pos(1, 1)));
    let unique: HashSet<_> = moves.iter().collect();
    assert_eq!(unique.len(), 10);
}

#[test]
fn test_cross_machine_swap() {
    let instance = two_machine_instance();
    let start = schedule(&instance, vec![vec![0, 1, 2], vec![3, 4]]);
    let mv = SwapMove::new(pos(0, 2), pos(1, 0));
    let next = mv.apply(&start).unwrap();

    assert_eq!(next.queue(0), &[0, 1, 3]);
    assert_eq!(next.queue(1), &[2, 4]);
    assert_cost_consistent(&next);
    assert!(mv.touches(pos(0, 2)));
    assert!(mv.touches(pos(1, 0)));
    assert!(!mv.touches(pos(0, 0)));
}

#[test]
fn test_swap_on_single_order_schedule_has_no_moves() {
    let instance = random_instance(1, 2, 1, 0);
    let start = schedule(&instance, vec![vec![0], vec![]]);
    assert!(SwapMove::enumerate(&start).is_empty());
}
