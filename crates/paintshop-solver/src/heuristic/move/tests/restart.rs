use super::*;
use crate::construction::Construction;

#[test]
fn test_restart_enumerates_each_construction() {
    let instance = two_machine_instance();
    let start = round_robin(&instance);
    let moves = RestartMove::enumerate(&start);

    assert_eq!(moves.len(), Construction::ALL.len());
    for mv in moves {
        let next = Move::from(mv).apply(&start).unwrap();
        assert!(next.is_feasible());
        assert_cost_consistent(&next);
        assert!(Move::from(mv).touches(pos(0, 0)));
    }
}

#[test]
fn test_restart_is_reproducible() {
    let instance = random_instance(8, 3, 3, 2);
    let start = round_robin(&instance);
    let mv = RestartMove::new(Construction::Sampled, 99);

    assert_eq!(mv.apply(&start).unwrap(), mv.apply(&start).unwrap());
}
