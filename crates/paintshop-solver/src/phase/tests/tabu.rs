use super::*;
use crate::construction::Construction;

#[test]
fn test_tabu_list_bounded_window() {
    let mut tabu = TabuList::new(Some(2));
    tabu.record(1);
    tabu.record(1);
    assert!(tabu.contains(1));
    tabu.record(2);
    // One of the two records of 1 is still inside the window.
    assert!(tabu.contains(1));
    tabu.record(3);
    assert!(!tabu.contains(1));
    assert!(tabu.contains(2) && tabu.contains(3));
    assert_eq!(tabu.len(), 2);
}

#[test]
fn test_tabu_list_unbounded_and_zero() {
    let mut unbounded = TabuList::new(None);
    for h in 0..100 {
        unbounded.record(h);
    }
    assert!((0..100).all(|h| unbounded.contains(h)));

    let mut zero = TabuList::new(Some(0));
    zero.record(7);
    assert!(!zero.contains(7));
    assert!(zero.is_empty());
}

#[test]
fn test_tabu_stops_when_every_neighbor_is_tabu() {
    let record = run_tabu(
        two_states(),
        BestStrategy::new(Neighborhood::all()),
        BestStrategy::new(Neighborhood::all()),
        100,
        None,
        None,
    )
    .unwrap();

    assert_eq!(record.termination, TerminationReason::LocalOptimum);
    assert!(record.iterations.len() <= 2);
    let min = record
        .costs()
        .into_iter()
        .fold(f64::INFINITY, f64::min);
    assert_eq!(record.best.total_cost(), min);
}

#[test]
fn test_iteration_limit() {
    let instance = random_instance(10, 3, 3, 8);
    let record = run_tabu(
        round_robin(&instance),
        BestStrategy::new(Neighborhood::all()),
        FirstStrategy::new(Neighborhood::all()),
        25,
        Some(5),
        None,
    )
    .unwrap();

    assert_eq!(record.termination, TerminationReason::IterationLimit);
    assert_eq!(record.iterations.len(), 25);
    assert_record_consistent(&record);
}

#[test]
fn test_fallback_steps_avoid_the_window() {
    let window = 4;
    let instance = random_instance(7, 2, 3, 3);
    let start = round_robin(&instance);
    let record = run_tabu(
        start.clone(),
        BestStrategy::new(Neighborhood::swap_and_relocate()),
        BestStrategy::new(Neighborhood::swap_and_relocate()),
        40,
        Some(window),
        None,
    )
    .unwrap();

    let mut visited = vec![start.fingerprint()];
    let mut previous_cost = start.total_cost();
    for iteration in &record.iterations {
        let fingerprint = iteration.result.fingerprint();
        if iteration.cost >= previous_cost {
            let recent = &visited[visited.len().saturating_sub(window)..];
            assert!(!recent.contains(&fingerprint), "revisited inside the window");
        }
        visited.push(fingerprint);
        previous_cost = iteration.cost;
    }
}

#[test]
fn test_restart_policy_bounds_restarts() {
    let mut tabu = TabuSearch::new(
        BestStrategy::new(Neighborhood::all()),
        BestStrategy::new(Neighborhood::all()),
        100,
    )
    .with_restart(Some(RestartPolicy::new(Construction::Sampled, 2, 9)));
    let record = tabu.run(two_states()).unwrap();

    let restarts = record
        .moves()
        .filter(|m| matches!(m, Move::Restart(_)))
        .count();
    assert_eq!(restarts, 2);
    assert_eq!(record.termination, TerminationReason::LocalOptimum);
    assert_record_consistent(&record);
}

#[test]
fn test_spent_budget() {
    let record = TabuSearch::new(
        FirstStrategy::new(Neighborhood::all()),
        FirstStrategy::new(Neighborhood::all()),
        10,
    )
    .with_time_limit(Some(Duration::ZERO))
    .run(scenario())
    .unwrap();

    assert_eq!(record.termination, TerminationReason::TimeLimit);
    assert!(record.iterations.is_empty());
}
