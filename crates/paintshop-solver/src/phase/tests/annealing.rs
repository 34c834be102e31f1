use super::*;

#[test]
fn test_acceptance_probability_bounds() {
    for temperature in [0.0, 0.25, 1.0, -1.0] {
        assert_eq!(acceptance_probability(-5.0, temperature, 1.0), 1.0);
        assert_eq!(acceptance_probability(0.0, temperature, 1.0), 1.0);
    }
    assert_eq!(acceptance_probability(1.0, 0.0, 1.0), 0.0);
    assert_eq!(acceptance_probability(1.0, -0.5, 1.0), 0.0);
    assert_eq!(acceptance_probability(1.0, 0.5, 0.0), 0.0);

    let huge = acceptance_probability(1e308, 1e-10, 1.0);
    assert_eq!(huge, 0.0);
    assert!(!huge.is_nan());
}

#[test]
fn test_acceptance_probability_decreases_in_delta() {
    let probabilities: Vec<f64> = [0.5, 1.0, 2.0, 4.0, 8.0]
        .iter()
        .map(|&delta| acceptance_probability(delta, 0.7, 10.0))
        .collect();
    assert!(probabilities.windows(2).all(|w| w[1] < w[0]));
    assert!(probabilities.iter().all(|&p| p > 0.0 && p < 1.0));
}

#[test]
fn test_iteration_cooling_runs_total_minus_one_steps() {
    let instance = random_instance(8, 3, 3, 12);
    let record = run_annealing(
        round_robin(&instance),
        RandomStrategy::new(Neighborhood::all(), 4),
        10.0,
        Cooling::Iterations(50),
    )
    .unwrap();

    assert_eq!(record.termination, TerminationReason::Cooled);
    assert_eq!(record.iterations.len(), 49);
    assert_record_consistent(&record);
}

#[test]
fn test_single_iteration_schedule_is_cold_at_start() {
    let record = run_annealing(
        scenario(),
        RandomStrategy::new(Neighborhood::all(), 4),
        1.0,
        Cooling::Iterations(1),
    )
    .unwrap();
    assert_eq!(record.termination, TerminationReason::Cooled);
    assert!(record.iterations.is_empty());
}

#[test]
fn test_rejected_steps_keep_current() {
    let instance = random_instance(8, 2, 3, 5);
    let start = round_robin(&instance);
    let record = run_annealing(
        start.clone(),
        RandomStrategy::new(Neighborhood::all(), 8),
        0.01,
        Cooling::Iterations(200),
    )
    .unwrap();

    let mut previous = start;
    for iteration in &record.iterations {
        match &iteration.mv {
            None => assert_eq!(iteration.result, previous),
            Some(mv) => assert_eq!(mv.apply(&previous).unwrap(), iteration.result),
        }
        previous = iteration.result.clone();
    }
    let min = record.costs().into_iter().fold(f64::INFINITY, f64::min);
    assert_eq!(record.best.total_cost(), min);
}

#[test]
fn test_zero_scale_accepts_only_non_worsening() {
    let instance = random_instance(8, 2, 3, 5);
    let record = run_annealing(
        round_robin(&instance),
        RandomStrategy::new(Neighborhood::all(), 8),
        0.0,
        Cooling::Iterations(100),
    )
    .unwrap();

    let costs = record.costs();
    assert!(costs.windows(2).all(|w| w[1] <= w[0]));
}

#[test]
fn test_annealing_is_reproducible() {
    let instance = random_instance(9, 3, 3, 1);
    let start = round_robin(&instance);
    let run = |seed| {
        run_annealing(
            start.clone(),
            RandomStrategy::new(Neighborhood::all(), seed),
            20.0,
            Cooling::Iterations(60),
        )
        .unwrap()
        .costs()
    };
    assert_eq!(run(3), run(3));
}

#[test]
fn test_time_cooling_terminates_cold() {
    let record = run_annealing(
        scenario(),
        RandomStrategy::new(Neighborhood::all(), 1),
        5.0,
        Cooling::Time(Duration::from_millis(20)),
    )
    .unwrap();
    assert_eq!(record.termination, TerminationReason::Cooled);
    assert_record_consistent(&record);

    let record = run_annealing(
        scenario(),
        RandomStrategy::new(Neighborhood::all(), 1),
        5.0,
        Cooling::Time(Duration::ZERO),
    )
    .unwrap();
    assert_eq!(record.termination, TerminationReason::Cooled);
    assert!(record.iterations.is_empty());
}

#[test]
fn test_time_limit_interrupts_iteration_cooling() {
    let record = SimulatedAnnealing::new(
        RandomStrategy::new(Neighborhood::all(), 1),
        5.0,
        Cooling::Iterations(1_000),
    )
    .with_time_limit(Some(Duration::ZERO))
    .run(scenario())
    .unwrap();

    assert_eq!(record.termination, TerminationReason::TimeLimit);
    assert!(record.iterations.is_empty());
}
