//! Tests for solver configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        random_seed = 42
        construction = "least_loaded"

        [termination]
        seconds_spent_limit = 2
        millis_spent_limit = 500

        [neighborhood]
        swap_batch = false

        [search]
        type = "simulated_annealing"
        scale_factor = 25.0
        [search.cooling]
        type = "iterations"
        total_iterations = 400
    "#;

    let config = SolverConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.random_seed, Some(42));
    assert_eq!(config.construction, ConstructionType::LeastLoaded);
    assert_eq!(config.time_limit(), Some(Duration::from_millis(2500)));
    assert!(config.neighborhood.swap);
    assert!(!config.neighborhood.swap_batch);
    match config.search {
        SearchConfig::SimulatedAnnealing(sa) => {
            assert_eq!(sa.scale_factor, 25.0);
            assert_eq!(
                sa.cooling,
                CoolingConfig::Iterations {
                    total_iterations: 400
                }
            );
        }
        other => panic!("unexpected search config: {other:?}"),
    }
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        random_seed: 42
        search:
          type: tabu_search
          improve_strategy: first
          max_iterations: 50
          taboo_window: 10
          restart:
            max_restarts: 3
            construction: sampled
    "#;

    let config = SolverConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.seed(), 42);
    match config.search {
        SearchConfig::TabuSearch(tabu) => {
            assert_eq!(tabu.improve_strategy, StrategyType::First);
            assert_eq!(tabu.diversify_strategy, StrategyType::Best);
            assert_eq!(tabu.max_iterations, 50);
            assert_eq!(tabu.taboo_window, Some(10));
            let restart = tabu.restart.unwrap();
            assert_eq!(restart.max_restarts, 3);
            assert_eq!(restart.construction, Some(ConstructionType::Sampled));
        }
        other => panic!("unexpected search config: {other:?}"),
    }
}

#[test]
fn test_defaults() {
    let config = SolverConfig::from_toml_str("").unwrap();
    assert_eq!(config.seed(), DEFAULT_RANDOM_SEED);
    assert_eq!(config.construction, ConstructionType::Sampled);
    assert_eq!(config.neighborhood, NeighborhoodConfig::default());
    assert!(matches!(
        config.search,
        SearchConfig::GreedyDescent(GreedyDescentConfig {
            strategy: StrategyType::First
        })
    ));
    assert_eq!(config.time_limit(), None);
    assert!(config.validate().is_ok());
}

#[test]
fn test_unknown_strategy_is_rejected() {
    let toml = r#"
        [search]
        type = "greedy_descent"
        strategy = "steepest"
    "#;
    assert!(matches!(
        SolverConfig::from_toml_str(toml),
        Err(ConfigError::Toml(_))
    ));
}

#[test]
fn test_builder() {
    let config = SolverConfig::new()
        .with_random_seed(123)
        .with_time_limit(Duration::from_millis(1500))
        .with_construction(ConstructionType::EarliestDeadline)
        .with_search(SearchConfig::TabuSearch(TabuSearchConfig::default()));

    assert_eq!(config.seed(), 123);
    assert_eq!(config.time_limit(), Some(Duration::from_millis(1500)));
    assert_eq!(config.construction, ConstructionType::EarliestDeadline);
    assert!(matches!(config.search, SearchConfig::TabuSearch(_)));
}

#[test]
fn test_validate_rejects_time_cooling_without_limit() {
    let config = SolverConfig::new().with_search(SearchConfig::SimulatedAnnealing(
        SimulatedAnnealingConfig {
            scale_factor: 1.0,
            cooling: CoolingConfig::Time,
        },
    ));
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

    let config = config.with_time_limit(Duration::from_secs(1));
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_rejects_empty_neighborhood() {
    let config = SolverConfig::new().with_neighborhood(NeighborhoodConfig {
        swap: false,
        relocate: false,
        swap_queues: false,
        swap_batch: false,
    });
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_load_missing_file_is_io_error() {
    assert!(matches!(
        SolverConfig::load("does/not/exist.yaml"),
        Err(ConfigError::Io(_))
    ));
}

#[test]
fn test_load_dispatches_on_extension() {
    let dir = tempfile::tempdir().unwrap();

    let toml_path = dir.path().join("solver.toml");
    std::fs::write(
        &toml_path,
        "random_seed = 9\n[search]\ntype = \"tabu_search\"\nmax_iterations = 12\n",
    )
    .unwrap();
    let config = SolverConfig::load(&toml_path).unwrap();
    assert_eq!(config.seed(), 9);
    assert!(matches!(
        config.search,
        SearchConfig::TabuSearch(TabuSearchConfig { max_iterations: 12, .. })
    ));

    let yaml_path = dir.path().join("solver.yml");
    std::fs::write(
        &yaml_path,
        "random_seed: 11\nconstruction: least_loaded\nsearch:\n  type: greedy_descent\n  strategy: best\n",
    )
    .unwrap();
    let config = SolverConfig::load(&yaml_path).unwrap();
    assert_eq!(config.seed(), 11);
    assert_eq!(config.construction, ConstructionType::LeastLoaded);
    assert!(matches!(
        config.search,
        SearchConfig::GreedyDescent(GreedyDescentConfig {
            strategy: StrategyType::Best
        })
    ));

    // YAML content behind a TOML extension goes through the TOML parser.
    let misnamed = dir.path().join("solver.conf");
    std::fs::write(&misnamed, "random_seed: 11\n").unwrap();
    assert!(matches!(
        SolverConfig::load(&misnamed),
        Err(ConfigError::Toml(_))
    ));
}

#[test]
fn test_huge_time_limit_saturates() {
    let termination = TerminationConfig {
        seconds_spent_limit: Some(u64::MAX),
        millis_spent_limit: Some(500),
    };
    assert_eq!(termination.time_limit(), Some(Duration::from_millis(u64::MAX)));
}
