//! Builder module for constructing search components from configuration
//!
//! This module provides the wiring between [`paintshop_config`] types and
//! the strategies, constructions and controllers of this crate.

use std::sync::Arc;

use paintshop_config::{
    ConfigError, CoolingConfig, SearchConfig, SolverConfig, StrategyType,
};
use paintshop_core::{PaintShopError, ProblemInstance, Result, Schedule};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::construction::{Construction, Constructor};
use crate::heuristic::selector::{
    BestStrategy, FirstStrategy, Neighborhood, RandomStrategy, SelectionStrategy,
};
use crate::phase::{
    Cooling, GreedyDescent, RestartPolicy, SearchController, SimulatedAnnealing, TabuSearch,
};

// Offsets keep the random streams of one run independent.
const IMPROVE_STREAM: u64 = 1;
const DIVERSIFY_STREAM: u64 = 2;
const RESTART_STREAM: u64 = 3;

fn config_error(err: ConfigError) -> PaintShopError {
    PaintShopError::Config(err.to_string())
}

/// Builder for constructing search components from configuration.
pub struct SolverBuilder;

impl SolverBuilder {
    /// Builds a selection strategy over `neighborhood`.
    ///
    /// `seed` is only used by the random strategy.
    pub fn strategy(
        kind: StrategyType,
        neighborhood: Neighborhood,
        seed: u64,
    ) -> Box<dyn SelectionStrategy> {
        match kind {
            StrategyType::First => Box::new(FirstStrategy::new(neighborhood)),
            StrategyType::Best => Box::new(BestStrategy::new(neighborhood)),
            StrategyType::Random => Box::new(RandomStrategy::new(neighborhood, seed)),
        }
    }

    /// Builds the initial schedule with the configured construction.
    pub fn initial_schedule(
        instance: &Arc<ProblemInstance>,
        config: &SolverConfig,
    ) -> Result<Schedule> {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed());
        Construction::from(config.construction).construct(instance, &mut rng)
    }

    /// Builds the configured search controller.
    ///
    /// # Errors
    ///
    /// Returns [`PaintShopError::Config`] if the configuration fails
    /// validation.
    pub fn controller(config: &SolverConfig) -> Result<Box<dyn SearchController>> {
        config.validate().map_err(config_error)?;

        let neighborhood = Neighborhood::from(config.neighborhood);
        let seed = config.seed();
        let time_limit = config.time_limit();

        let controller: Box<dyn SearchController> = match &config.search {
            SearchConfig::GreedyDescent(greedy) => Box::new(
                GreedyDescent::new(Self::strategy(
                    greedy.strategy,
                    neighborhood,
                    seed.wrapping_add(IMPROVE_STREAM),
                ))
                .with_time_limit(time_limit),
            ),

            SearchConfig::TabuSearch(tabu) => {
                let restart = tabu.restart.as_ref().map(|restart| {
                    RestartPolicy::new(
                        Construction::from(restart.construction.unwrap_or(config.construction)),
                        restart.max_restarts,
                        seed.wrapping_add(RESTART_STREAM),
                    )
                });
                Box::new(
                    TabuSearch::new(
                        Self::strategy(
                            tabu.improve_strategy,
                            neighborhood,
                            seed.wrapping_add(IMPROVE_STREAM),
                        ),
                        Self::strategy(
                            tabu.diversify_strategy,
                            neighborhood,
                            seed.wrapping_add(DIVERSIFY_STREAM),
                        ),
                        tabu.max_iterations,
                    )
                    .with_taboo_window(tabu.taboo_window)
                    .with_time_limit(time_limit)
                    .with_restart(restart),
                )
            }

            SearchConfig::SimulatedAnnealing(annealing) => {
                let cooling = match (annealing.cooling, time_limit) {
                    (CoolingConfig::Iterations { total_iterations }, _) => {
                        Cooling::Iterations(total_iterations)
                    }
                    (CoolingConfig::Time, Some(limit)) => Cooling::Time(limit),
                    (CoolingConfig::Time, None) => {
                        return Err(PaintShopError::Config(
                            "time-driven cooling requires a termination time limit".to_string(),
                        ));
                    }
                };
                // Time cooling already spends the whole budget.
                let limit = match cooling {
                    Cooling::Iterations(_) => time_limit,
                    Cooling::Time(_) => None,
                };
                Box::new(
                    SimulatedAnnealing::new(
                        RandomStrategy::new(neighborhood, seed.wrapping_add(IMPROVE_STREAM)),
                        annealing.scale_factor,
                        cooling,
                    )
                    .with_time_limit(limit),
                )
            }
        };
        Ok(controller)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use paintshop_config::{
        GreedyDescentConfig, NeighborhoodConfig, RestartConfig, SimulatedAnnealingConfig,
        TabuSearchConfig,
    };
    use paintshop_test::{random_instance, two_machine_instance};

    use super::*;
    use crate::run::TerminationReason;

    #[test]
    fn test_strategy_builder() {
        for (kind, name) in [
            (StrategyType::First, "first"),
            (StrategyType::Best, "best"),
            (StrategyType::Random, "random"),
        ] {
            let strategy = SolverBuilder::strategy(kind, Neighborhood::all(), 3);
            assert_eq!(strategy.name(), name);
            assert_eq!(strategy.neighborhood(), Neighborhood::all());
        }
    }

    #[test]
    fn test_controller_builder_names() {
        let configs = [
            SearchConfig::GreedyDescent(GreedyDescentConfig::default()),
            SearchConfig::TabuSearch(TabuSearchConfig::default()),
            SearchConfig::SimulatedAnnealing(SimulatedAnnealingConfig::default()),
        ];
        let names: Vec<&str> = configs
            .into_iter()
            .map(|search| {
                SolverBuilder::controller(&SolverConfig::new().with_search(search))
                    .unwrap()
                    .name()
            })
            .collect();
        assert_eq!(names, vec!["greedy_descent", "tabu_search", "simulated_annealing"]);
    }

    #[test]
    fn test_invalid_config_is_config_error() {
        let config = SolverConfig::new().with_neighborhood(NeighborhoodConfig {
            swap: false,
            relocate: false,
            swap_queues: false,
            swap_batch: false,
        });
        assert!(matches!(
            SolverBuilder::controller(&config),
            Err(PaintShopError::Config(_))
        ));

        let config = SolverConfig::new().with_search(SearchConfig::SimulatedAnnealing(
            SimulatedAnnealingConfig {
                scale_factor: 1.0,
                cooling: CoolingConfig::Time,
            },
        ));
        assert!(matches!(
            SolverBuilder::controller(&config),
            Err(PaintShopError::Config(_))
        ));
    }

    #[test]
    fn test_initial_schedule_is_seeded() {
        let instance = random_instance(9, 3, 3, 2);
        let config = SolverConfig::new().with_random_seed(77);
        let a = SolverBuilder::initial_schedule(&instance, &config).unwrap();
        let b = SolverBuilder::initial_schedule(&instance, &config).unwrap();
        assert_eq!(a, b);
        assert!(a.is_feasible());
    }

    #[test]
    fn test_built_tabu_with_restarts_runs() {
        let instance = two_machine_instance();
        let config = SolverConfig::new().with_search(SearchConfig::TabuSearch(TabuSearchConfig {
            max_iterations: 30,
            taboo_window: Some(3),
            restart: Some(RestartConfig {
                max_restarts: 1,
                construction: None,
            }),
            ..Default::default()
        }));
        let initial = SolverBuilder::initial_schedule(&instance, &config).unwrap();
        let record = SolverBuilder::controller(&config)
            .unwrap()
            .run(initial)
            .unwrap();
        assert!(record.iterations.len() <= 30);
        assert!(record.best.is_feasible());
    }

    #[test]
    fn test_time_cooling_uses_time_limit() {
        let config = SolverConfig::new()
            .with_time_limit(Duration::from_millis(10))
            .with_search(SearchConfig::SimulatedAnnealing(SimulatedAnnealingConfig {
                scale_factor: 2.0,
                cooling: CoolingConfig::Time,
            }));
        let instance = random_instance(5, 2, 2, 4);
        let initial = SolverBuilder::initial_schedule(&instance, &config).unwrap();
        let record = SolverBuilder::controller(&config)
            .unwrap()
            .run(initial)
            .unwrap();
        assert_eq!(record.termination, TerminationReason::Cooled);
    }
}
