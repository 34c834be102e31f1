//! Construction procedures producing a first feasible schedule.
//!
//! - [`SampledConstructor`]: uniform draw from the whole solution space
//! - [`EarliestDeadlineConstructor`]: deadline order, machine finishing first
//! - [`LeastLoadedConstructor`]: deadline order, machine with fewest orders
//!
//! [`Construction`] names one of them so it can be stored in moves and
//! configuration.

use std::fmt::{self, Debug};
use std::sync::Arc;

use paintshop_config::ConstructionType;
use paintshop_core::{
    CombinatorialIndexer, MachineId, OrderId, PaintShopError, ProblemInstance, Result, Schedule,
};
use rand::{Rng, RngCore};
use tracing::debug;

/// Builds a complete schedule for an instance.
pub trait Constructor: Debug {
    /// Builds a feasible schedule, drawing randomness from `rng` if needed.
    fn construct(&self, instance: &Arc<ProblemInstance>, rng: &mut dyn RngCore) -> Result<Schedule>;

    fn name(&self) -> &'static str;
}

/// Uniform sample of the solution space through the [`CombinatorialIndexer`].
///
/// When the space is too large to count in `u128`, each order is dealt to
/// a uniformly drawn machine instead, which samples the same distribution.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampledConstructor;

impl Constructor for SampledConstructor {
    fn construct(&self, instance: &Arc<ProblemInstance>, rng: &mut dyn RngCore) -> Result<Schedule> {
        let mut indexer = CombinatorialIndexer::new();
        match indexer.sample_count(instance) {
            Ok(count) => {
                let index = rng.random_range(0..count);
                indexer.nth_schedule(instance, index)
            }
            Err(PaintShopError::CountOverflow { orders, machines }) => {
                debug!(
                    event = "sample_fallback",
                    orders, machines, "solution space exceeds u128, drawing machines per order"
                );
                let mut queues = vec![Vec::new(); instance.machine_count()];
                for order in instance.order_ids() {
                    queues[rng.random_range(0..instance.machine_count())].push(order);
                }
                Schedule::from_queues(Arc::clone(instance), queues)
            }
            Err(err) => Err(err),
        }
    }

    fn name(&self) -> &'static str {
        "sampled"
    }
}

/// Orders by deadline (ties by id), each appended to the machine picked by
/// `choose`.
fn by_deadline(
    instance: &Arc<ProblemInstance>,
    choose: impl Fn(&Schedule) -> MachineId,
) -> Result<Schedule> {
    let mut orders: Vec<OrderId> = instance.order_ids().collect();
    orders.sort_by(|&a, &b| {
        instance
            .order(a)
            .deadline
            .total_cmp(&instance.order(b).deadline)
    });

    let mut schedule = Schedule::new(Arc::clone(instance));
    for order in orders {
        let machine = choose(&schedule);
        schedule.push_order(machine, order)?;
    }
    Ok(schedule)
}

/// Deadline order, each order to the machine with the lowest completion
/// time (ties to the lowest id).
#[derive(Debug, Clone, Copy, Default)]
pub struct EarliestDeadlineConstructor;

impl Constructor for EarliestDeadlineConstructor {
    fn construct(&self, instance: &Arc<ProblemInstance>, _rng: &mut dyn RngCore) -> Result<Schedule> {
        by_deadline(instance, |schedule| {
            (0..schedule.machine_count())
                .min_by(|&a, &b| {
                    let finish = |m| schedule.completion_time(m).unwrap_or(f64::INFINITY);
                    finish(a).total_cmp(&finish(b))
                })
                .unwrap_or(0)
        })
    }

    fn name(&self) -> &'static str {
        "earliest_deadline"
    }
}

/// Deadline order, each order to the machine with the fewest queued orders
/// (ties to the lowest id).
#[derive(Debug, Clone, Copy, Default)]
pub struct LeastLoadedConstructor;

impl Constructor for LeastLoadedConstructor {
    fn construct(&self, instance: &Arc<ProblemInstance>, _rng: &mut dyn RngCore) -> Result<Schedule> {
        by_deadline(instance, |schedule| {
            (0..schedule.machine_count())
                .min_by_key(|&m| schedule.queue(m).len())
                .unwrap_or(0)
        })
    }

    fn name(&self) -> &'static str {
        "least_loaded"
    }
}

/// Names a construction procedure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Construction {
    #[default]
    Sampled,
    EarliestDeadline,
    LeastLoaded,
}

impl Construction {
    pub const ALL: [Construction; 3] = [
        Construction::Sampled,
        Construction::EarliestDeadline,
        Construction::LeastLoaded,
    ];

    fn constructor(&self) -> &'static dyn Constructor {
        match self {
            Construction::Sampled => &SampledConstructor,
            Construction::EarliestDeadline => &EarliestDeadlineConstructor,
            Construction::LeastLoaded => &LeastLoadedConstructor,
        }
    }
}

impl Constructor for Construction {
    fn construct(&self, instance: &Arc<ProblemInstance>, rng: &mut dyn RngCore) -> Result<Schedule> {
        self.constructor().construct(instance, rng)
    }

    fn name(&self) -> &'static str {
        self.constructor().name()
    }
}

impl From<ConstructionType> for Construction {
    fn from(kind: ConstructionType) -> Self {
        match kind {
            ConstructionType::Sampled => Construction::Sampled,
            ConstructionType::EarliestDeadline => Construction::EarliestDeadline,
            ConstructionType::LeastLoaded => Construction::LeastLoaded,
        }
    }
}

impl fmt::Display for Construction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
