//! Problem instance fixtures.
//!
//! # Example
//!
//! ```
//! use paintshop_core::Schedule;
//! use paintshop_test::instances::three_order_instance;
//!
//! let schedule = Schedule::from_queues(three_order_instance(), vec![vec![0, 1, 2]]).unwrap();
//! assert_eq!(schedule.total_cost(), 42.0);
//! ```

use std::sync::Arc;

use paintshop_core::{Order, ProblemInstance, Schedule};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Three orders colored A, A, B on one unit-speed machine.
///
/// Surfaces 10, 10, 5; all deadlines 5 with rate 1; setup A to B is 2.
/// Queue `[0, 1, 2]` costs 42 and `[0, 2, 1]` costs 39.
pub fn three_order_instance() -> Arc<ProblemInstance> {
    Arc::new(
        ProblemInstance::builder()
            .with_order(Order::new(10.0, 0, 5.0, 1.0))
            .with_order(Order::new(10.0, 0, 5.0, 1.0))
            .with_order(Order::new(5.0, 1, 5.0, 1.0))
            .with_machine(1.0)
            .with_setup(0, 1, 2.0)
            .build()
            .expect("fixture instance is valid"),
    )
}

/// Five orders in three colors on two machines of different speed.
pub fn two_machine_instance() -> Arc<ProblemInstance> {
    Arc::new(
        ProblemInstance::builder()
            .with_orders([
                Order::new(4.0, 0, 3.0, 2.0),
                Order::new(6.0, 1, 8.0, 1.0),
                Order::new(2.0, 0, 4.0, 3.0),
                Order::new(8.0, 2, 10.0, 0.5),
                Order::new(3.0, 1, 2.0, 1.5),
            ])
            .with_machines([1.0, 2.0])
            .with_setup(0, 1, 1.0)
            .with_setup(1, 0, 2.0)
            .with_setup(0, 2, 3.0)
            .with_setup(2, 0, 3.0)
            .with_setup(1, 2, 1.5)
            .with_setup(2, 1, 1.5)
            .build()
            .expect("fixture instance is valid"),
    )
}

/// Eight orders in two colors with a uniform setup of 3 between colors, so
/// same-color neighbours form batches.
pub fn batched_instance() -> Arc<ProblemInstance> {
    Arc::new(
        ProblemInstance::builder()
            .with_orders((0..8).map(|i| {
                let color = usize::from(i % 4 >= 2);
                Order::new(2.0 + i as f64, color, 6.0 + 2.0 * i as f64, 1.0 + (i % 3) as f64)
            }))
            .with_machines([1.0, 1.5])
            .with_setup(0, 1, 3.0)
            .with_setup(1, 0, 3.0)
            .build()
            .expect("fixture instance is valid"),
    )
}

/// Seeded random instance with a dense setup matrix.
pub fn random_instance(orders: usize, machines: usize, colors: usize, seed: u64) -> Arc<ProblemInstance> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let colors = colors.max(1);
    let mut builder = ProblemInstance::builder();
    for _ in 0..orders {
        builder = builder.with_order(Order::new(
            rng.random_range(1.0..20.0),
            rng.random_range(0..colors),
            rng.random_range(0.0..(orders as f64 * 6.0).max(1.0)),
            rng.random_range(0.5..4.0),
        ));
    }
    for _ in 0..machines.max(1) {
        builder = builder.with_machine(rng.random_range(0.5..2.0));
    }
    for from in 0..colors {
        for to in 0..colors {
            if from != to {
                builder = builder.with_setup(from, to, rng.random_range(0.5..5.0));
            }
        }
    }
    Arc::new(builder.build().expect("random instance is valid"))
}

/// Deals orders to machines in turn; always feasible.
pub fn round_robin(instance: &Arc<ProblemInstance>) -> Schedule {
    let machines = instance.machine_count();
    let mut queues = vec![Vec::new(); machines];
    for order in instance.order_ids() {
        queues[order % machines].push(order);
    }
    Schedule::from_queues(Arc::clone(instance), queues).expect("round robin is valid")
}
