//! Cost oracle that ignores the schedule cache.

use paintshop_core::Schedule;

/// Recomputes the total cost of `schedule` sequentially from scratch.
pub fn scratch_cost(schedule: &Schedule) -> f64 {
    let instance = schedule.instance();
    let mut total = 0.0;
    for machine in 0..schedule.machine_count() {
        let mut time = 0.0;
        let mut previous = None;
        for &order in schedule.queue(machine) {
            time += instance.processing_time(order, machine) + instance.setup_between(previous, order);
            total += instance.penalty(order, time);
            previous = Some(order);
        }
    }
    total
}

/// Panics unless the cached cost is current and matches [`scratch_cost`].
pub fn assert_cost_consistent(schedule: &Schedule) {
    assert!(schedule.is_current(), "schedule has stale cache entries");
    let expected = scratch_cost(schedule);
    let actual = schedule.total_cost();
    assert!(
        (expected - actual).abs() <= 1e-9 * expected.abs().max(1.0),
        "cached cost {actual} differs from scratch cost {expected}"
    );
}
