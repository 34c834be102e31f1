//! Schedule representation and incremental cost engine.
//!
//! A [`Schedule`] holds one [`MachineQueue`] per machine. Each queue caches
//! the completion time and cumulative tardiness penalty of every position,
//! together with the number of leading positions whose cache is still
//! valid. Structural edits shrink that valid prefix; [`Schedule::recalculate_from`]
//! recomputes only the suffix after it.
//!
//! Queues are stored behind `Arc`, so cloning a schedule is cheap and an
//! edit copies only the queues it touches.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use crate::error::{PaintShopError, Result};
use crate::instance::{MachineId, OrderId, ProblemInstance};

/// A slot in a schedule: machine id plus index into that machine's queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub machine: MachineId,
    pub index: usize,
}

impl Position {
    pub fn new(machine: MachineId, index: usize) -> Self {
        Self { machine, index }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.machine, self.index)
    }
}

/// A maximal run of at least two orders with zero setup between neighbours.
///
/// `start..end` is the half-open index range within one queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Batch {
    pub start: usize,
    pub end: usize,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start..self.end).contains(&index)
    }
}

/// The ordered orders of one machine plus their cost cache.
#[derive(Debug, Clone, Default)]
pub struct MachineQueue {
    orders: Vec<OrderId>,
    completion: Vec<f64>,
    cumulative: Vec<f64>,
    // Positions `0..valid_len` hold up-to-date cache entries.
    valid_len: usize,
    // Cost and finish time as of the last recalculation.
    cost: f64,
    end: f64,
    batches: OnceLock<Vec<Batch>>,
}

impl MachineQueue {
    pub fn orders(&self) -> &[OrderId] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Number of leading positions whose cached values are current.
    pub fn valid_len(&self) -> usize {
        self.valid_len
    }

    pub fn is_current(&self) -> bool {
        self.valid_len == self.orders.len()
    }

    fn invalidate_from(&mut self, index: usize) {
        self.valid_len = self.valid_len.min(index);
        self.batches = OnceLock::new();
    }

    fn recalculate(&mut self, instance: &ProblemInstance, machine: MachineId, index: usize) {
        let start = index.min(self.valid_len);
        let len = self.orders.len();
        self.completion.resize(len, 0.0);
        self.cumulative.resize(len, 0.0);

        let (mut time, mut penalty, mut previous) = match start.checked_sub(1) {
            Some(p) => (self.completion[p], self.cumulative[p], Some(self.orders[p])),
            None => (0.0, 0.0, None),
        };
        for i in start..len {
            let order = self.orders[i];
            time += instance.processing_time(order, machine) + instance.setup_between(previous, order);
            penalty += instance.penalty(order, time);
            self.completion[i] = time;
            self.cumulative[i] = penalty;
            previous = Some(order);
        }

        self.valid_len = len;
        self.cost = self.cumulative.last().copied().unwrap_or(0.0);
        self.end = self.completion.last().copied().unwrap_or(0.0);
    }

    fn discover_batches(&self, instance: &ProblemInstance) -> Vec<Batch> {
        let mut batches = Vec::new();
        let mut start = 0;
        for i in 1..=self.orders.len() {
            let continues = i < self.orders.len()
                && instance.setup_between(Some(self.orders[i - 1]), self.orders[i]) == 0.0;
            if !continues {
                if i - start >= 2 {
                    batches.push(Batch { start, end: i });
                }
                start = i;
            }
        }
        batches
    }
}

impl PartialEq for MachineQueue {
    fn eq(&self, other: &Self) -> bool {
        self.orders == other.orders
    }
}

impl Eq for MachineQueue {}

impl Hash for MachineQueue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.orders.hash(state);
    }
}

/// An assignment of orders to ordered machine queues.
///
/// Equality and hashing consider queue contents only.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use paintshop_core::{Order, ProblemInstance, Schedule};
///
/// let instance = Arc::new(
///     ProblemInstance::builder()
///         .with_order(Order::new(10.0, 0, 5.0, 1.0))
///         .with_order(Order::new(10.0, 0, 5.0, 1.0))
///         .with_machine(1.0)
///         .build()
///         .unwrap(),
/// );
///
/// let schedule = Schedule::from_queues(instance, vec![vec![0, 1]]).unwrap();
/// assert_eq!(schedule.total_cost(), 5.0 + 15.0);
/// assert_eq!(schedule.completion_time(0), Some(20.0));
/// assert!(schedule.is_feasible());
/// ```
#[derive(Debug, Clone)]
pub struct Schedule {
    instance: Arc<ProblemInstance>,
    queues: Vec<Arc<MachineQueue>>,
    total_cost: f64,
}

impl Schedule {
    /// Creates a schedule with one empty queue per machine.
    pub fn new(instance: Arc<ProblemInstance>) -> Self {
        let queues = (0..instance.machine_count())
            .map(|_| Arc::new(MachineQueue::default()))
            .collect();
        Self {
            instance,
            queues,
            total_cost: 0.0,
        }
    }

    /// Creates a schedule from explicit queue contents and computes its cost.
    ///
    /// The result is not required to be feasible; see [`Schedule::is_feasible`].
    pub fn from_queues(instance: Arc<ProblemInstance>, queues: Vec<Vec<OrderId>>) -> Result<Self> {
        if queues.len() != instance.machine_count() {
            return Err(PaintShopError::QueueCountMismatch {
                expected: instance.machine_count(),
                actual: queues.len(),
            });
        }
        if let Some(order) = queues
            .iter()
            .flatten()
            .find(|&&o| o >= instance.order_count())
        {
            return Err(PaintShopError::OrderOutOfRange {
                order: *order,
                order_count: instance.order_count(),
            });
        }

        let queues = queues
            .into_iter()
            .enumerate()
            .map(|(machine, orders)| {
                let mut queue = MachineQueue {
                    orders,
                    ..MachineQueue::default()
                };
                queue.recalculate(&instance, machine, 0);
                Arc::new(queue)
            })
            .collect();

        let mut schedule = Self {
            instance,
            queues,
            total_cost: 0.0,
        };
        schedule.refresh_total();
        Ok(schedule)
    }

    pub fn instance(&self) -> &Arc<ProblemInstance> {
        &self.instance
    }

    pub fn machine_count(&self) -> usize {
        self.queues.len()
    }

    /// Sum of all machine costs as of their last recalculation.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Orders queued on `machine`, in processing order.
    ///
    /// # Panics
    ///
    /// Panics if `machine` is not a valid machine id.
    pub fn queue(&self, machine: MachineId) -> &[OrderId] {
        &self.queues[machine].orders
    }

    pub fn queues(&self) -> impl Iterator<Item = &[OrderId]> + '_ {
        self.queues.iter().map(|q| q.orders.as_slice())
    }

    /// Length of the queue on `machine`.
    pub fn queue_len(&self, machine: MachineId) -> Result<usize> {
        Ok(self.machine_queue(machine)?.len())
    }

    pub fn machine_queue(&self, machine: MachineId) -> Result<&MachineQueue> {
        self.queues
            .get(machine)
            .map(|q| q.as_ref())
            .ok_or(PaintShopError::MachineOutOfRange {
                machine,
                machine_count: self.queues.len(),
            })
    }

    /// Order at `position`.
    pub fn order_at(&self, position: Position) -> Result<OrderId> {
        let queue = self.machine_queue(position.machine)?;
        queue
            .orders
            .get(position.index)
            .copied()
            .ok_or(PaintShopError::PositionOutOfRange {
                machine: position.machine,
                index: position.index,
                len: queue.len(),
            })
    }

    /// Total penalty of `machine`'s queue (0 for an empty queue), or `None`
    /// if the machine does not exist or its queue has stale cache entries.
    pub fn machine_cost(&self, machine: MachineId) -> Option<f64> {
        let queue = self.queues.get(machine)?;
        queue.is_current().then_some(queue.cost)
    }

    /// Finish time of the last order on `machine` (0 for an empty queue), or
    /// `None` if the machine does not exist or its queue is stale.
    pub fn completion_time(&self, machine: MachineId) -> Option<f64> {
        let queue = self.queues.get(machine)?;
        queue.is_current().then_some(queue.end)
    }

    /// Latest completion time over all machines, or `None` while any queue
    /// is stale.
    pub fn makespan(&self) -> Option<f64> {
        self.queues.iter().try_fold(0.0, |latest: f64, queue| {
            queue.is_current().then(|| latest.max(queue.end))
        })
    }

    /// Cached completion time at `position`, or `None` if the position does
    /// not exist or its cache entry is stale.
    pub fn completion_at(&self, position: Position) -> Option<f64> {
        let queue = self.queues.get(position.machine)?;
        (position.index < queue.valid_len).then(|| queue.completion[position.index])
    }

    /// Tardiness penalty of the single order at `position`, or `None` if the
    /// position does not exist or its cache entry is stale.
    pub fn penalty_at(&self, position: Position) -> Option<f64> {
        let queue = self.queues.get(position.machine)?;
        if position.index >= queue.valid_len {
            return None;
        }
        let before = match position.index {
            0 => 0.0,
            i => queue.cumulative[i - 1],
        };
        Some(queue.cumulative[position.index] - before)
    }

    /// True when every queue cache is up to date.
    pub fn is_current(&self) -> bool {
        self.queues.iter().all(|q| q.is_current())
    }

    /// True iff every order appears in exactly one queue exactly once.
    pub fn is_feasible(&self) -> bool {
        let mut seen = vec![false; self.instance.order_count()];
        let mut count = 0;
        for &order in self.queues.iter().flat_map(|q| q.orders.iter()) {
            match seen.get_mut(order) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
            count += 1;
        }
        count == seen.len()
    }

    /// Recomputes completion times and cumulative penalties on `machine` from
    /// `index` onward, then refreshes the total cost.
    ///
    /// Starts at the earlier of `index` and the first stale position, so a
    /// call never leaves stale entries behind.
    pub fn recalculate_from(&mut self, machine: MachineId, index: usize) -> Result<()> {
        let len = self.queue_len(machine)?;
        if index > len {
            return Err(PaintShopError::PositionOutOfRange { machine, index, len });
        }
        let instance = Arc::clone(&self.instance);
        Arc::make_mut(&mut self.queues[machine]).recalculate(&instance, machine, index);
        self.refresh_total();
        Ok(())
    }

    /// Recomputes every machine from scratch.
    pub fn recalculate_all(&mut self) {
        let instance = Arc::clone(&self.instance);
        for (machine, queue) in self.queues.iter_mut().enumerate() {
            let queue = Arc::make_mut(queue);
            queue.valid_len = 0;
            queue.recalculate(&instance, machine, 0);
        }
        self.refresh_total();
    }

    fn refresh_total(&mut self) {
        self.total_cost = self.queues.iter().map(|q| q.cost).sum();
    }

    /// Batches on `machine`, computed on first use and cached until the
    /// queue is edited.
    pub fn batches(&self, machine: MachineId) -> Result<&[Batch]> {
        let queue = self.machine_queue(machine)?;
        Ok(queue.batches.get_or_init(|| queue.discover_batches(&self.instance)))
    }

    /// Stable 64-bit hash of the queue contents.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }

    // Edits below leave the cache of every touched queue stale from the
    // earliest changed index; callers follow up with `recalculate_from`.

    fn queue_mut(&mut self, machine: MachineId) -> Result<&mut MachineQueue> {
        let machine_count = self.queues.len();
        self.queues
            .get_mut(machine)
            .map(Arc::make_mut)
            .ok_or(PaintShopError::MachineOutOfRange {
                machine,
                machine_count,
            })
    }

    fn check_position(&self, position: Position) -> Result<()> {
        self.order_at(position).map(|_| ())
    }

    /// Appends `order` to `machine` and updates the cost of the new slot.
    pub fn push_order(&mut self, machine: MachineId, order: OrderId) -> Result<()> {
        let queue = self.queue_mut(machine)?;
        let index = queue.len();
        queue.orders.push(order);
        queue.invalidate_from(index);
        self.recalculate_from(machine, index)
    }

    /// Exchanges the orders at `a` and `b`.
    pub fn swap_positions(&mut self, a: Position, b: Position) -> Result<()> {
        self.check_position(a)?;
        self.check_position(b)?;
        if a.machine == b.machine {
            let queue = self.queue_mut(a.machine)?;
            queue.orders.swap(a.index, b.index);
            queue.invalidate_from(a.index.min(b.index));
        } else {
            let order_a = self.order_at(a)?;
            let order_b = self.order_at(b)?;
            let queue = self.queue_mut(a.machine)?;
            queue.orders[a.index] = order_b;
            queue.invalidate_from(a.index);
            let queue = self.queue_mut(b.machine)?;
            queue.orders[b.index] = order_a;
            queue.invalidate_from(b.index);
        }
        Ok(())
    }

    /// Inserts `order` before `position` (or appends when the index equals
    /// the queue length).
    pub fn insert(&mut self, position: Position, order: OrderId) -> Result<()> {
        let queue = self.queue_mut(position.machine)?;
        if position.index > queue.len() {
            return Err(PaintShopError::PositionOutOfRange {
                machine: position.machine,
                index: position.index,
                len: queue.len(),
            });
        }
        queue.orders.insert(position.index, order);
        queue.invalidate_from(position.index);
        Ok(())
    }

    /// Removes and returns the order at `position`.
    pub fn remove(&mut self, position: Position) -> Result<OrderId> {
        self.check_position(position)?;
        let queue = self.queue_mut(position.machine)?;
        let order = queue.orders.remove(position.index);
        queue.invalidate_from(position.index);
        Ok(order)
    }

    /// Replaces `start..end` on `machine` with `orders`, returning the
    /// replaced orders.
    pub fn splice(
        &mut self,
        machine: MachineId,
        start: usize,
        end: usize,
        orders: &[OrderId],
    ) -> Result<Vec<OrderId>> {
        let queue = self.queue_mut(machine)?;
        if start > end || end > queue.len() {
            return Err(PaintShopError::PositionOutOfRange {
                machine,
                index: end.max(start),
                len: queue.len(),
            });
        }
        let removed = queue
            .orders
            .splice(start..end, orders.iter().copied())
            .collect();
        queue.invalidate_from(start);
        Ok(removed)
    }

    /// Exchanges the whole queues of machines `a` and `b`.
    pub fn swap_queues(&mut self, a: MachineId, b: MachineId) -> Result<()> {
        self.machine_queue(a)?;
        self.machine_queue(b)?;
        self.queues.swap(a, b);
        if a != b {
            self.queue_mut(a)?.invalidate_from(0);
            self.queue_mut(b)?.invalidate_from(0);
        }
        Ok(())
    }
}

impl PartialEq for Schedule {
    fn eq(&self, other: &Self) -> bool {
        self.queues == other.queues
    }
}

impl Eq for Schedule {}

impl Hash for Schedule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for queue in &self.queues {
            queue.hash(state);
        }
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (machine, queue) in self.queues.iter().enumerate() {
            writeln!(f, "M{machine}: {:?} {:.2}", queue.orders, queue.cost)?;
        }
        write!(f, "total: {:.2}", self.total_cost)
    }
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
