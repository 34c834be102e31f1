//! Problem instance: orders, machines and the setup-time lookup.
//!
//! A [`ProblemInstance`] is built once through [`ProblemInstanceBuilder`]
//! and never mutated afterwards. Schedules share it behind an `Arc`.
//!
//! # Example
//!
//! ```
//! use paintshop_core::{Order, ProblemInstance};
//!
//! let instance = ProblemInstance::builder()
//!     .with_order(Order::new(10.0, 0, 5.0, 1.0))
//!     .with_order(Order::new(5.0, 1, 5.0, 1.0))
//!     .with_machine(1.0)
//!     .with_setup(0, 1, 2.0)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(instance.order_count(), 2);
//! assert_eq!(instance.setup_time(Some(0), Some(1)), 2.0);
//! assert_eq!(instance.setup_time(None, Some(1)), 0.0);
//! ```

use crate::error::{PaintShopError, Result};

/// Dense order id in `[0, order_count)`.
pub type OrderId = usize;

/// Dense machine id in `[0, machine_count)`.
pub type MachineId = usize;

/// Dense paint color id in `[0, color_count)`.
pub type ColorId = usize;

/// A unit of paint work.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Order {
    /// Surface to paint; processing time is `surface / speed`.
    pub surface: f64,
    pub color: ColorId,
    pub deadline: f64,
    /// Penalty per time unit of tardiness.
    pub penalty_rate: f64,
}

impl Order {
    pub fn new(surface: f64, color: ColorId, deadline: f64, penalty_rate: f64) -> Self {
        Self {
            surface,
            color,
            deadline,
            penalty_rate,
        }
    }
}

/// A paint machine.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Machine {
    /// Surface painted per time unit.
    pub speed: f64,
}

impl Machine {
    pub fn new(speed: f64) -> Self {
        Self { speed }
    }
}

/// Immutable view of a paint shop problem.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemInstance {
    orders: Vec<Order>,
    machines: Vec<Machine>,
    color_count: usize,
    // Row-major `color_count x color_count`, `setups[from * color_count + to]`.
    setups: Vec<f64>,
}

impl ProblemInstance {
    /// Starts building a new instance.
    pub fn builder() -> ProblemInstanceBuilder {
        ProblemInstanceBuilder::default()
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    pub fn machine_count(&self) -> usize {
        self.machines.len()
    }

    pub fn color_count(&self) -> usize {
        self.color_count
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn machines(&self) -> &[Machine] {
        &self.machines
    }

    /// Returns the order with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `order` is not a valid order id.
    pub fn order(&self, order: OrderId) -> &Order {
        &self.orders[order]
    }

    /// Returns the machine with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `machine` is not a valid machine id.
    pub fn machine(&self, machine: MachineId) -> &Machine {
        &self.machines[machine]
    }

    /// Iterates over all order ids.
    pub fn order_ids(&self) -> std::ops::Range<OrderId> {
        0..self.orders.len()
    }

    /// Iterates over all machine ids.
    pub fn machine_ids(&self) -> std::ops::Range<MachineId> {
        0..self.machines.len()
    }

    /// Setup delay when switching from color `from` to color `to`.
    ///
    /// Zero when the colors are equal or either side is `None`.
    pub fn setup_time(&self, from: Option<ColorId>, to: Option<ColorId>) -> f64 {
        match (from, to) {
            (Some(a), Some(b)) if a != b => self.setups[a * self.color_count + b],
            _ => 0.0,
        }
    }

    /// Setup delay between two consecutive orders on the same machine.
    pub fn setup_between(&self, previous: Option<OrderId>, next: OrderId) -> f64 {
        self.setup_time(
            previous.map(|o| self.orders[o].color),
            Some(self.orders[next].color),
        )
    }

    /// Time `machine` needs to paint `order`.
    pub fn processing_time(&self, order: OrderId, machine: MachineId) -> f64 {
        self.orders[order].surface / self.machines[machine].speed
    }

    /// Tardiness penalty for finishing `order` at `completion_time`.
    pub fn penalty(&self, order: OrderId, completion_time: f64) -> f64 {
        let order = &self.orders[order];
        order.penalty_rate * (completion_time - order.deadline).max(0.0)
    }
}

/// Builder for [`ProblemInstance`].
///
/// Colors are discovered from orders and setup entries; any color pair
/// without an explicit setup entry has zero setup time.
#[derive(Debug, Clone, Default)]
pub struct ProblemInstanceBuilder {
    orders: Vec<Order>,
    machines: Vec<Machine>,
    setups: Vec<(ColorId, ColorId, f64)>,
}

impl ProblemInstanceBuilder {
    /// Adds an order; its id is the number of orders added before it.
    pub fn with_order(mut self, order: Order) -> Self {
        self.orders.push(order);
        self
    }

    pub fn with_orders(mut self, orders: impl IntoIterator<Item = Order>) -> Self {
        self.orders.extend(orders);
        self
    }

    /// Adds a machine with the given speed.
    pub fn with_machine(mut self, speed: f64) -> Self {
        self.machines.push(Machine::new(speed));
        self
    }

    pub fn with_machines(mut self, speeds: impl IntoIterator<Item = f64>) -> Self {
        self.machines.extend(speeds.into_iter().map(Machine::new));
        self
    }

    /// Sets the setup delay from color `from` to color `to`.
    pub fn with_setup(mut self, from: ColorId, to: ColorId, time: f64) -> Self {
        self.setups.push((from, to, time));
        self
    }

    /// Validates the collected data and builds the instance.
    ///
    /// # Errors
    ///
    /// Returns [`PaintShopError::InvalidInstance`] when there are no machines,
    /// a machine speed is not strictly positive, or a surface, deadline,
    /// penalty rate or setup time is negative or not finite.
    pub fn build(self) -> Result<ProblemInstance> {
        if self.machines.is_empty() {
            return Err(PaintShopError::InvalidInstance(
                "instance has no machines".to_string(),
            ));
        }
        for (id, machine) in self.machines.iter().enumerate() {
            if !(machine.speed.is_finite() && machine.speed > 0.0) {
                return Err(PaintShopError::InvalidInstance(format!(
                    "machine {id} has non-positive speed {}",
                    machine.speed
                )));
            }
        }
        for (id, order) in self.orders.iter().enumerate() {
            let fields = [
                ("surface", order.surface),
                ("deadline", order.deadline),
                ("penalty rate", order.penalty_rate),
            ];
            if let Some((name, value)) = fields
                .iter()
                .find(|(_, v)| !(v.is_finite() && *v >= 0.0))
            {
                return Err(PaintShopError::InvalidInstance(format!(
                    "order {id} has invalid {name} {value}"
                )));
            }
        }

        let color_count = self
            .orders
            .iter()
            .map(|o| o.color + 1)
            .chain(self.setups.iter().map(|&(a, b, _)| a.max(b) + 1))
            .max()
            .unwrap_or(0);

        let mut setups = vec![0.0; color_count * color_count];
        for (from, to, time) in self.setups {
            if !(time.is_finite() && time >= 0.0) {
                return Err(PaintShopError::InvalidInstance(format!(
                    "setup {from} -> {to} has invalid time {time}"
                )));
            }
            if from != to {
                setups[from * color_count + to] = time;
            }
        }

        Ok(ProblemInstance {
            orders: self.orders,
            machines: self.machines,
            color_count,
            setups,
        })
    }
}
