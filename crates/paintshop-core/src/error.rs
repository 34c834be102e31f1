//! Error types for the paint shop scheduler

use thiserror::Error;

/// Main error type for paint shop operations.
///
/// Every variant except [`PaintShopError::Config`] signals a broken contract:
/// the caller passed an index the schedule or solution space cannot honor,
/// or a move produced a schedule that lost or duplicated an order. None of
/// them are retryable.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PaintShopError {
    /// The problem instance failed validation while being built.
    #[error("Invalid instance: {0}")]
    InvalidInstance(String),

    /// A machine id outside `[0, machine_count)`.
    #[error("Machine {machine} out of range (instance has {machine_count} machines)")]
    MachineOutOfRange { machine: usize, machine_count: usize },

    /// An order id outside `[0, order_count)`.
    #[error("Order {order} out of range (instance has {order_count} orders)")]
    OrderOutOfRange { order: usize, order_count: usize },

    /// A schedule built from a different number of queues than machines.
    #[error("Expected {expected} queues, got {actual}")]
    QueueCountMismatch { expected: usize, actual: usize },

    /// A queue position past the end of a machine's queue.
    #[error("Position {index} out of range on machine {machine} (queue length {len})")]
    PositionOutOfRange {
        machine: usize,
        index: usize,
        len: usize,
    },

    /// A solution index outside `[0, count)`.
    #[error("Solution index {index} out of range (solution space has {count} schedules)")]
    IndexOutOfRange { index: u128, count: u128 },

    /// The solution space needs at least one machine.
    #[error("Solution space requires at least one machine")]
    InvalidMachineCount,

    /// A solution space count does not fit into `u128`.
    #[error("Solution space of {orders} orders on {machines} machines overflows u128")]
    CountOverflow { orders: usize, machines: usize },

    /// A schedule dropped or duplicated an order.
    #[error("Infeasible schedule: {0}")]
    Infeasible(String),

    /// Error in solver configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for paint shop operations.
pub type Result<T> = std::result::Result<T, PaintShopError>;
