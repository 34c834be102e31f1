//! Core types for the paint shop scheduler.
//!
//! This crate provides:
//! - [`ProblemInstance`]: orders, machines and setup times
//! - [`Schedule`]: per-machine queues with an incremental cost cache
//! - [`CombinatorialIndexer`]: uniform indexing of the solution space

pub mod error;
pub mod instance;
pub mod schedule;
pub mod space;

pub use error::{PaintShopError, Result};
pub use instance::{
    ColorId, Machine, MachineId, Order, OrderId, ProblemInstance, ProblemInstanceBuilder,
};
pub use schedule::{Batch, MachineQueue, Position, Schedule};
pub use space::CombinatorialIndexer;
