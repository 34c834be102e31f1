//! Shared test fixtures for paint shop crates.
//!
//! This crate provides instances, schedules and a from-scratch cost oracle.
//! It depends only on `paintshop-core` so every other crate can use it as a
//! dev-dependency.
//!
//! - [`instances`] - Hand-built and seeded random problem instances
//! - [`oracle`] - Cost recomputation independent of the schedule cache
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! paintshop-test = { workspace = true }
//! ```

pub mod instances;
pub mod oracle;

pub use instances::{
    batched_instance, random_instance, round_robin, three_order_instance, two_machine_instance,
};
pub use oracle::{assert_cost_consistent, scratch_cost};
