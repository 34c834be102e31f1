//! Solution-space indexing.
//!
//! Maps integers in `[0, N)` onto the `N` possible assignments of orders to
//! machine queues so that a uniformly random integer yields a uniformly
//! random schedule without enumerating the space.

mod combinatorics;
mod indexer;

pub use combinatorics::{binomial, falling_factorial};
pub use indexer::CombinatorialIndexer;
