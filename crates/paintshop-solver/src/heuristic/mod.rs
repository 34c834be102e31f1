//! Heuristic components for searching
//!
//! This module contains:
//! - Moves: local edits of a schedule
//! - Selectors: neighborhoods and the strategies that pick from them

pub mod r#move;
pub mod selector;

pub use r#move::{
    DirtyQueues, Move, RelocateMove, RestartMove, ScheduleMove, SwapBatchMove, SwapMove,
    SwapQueuesMove,
};
pub use selector::{
    Acceptance, BestStrategy, FirstStrategy, Neighborhood, RandomStrategy, Selection,
    SelectionStrategy,
};
