//! Move system for editing schedules.
//!
//! Every move is a small value that can be applied to any schedule of a
//! compatible shape. Applying never mutates the input: the result is a new
//! schedule sharing unchanged queues with the original.
//!
//! # Move families
//!
//! - [`SwapMove`] - exchanges two queue entries
//! - [`RelocateMove`] - moves one order before another position
//! - [`SwapQueuesMove`] - exchanges two machines' queues
//! - [`SwapBatchMove`] - exchanges two same-color runs
//! - [`RestartMove`] - replaces the schedule with a constructed one
//!
//! [`Move`] is the closed union of all families.

mod relocate;
mod restart;
mod swap;
mod swap_batch;
mod swap_queues;
mod traits;

use std::fmt;

use paintshop_core::{Position, Result, Schedule};

pub use relocate::RelocateMove;
pub use restart::RestartMove;
pub use swap::SwapMove;
pub use swap_batch::SwapBatchMove;
pub use swap_queues::SwapQueuesMove;
pub use traits::{DirtyQueues, ScheduleMove};

/// Any move of any family.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Move {
    Swap(SwapMove),
    Relocate(RelocateMove),
    SwapQueues(SwapQueuesMove),
    SwapBatch(SwapBatchMove),
    Restart(RestartMove),
}

impl Move {
    /// Returns a new schedule with this move applied.
    pub fn apply(&self, schedule: &Schedule) -> Result<Schedule> {
        match self {
            Move::Swap(m) => m.apply(schedule),
            Move::Relocate(m) => m.apply(schedule),
            Move::SwapQueues(m) => m.apply(schedule),
            Move::SwapBatch(m) => m.apply(schedule),
            Move::Restart(m) => m.apply(schedule),
        }
    }

    /// Returns true if the order at `position` of the resulting schedule was
    /// moved.
    pub fn touches(&self, position: Position) -> bool {
        match self {
            Move::Swap(m) => m.touches(position),
            Move::Relocate(m) => m.touches(position),
            Move::SwapQueues(m) => m.touches(position),
            Move::SwapBatch(m) => m.touches(position),
            Move::Restart(m) => m.touches(position),
        }
    }

    /// Short family tag, as used in the display form.
    pub fn kind(&self) -> &'static str {
        match self {
            Move::Swap(_) => "swap",
            Move::Relocate(_) => "move",
            Move::SwapQueues(_) => "qswp",
            Move::SwapBatch(_) => "bswp",
            Move::Restart(_) => "gnew",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Swap(m) => fmt::Display::fmt(m, f),
            Move::Relocate(m) => fmt::Display::fmt(m, f),
            Move::SwapQueues(m) => fmt::Display::fmt(m, f),
            Move::SwapBatch(m) => fmt::Display::fmt(m, f),
            Move::Restart(m) => fmt::Display::fmt(m, f),
        }
    }
}

impl From<SwapMove> for Move {
    fn from(m: SwapMove) -> Self {
        Move::Swap(m)
    }
}

impl From<RelocateMove> for Move {
    fn from(m: RelocateMove) -> Self {
        Move::Relocate(m)
    }
}

impl From<SwapQueuesMove> for Move {
    fn from(m: SwapQueuesMove) -> Self {
        Move::SwapQueues(m)
    }
}

impl From<SwapBatchMove> for Move {
    fn from(m: SwapBatchMove) -> Self {
        Move::SwapBatch(m)
    }
}

impl From<RestartMove> for Move {
    fn from(m: RestartMove) -> Self {
        Move::Restart(m)
    }
}

#[cfg(test)]
mod tests;
