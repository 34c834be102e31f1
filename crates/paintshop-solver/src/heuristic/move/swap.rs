//! SwapMove - exchanges two queue entries.

use std::fmt;

use paintshop_core::{Position, Result, Schedule};
use smallvec::smallvec;

use super::{DirtyQueues, ScheduleMove};

/// Exchanges the orders at two positions, on the same or different machines.
///
/// # Example
///
/// ```
/// use paintshop_core::Position;
/// use paintshop_solver::heuristic::r#move::SwapMove;
///
/// let swap = SwapMove::new(Position::new(0, 1), Position::new(1, 2));
/// assert_eq!(swap.to_string(), "swap: (0, 1) <=> (1, 2)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapMove {
    a: Position,
    b: Position,
}

impl SwapMove {
    pub fn new(a: Position, b: Position) -> Self {
        Self { a, b }
    }

    pub fn positions(&self) -> (Position, Position) {
        (self.a, self.b)
    }

    /// Every unordered pair of occupied positions, machine-major.
    pub fn iter_moves(schedule: &Schedule) -> impl Iterator<Item = SwapMove> + '_ {
        let positions = occupied_positions(schedule);
        let count = positions.len();
        (0..count).flat_map(move |i| {
            let positions = positions.clone();
            ((i + 1)..count).map(move |j| SwapMove::new(positions[i], positions[j]))
        })
    }

    pub fn enumerate(schedule: &Schedule) -> Vec<SwapMove> {
        Self::iter_moves(schedule).collect()
    }
}

pub(super) fn occupied_positions(schedule: &Schedule) -> std::rc::Rc<[Position]> {
    (0..schedule.machine_count())
        .flat_map(|machine| {
            (0..schedule.queue(machine).len()).map(move |index| Position::new(machine, index))
        })
        .collect()
}

impl ScheduleMove for SwapMove {
    fn edit(&self, schedule: &mut Schedule) -> Result<DirtyQueues> {
        schedule.swap_positions(self.a, self.b)?;
        Ok(if self.a.machine == self.b.machine {
            smallvec![(self.a.machine, self.a.index.min(self.b.index))]
        } else {
            smallvec![(self.a.machine, self.a.index), (self.b.machine, self.b.index)]
        })
    }

    fn touches(&self, position: Position) -> bool {
        position == self.a || position == self.b
    }
}

impl fmt::Display for SwapMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "swap: {} <=> {}", self.a, self.b)
    }
}
