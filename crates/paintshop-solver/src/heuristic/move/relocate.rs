//! RelocateMove - moves one order to another queue position.

use std::fmt;

use paintshop_core::{Position, Result, Schedule};
use smallvec::smallvec;

use super::swap::occupied_positions;
use super::{DirtyQueues, ScheduleMove};

/// Removes the order at `source` and inserts it before `target`.
///
/// `target` indexes the queue as it is before the move; an index equal to
/// the queue length appends.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use paintshop_core::{Order, Position, ProblemInstance, Schedule};
/// use paintshop_solver::heuristic::r#move::{RelocateMove, ScheduleMove};
///
/// let instance = Arc::new(
///     ProblemInstance::builder()
///         .with_orders((0..4).map(|_| Order::new(1.0, 0, 10.0, 1.0)))
///         .with_machine(1.0)
///         .build()
///         .unwrap(),
/// );
/// let schedule = Schedule::from_queues(instance, vec![vec![0, 1, 2, 3]]).unwrap();
///
/// let moved = RelocateMove::new(Position::new(0, 3), Position::new(0, 0))
///     .apply(&schedule)
///     .unwrap();
/// assert_eq!(moved.queue(0), &[3, 0, 1, 2]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RelocateMove {
    source: Position,
    target: Position,
}

impl RelocateMove {
    pub fn new(source: Position, target: Position) -> Self {
        Self { source, target }
    }

    pub fn source(&self) -> Position {
        self.source
    }

    pub fn target(&self) -> Position {
        self.target
    }

    /// Where the relocated order ends up once the move is applied.
    pub fn destination(&self) -> Position {
        if self.source.machine == self.target.machine && self.target.index > self.source.index {
            Position::new(self.target.machine, self.target.index - 1)
        } else {
            self.target
        }
    }

    /// True for same-queue targets that change nothing or duplicate an
    /// adjacent swap.
    fn is_redundant(source: Position, target: Position) -> bool {
        source.machine == target.machine
            && (target.index == source.index
                || target.index + 1 == source.index
                || target.index == source.index + 1
                || target.index == source.index + 2)
    }

    /// Every non-redundant relocation: each order before each occupied
    /// position, plus each order appended to each queue.
    pub fn iter_moves(schedule: &Schedule) -> impl Iterator<Item = RelocateMove> + '_ {
        let positions = occupied_positions(schedule);
        let ends: Vec<Position> = (0..schedule.machine_count())
            .map(|machine| Position::new(machine, schedule.queue(machine).len()))
            .collect();
        let targets: std::rc::Rc<[Position]> = positions.iter().copied().chain(ends).collect();
        let sources = positions.to_vec();
        sources.into_iter().flat_map(move |source| {
            let targets = targets.clone();
            (0..targets.len())
                .map(move |t| RelocateMove::new(source, targets[t]))
                .filter(|m| !Self::is_redundant(m.source, m.target))
        })
    }

    pub fn enumerate(schedule: &Schedule) -> Vec<RelocateMove> {
        Self::iter_moves(schedule).collect()
    }
}

impl ScheduleMove for RelocateMove {
    fn edit(&self, schedule: &mut Schedule) -> Result<DirtyQueues> {
        let order = schedule.order_at(self.source)?;
        schedule.insert(self.target, order)?;

        let same_machine = self.source.machine == self.target.machine;
        // Inserting at or before the source shifts it one slot back.
        let stale = if same_machine && self.target.index <= self.source.index {
            Position::new(self.source.machine, self.source.index + 1)
        } else {
            self.source
        };
        schedule.remove(stale)?;

        Ok(if same_machine {
            smallvec![(self.source.machine, self.source.index.min(self.target.index))]
        } else {
            smallvec![
                (self.source.machine, self.source.index),
                (self.target.machine, self.target.index)
            ]
        })
    }

    fn touches(&self, position: Position) -> bool {
        position == self.destination()
    }
}

impl fmt::Display for RelocateMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "move: {} => {}", self.source, self.target)
    }
}
