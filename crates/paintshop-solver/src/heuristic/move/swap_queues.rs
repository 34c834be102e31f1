//! SwapQueuesMove - exchanges two machines' queues.

use std::fmt;

use paintshop_core::{MachineId, Position, Result, Schedule};
use smallvec::smallvec;

use super::{DirtyQueues, ScheduleMove};

/// Exchanges the complete queues of two machines.
///
/// Both queues are recalculated from the start since machine speeds differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapQueuesMove {
    a: MachineId,
    b: MachineId,
}

impl SwapQueuesMove {
    pub fn new(a: MachineId, b: MachineId) -> Self {
        Self { a, b }
    }

    pub fn machines(&self) -> (MachineId, MachineId) {
        (self.a, self.b)
    }

    /// Every unordered machine pair with at least one non-empty queue.
    pub fn iter_moves(schedule: &Schedule) -> impl Iterator<Item = SwapQueuesMove> + '_ {
        let machines = schedule.machine_count();
        (0..machines)
            .flat_map(move |a| ((a + 1)..machines).map(move |b| SwapQueuesMove::new(a, b)))
            .filter(|m| !(schedule.queue(m.a).is_empty() && schedule.queue(m.b).is_empty()))
    }

    pub fn enumerate(schedule: &Schedule) -> Vec<SwapQueuesMove> {
        Self::iter_moves(schedule).collect()
    }
}

impl ScheduleMove for SwapQueuesMove {
    fn edit(&self, schedule: &mut Schedule) -> Result<DirtyQueues> {
        schedule.swap_queues(self.a, self.b)?;
        Ok(smallvec![(self.a, 0), (self.b, 0)])
    }

    fn touches(&self, position: Position) -> bool {
        position.machine == self.a || position.machine == self.b
    }
}

impl fmt::Display for SwapQueuesMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "qswp: {} <=> {}", self.a, self.b)
    }
}
