//! Move trait definition.

use std::fmt::{Debug, Display};

use paintshop_core::{MachineId, Position, Result, Schedule};
use smallvec::SmallVec;

/// Machines an edit touched, each with the first index it changed.
pub type DirtyQueues = SmallVec<[(MachineId, usize); 2]>;

/// A local edit of a schedule.
///
/// Implementors describe the edit in [`ScheduleMove::edit`]; the provided
/// [`ScheduleMove::apply`] runs it on a copy and recalculates only the
/// queues the edit reports as dirty.
pub trait ScheduleMove: Debug + Display {
    /// Edits `schedule` in place and reports the changed suffixes.
    ///
    /// Leaves the reported queues with stale cache entries.
    fn edit(&self, schedule: &mut Schedule) -> Result<DirtyQueues>;

    /// Returns true if the order now at `position` was moved by this edit.
    fn touches(&self, position: Position) -> bool;

    /// Returns an edited, fully costed copy of `schedule`.
    ///
    /// The original schedule is left untouched.
    fn apply(&self, schedule: &Schedule) -> Result<Schedule> {
        let mut next = schedule.clone();
        for (machine, index) in self.edit(&mut next)? {
            next.recalculate_from(machine, index)?;
        }
        Ok(next)
    }
}
