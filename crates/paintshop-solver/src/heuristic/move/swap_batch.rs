//! SwapBatchMove - exchanges two same-color runs.

use std::fmt;

use paintshop_core::{Batch, MachineId, PaintShopError, Position, Result, Schedule};
use smallvec::smallvec;

use super::{DirtyQueues, ScheduleMove};

/// Exchanges two batches, which may differ in length and may share a
/// machine.
///
/// # Example
///
/// ```
/// use paintshop_core::Batch;
/// use paintshop_solver::heuristic::r#move::SwapBatchMove;
///
/// let swap = SwapBatchMove::new((0, Batch { start: 1, end: 3 }), (1, Batch { start: 0, end: 2 }));
/// assert_eq!(swap.to_string(), "bswp: (0,[1,3]) <=> (1,[0,2])");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapBatchMove {
    a: (MachineId, Batch),
    b: (MachineId, Batch),
}

impl SwapBatchMove {
    /// Creates a batch swap; on a shared machine the earlier batch comes first.
    pub fn new(a: (MachineId, Batch), b: (MachineId, Batch)) -> Self {
        if a.0 == b.0 && b.1.start < a.1.start {
            Self { a: b, b: a }
        } else {
            Self { a, b }
        }
    }

    pub fn batches(&self) -> ((MachineId, Batch), (MachineId, Batch)) {
        (self.a, self.b)
    }

    /// Every unordered pair of batches in the schedule.
    pub fn iter_moves(schedule: &Schedule) -> impl Iterator<Item = SwapBatchMove> + '_ {
        let batches: Vec<(MachineId, Batch)> = (0..schedule.machine_count())
            .flat_map(|machine| {
                schedule
                    .batches(machine)
                    .into_iter()
                    .flatten()
                    .map(move |batch| (machine, *batch))
            })
            .collect();
        let count = batches.len();
        (0..count).flat_map(move |i| {
            let batches = batches.clone();
            ((i + 1)..count).map(move |j| SwapBatchMove::new(batches[i], batches[j]))
        })
    }

    pub fn enumerate(schedule: &Schedule) -> Vec<SwapBatchMove> {
        Self::iter_moves(schedule).collect()
    }

    fn slice(schedule: &Schedule, (machine, batch): (MachineId, Batch)) -> Result<Vec<usize>> {
        schedule
            .queue_len(machine)
            .and_then(|len| {
                if batch.end <= len {
                    Ok(schedule.queue(machine)[batch.start..batch.end].to_vec())
                } else {
                    Err(PaintShopError::PositionOutOfRange {
                        machine,
                        index: batch.end,
                        len,
                    })
                }
            })
    }
}

impl ScheduleMove for SwapBatchMove {
    fn edit(&self, schedule: &mut Schedule) -> Result<DirtyQueues> {
        let (machine_a, batch_a) = self.a;
        let (machine_b, batch_b) = self.b;
        let orders_a = Self::slice(schedule, self.a)?;
        let orders_b = Self::slice(schedule, self.b)?;

        if machine_a == machine_b {
            if batch_a.end > batch_b.start {
                return Err(PaintShopError::PositionOutOfRange {
                    machine: machine_a,
                    index: batch_b.start,
                    len: batch_a.end,
                });
            }
            // Later slice first so the earlier indices stay put.
            schedule.splice(machine_b, batch_b.start, batch_b.end, &orders_a)?;
            schedule.splice(machine_a, batch_a.start, batch_a.end, &orders_b)?;
            Ok(smallvec![(machine_a, batch_a.start)])
        } else {
            schedule.splice(machine_a, batch_a.start, batch_a.end, &orders_b)?;
            schedule.splice(machine_b, batch_b.start, batch_b.end, &orders_a)?;
            Ok(smallvec![(machine_a, batch_a.start), (machine_b, batch_b.start)])
        }
    }

    fn touches(&self, position: Position) -> bool {
        let (machine_a, batch_a) = self.a;
        let (machine_b, batch_b) = self.b;
        // Where each batch's orders land after the exchange.
        let b_lands = (machine_a, batch_a.start, batch_a.start + batch_b.len());
        let a_lands = if machine_a == machine_b {
            (machine_b, batch_b.end - batch_a.len(), batch_b.end)
        } else {
            (machine_b, batch_b.start, batch_b.start + batch_a.len())
        };
        [b_lands, a_lands].iter().any(|&(machine, start, end)| {
            position.machine == machine && (start..end).contains(&position.index)
        })
    }
}

impl fmt::Display for SwapBatchMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bswp: ({},[{},{}]) <=> ({},[{},{}])",
            self.a.0, self.a.1.start, self.a.1.end, self.b.0, self.b.1.start, self.b.1.end
        )
    }
}
