//! Bijection between integers and machine assignments.

use std::collections::HashMap;
use std::sync::Arc;

use super::combinatorics::{binomial, falling_factorial, nth_combination};
use crate::error::{PaintShopError, Result};
use crate::instance::{OrderId, ProblemInstance};
use crate::schedule::Schedule;

/// One "number of empty queues" bucket of the solution space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bucket {
    /// Count of all solutions in this and every earlier bucket.
    cumulative: u128,
    empty: usize,
    /// Arrangements of the blocks over the labeled machines.
    arrangements: u128,
}

/// Decodes integer indices into schedules, drawing on memoized counts.
///
/// Index `i` of a space with `n` orders and `k` machines is split into a
/// bucket by the number `e` of empty queues, a partition of the orders into
/// `k - e` non-empty blocks, and an arrangement of those blocks plus `e`
/// empty queues over the `k` machines. Within a block, orders keep their id
/// order. The space has exactly `k^n` members.
///
/// # Example
///
/// ```
/// use paintshop_core::CombinatorialIndexer;
///
/// let mut indexer = CombinatorialIndexer::new();
/// assert_eq!(indexer.count_partitions(4, 2).unwrap(), 7);
/// assert_eq!(indexer.count_partitions_allow_empty(4, 2).unwrap(), 16);
///
/// let blocks = indexer.nth_partition(&[0, 1, 2, 3], 2, 0).unwrap();
/// assert_eq!(blocks, vec![vec![0], vec![1, 2, 3]]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct CombinatorialIndexer {
    partitions: HashMap<(usize, usize), u128>,
    buckets: HashMap<(usize, usize), Arc<[Bucket]>>,
}

impl CombinatorialIndexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ways to split `n` items into `k` non-empty blocks.
    ///
    /// Zero when `n < k`, including `count_partitions(0, 1)`.
    pub fn count_partitions(&mut self, n: usize, k: usize) -> Result<u128> {
        if k == 0 {
            return Err(PaintShopError::InvalidMachineCount);
        }
        if n < k {
            return Ok(0);
        }
        if k == 1 {
            return Ok(1);
        }
        if let Some(&count) = self.partitions.get(&(n, k)) {
            return Ok(count);
        }

        // The first item's block takes `y` extra items from the other n - 1.
        let mut total: u128 = 0;
        for y in 0..=(n - k) {
            let rest = self.count_partitions(n - 1 - y, k - 1)?;
            total = binomial(n - 1, y)
                .and_then(|c| c.checked_mul(rest))
                .and_then(|ways| total.checked_add(ways))
                .ok_or(PaintShopError::CountOverflow {
                    orders: n,
                    machines: k,
                })?;
        }
        self.partitions.insert((n, k), total);
        Ok(total)
    }

    /// Number of ways to assign `n` orders to `k` labeled machine queues,
    /// any of which may stay empty.
    pub fn count_partitions_allow_empty(&mut self, n: usize, k: usize) -> Result<u128> {
        if k == 0 {
            return Err(PaintShopError::InvalidMachineCount);
        }
        if n == 0 {
            return Ok(1);
        }
        let buckets = self.buckets(n, k)?;
        Ok(buckets.last().map_or(0, |b| b.cumulative))
    }

    /// Size of the solution space of `instance`.
    pub fn sample_count(&mut self, instance: &ProblemInstance) -> Result<u128> {
        self.count_partitions_allow_empty(instance.order_count(), instance.machine_count())
    }

    fn buckets(&mut self, n: usize, k: usize) -> Result<Arc<[Bucket]>> {
        if let Some(buckets) = self.buckets.get(&(n, k)) {
            return Ok(Arc::clone(buckets));
        }
        let overflow = PaintShopError::CountOverflow {
            orders: n,
            machines: k,
        };
        let mut cumulative: u128 = 0;
        let mut buckets = Vec::with_capacity(k);
        for empty in 0..k {
            let parts = self.count_partitions(n, k - empty)?;
            let arrangements = falling_factorial(k, empty).ok_or(overflow.clone())?;
            cumulative = parts
                .checked_mul(arrangements)
                .and_then(|c| cumulative.checked_add(c))
                .ok_or(overflow.clone())?;
            buckets.push(Bucket {
                cumulative,
                empty,
                arrangements,
            });
        }
        let buckets: Arc<[Bucket]> = buckets.into();
        self.buckets.insert((n, k), Arc::clone(&buckets));
        Ok(buckets)
    }

    /// The `index`-th `size`-subset of `items` in lexicographic order.
    pub fn nth_subset<T: Copy>(items: &[T], size: usize, index: u128) -> Result<Vec<T>> {
        let positions = nth_combination(items.len(), size, index).ok_or_else(|| {
            PaintShopError::IndexOutOfRange {
                index,
                count: binomial(items.len(), size).unwrap_or(u128::MAX),
            }
        })?;
        Ok(positions.into_iter().map(|p| items[p]).collect())
    }

    /// The `index`-th split of `items` into `k` non-empty blocks.
    ///
    /// Each block keeps the input order of its items, and blocks are
    /// ordered by their first item.
    pub fn nth_partition<T: Copy>(
        &mut self,
        items: &[T],
        k: usize,
        index: u128,
    ) -> Result<Vec<Vec<T>>> {
        let count = self.count_partitions(items.len(), k)?;
        if index >= count {
            return Err(PaintShopError::IndexOutOfRange { index, count });
        }

        let mut rest = items.to_vec();
        let mut blocks = Vec::with_capacity(k);
        let mut index = index;
        for left in (2..=k).rev() {
            let n = rest.len();
            let mut chosen = None;
            for y in 0..=(n - left) {
                let subsets = binomial(n - 1, y);
                let extra = subsets
                    .zip(self.count_partitions(n - 1 - y, left - 1).ok())
                    .and_then(|(s, p)| s.checked_mul(p));
                let (Some(subsets), Some(extra)) = (subsets, extra) else {
                    return Err(PaintShopError::CountOverflow {
                        orders: n,
                        machines: left,
                    });
                };
                if index < extra {
                    chosen = Some((y, subsets));
                    break;
                }
                index -= extra;
            }
            let (y, subsets) = chosen.ok_or(PaintShopError::IndexOutOfRange { index, count })?;

            let (partition_index, subset_index) = (index / subsets, index % subsets);
            let picked = nth_combination(n - 1, y, subset_index)
                .ok_or(PaintShopError::IndexOutOfRange { index, count })?;

            let mut block = Vec::with_capacity(y + 1);
            let mut remaining = Vec::with_capacity(n - 1 - y);
            block.push(rest[0]);
            let mut picked = picked.into_iter().peekable();
            for (offset, &item) in rest[1..].iter().enumerate() {
                if picked.next_if_eq(&offset).is_some() {
                    block.push(item);
                } else {
                    remaining.push(item);
                }
            }
            blocks.push(block);
            rest = remaining;
            index = partition_index;
        }
        blocks.push(rest);
        Ok(blocks)
    }

    /// Queue contents of the `index`-th schedule of `instance`.
    pub fn nth_solution(
        &mut self,
        instance: &ProblemInstance,
        index: u128,
    ) -> Result<Vec<Vec<OrderId>>> {
        let n = instance.order_count();
        let k = instance.machine_count();
        if k == 0 {
            return Err(PaintShopError::InvalidMachineCount);
        }
        if n == 0 {
            return match index {
                0 => Ok(vec![Vec::new(); k]),
                _ => Err(PaintShopError::IndexOutOfRange { index, count: 1 }),
            };
        }

        let buckets = self.buckets(n, k)?;
        let count = buckets.last().map_or(0, |b| b.cumulative);
        let mut previous = 0;
        let bucket = buckets
            .iter()
            .find(|b| {
                let hit = index < b.cumulative;
                if !hit {
                    previous = b.cumulative;
                }
                hit
            })
            .ok_or(PaintShopError::IndexOutOfRange { index, count })?;

        let local = index - previous;
        let (part_index, arrangement_index) =
            (local / bucket.arrangements, local % bucket.arrangements);
        let order_ids: Vec<OrderId> = instance.order_ids().collect();
        let blocks = self.nth_partition(&order_ids, k - bucket.empty, part_index)?;
        nth_arrangement(blocks, bucket.empty, arrangement_index)
            .ok_or(PaintShopError::IndexOutOfRange { index, count })
    }

    /// The `index`-th schedule of `instance`, with costs computed.
    pub fn nth_schedule(&mut self, instance: &Arc<ProblemInstance>, index: u128) -> Result<Schedule> {
        let queues = self.nth_solution(instance, index)?;
        Schedule::from_queues(Arc::clone(instance), queues)
    }
}

/// The `index`-th distinct arrangement, in lexicographic order, of `empty`
/// empty queues followed by `blocks` (sorted by first item).
fn nth_arrangement<T>(mut blocks: Vec<Vec<T>>, mut empty: usize, mut index: u128) -> Option<Vec<Vec<T>>> {
    let slots = empty + blocks.len();
    let mut arranged = Vec::with_capacity(slots);
    for slot in 0..slots {
        let left = slots - slot - 1;
        if empty > 0 {
            let with_empty = falling_factorial(left, empty - 1)?;
            if index < with_empty {
                arranged.push(Vec::new());
                empty -= 1;
                continue;
            }
            index -= with_empty;
        }
        let per_block = falling_factorial(left, empty)?;
        let pick = usize::try_from(index / per_block).ok()?;
        index %= per_block;
        if pick >= blocks.len() {
            return None;
        }
        arranged.push(blocks.remove(pick));
    }
    Some(arranged)
}
