//! # History Ring
//!
//! Fixed-capacity circular array of [`AllocationRecord`]s with a single
//! write cursor. Not synchronized; [`HistoryLog`] wraps it in a lock.
//!
//! [`HistoryLog`]: crate::history::HistoryLog

use alloc::boxed::Box;
use alloc::vec::Vec;

use rogue_core::{Error, Result};

use crate::record::AllocationRecord;

// =============================================================================
// RING STATISTICS
// =============================================================================

/// Ring statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RingStats {
    /// Map events written
    pub total_maps: u64,
    /// Unmap events written
    pub total_unmaps: u64,
    /// Times the write cursor wrapped back to slot 0
    pub ring_wraps: u64,
}

impl RingStats {
    /// Total events written
    pub fn total_writes(&self) -> u64 {
        self.total_maps + self.total_unmaps
    }
}

// =============================================================================
// HISTORY RING
// =============================================================================

/// Circular buffer of allocation records
#[derive(Debug)]
pub struct HistoryRing {
    /// Record slots, zeroed at creation
    records: Box<[AllocationRecord]>,
    /// Next slot to write
    head: usize,
    /// Statistics
    stats: RingStats,
}

impl HistoryRing {
    /// Allocate a zeroed ring with `capacity` slots
    pub fn try_new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidParameter);
        }

        let mut records = Vec::new();
        records.try_reserve_exact(capacity)?;
        records.resize(capacity, AllocationRecord::default());

        Ok(Self {
            records: records.into_boxed_slice(),
            head: 0,
            stats: RingStats::default(),
        })
    }

    /// Number of slots
    #[inline]
    pub fn capacity(&self) -> usize {
        self.records.len()
    }

    /// Index of the next slot to be written
    #[inline]
    pub fn head(&self) -> usize {
        self.head
    }

    /// Number of slots holding a record
    pub fn len(&self) -> usize {
        let written = self.stats.total_writes();
        if written >= self.capacity() as u64 {
            self.capacity()
        } else {
            written as usize
        }
    }

    /// Check if nothing has been written yet
    pub fn is_empty(&self) -> bool {
        self.stats.total_writes() == 0
    }

    /// Get ring statistics
    pub fn stats(&self) -> &RingStats {
        &self.stats
    }

    /// Overwrite the slot at the cursor and advance it
    ///
    /// Constant time, never allocates. Once the ring is full this replaces
    /// the oldest record.
    pub fn push(&mut self, record: AllocationRecord) {
        debug_assert!(self.head < self.capacity());

        self.records[self.head] = record;
        self.head = (self.head + 1) % self.capacity();

        if record.allocated {
            self.stats.total_maps += 1;
        } else {
            self.stats.total_unmaps += 1;
        }
        if self.head == 0 {
            self.stats.ring_wraps += 1;
        }
    }

    /// Walk every slot once, from the most recently written backward
    ///
    /// Yields exactly `capacity()` slots, including unwritten ones; callers
    /// decide where to stop.
    pub fn newest_first(&self) -> impl Iterator<Item = &AllocationRecord> + '_ {
        let capacity = self.capacity();
        let head = self.head;

        (0..capacity).map(move |step| &self.records[(head + capacity - 1 - step) % capacity])
    }
}
