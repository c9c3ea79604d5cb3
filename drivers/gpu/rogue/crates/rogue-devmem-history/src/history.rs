//! # History Log
//!
//! Lifecycle and locking around the [`HistoryRing`].
//!
//! A [`HistoryLog`] value existing *is* the initialized state: `init`
//! allocates the ring and registers the statistics entry, `deinit` (or
//! drop) unregisters and frees it. There is no way to record or query
//! before init or after teardown.

use alloc::sync::Arc;
use core::fmt;

use rogue_core::{
    ByteSize, GpuAddr, MonotonicClock, ProcessSource, Result, StatsEntry, StatsHandle,
    StatsRegistry,
};
use spin::Mutex;

use crate::config::HistoryConfig;
use crate::format;
use crate::query::{scan, HistoryQuery, QueryOutput};
use crate::record::{AllocationRecord, Label};
use crate::ring::{HistoryRing, RingStats};

/// Counters reported by [`HistoryLog::stats`]
pub type HistoryStats = RingStats;

// =============================================================================
// SHARED STATE
// =============================================================================

/// State shared between the log and its statistics entry
struct HistoryShared<P, C> {
    ring: Mutex<HistoryRing>,
    procs: P,
    clock: C,
}

impl<P: ProcessSource, C: MonotonicClock> HistoryShared<P, C> {
    fn write(&self, addr: GpuAddr, size: ByteSize, label: &str, allocated: bool) {
        let label = Label::new(label);
        let pid = self.procs.current_pid();

        let mut ring = self.ring.lock();
        ring.push(AllocationRecord {
            addr,
            size,
            label,
            time_ns: self.clock.now_ns(),
            allocated,
            pid,
        });
    }

    fn format_all(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        let ring = self.ring.lock();
        format::write_ring(out, &ring, self.clock.now_ns())
    }
}

impl<P: ProcessSource, C: MonotonicClock> StatsEntry for HistoryShared<P, C> {
    fn show(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        self.format_all(out)
    }
}

/// An entry created with a statistics registry
struct StatsRegistration {
    registry: Arc<dyn StatsRegistry>,
    handle: StatsHandle,
}

// =============================================================================
// HISTORY LOG
// =============================================================================

/// Bounded history of device-memory map/unmap events
///
/// All operations serialize on one lock. Writes are O(1); queries and dumps
/// walk at most the whole ring while holding it.
pub struct HistoryLog<P, C> {
    shared: Arc<HistoryShared<P, C>>,
    stats_entry: Option<StatsRegistration>,
}

impl<P, C> HistoryLog<P, C>
where
    P: ProcessSource + 'static,
    C: MonotonicClock + 'static,
{
    /// Allocate the ring and, when a registry is given, register the dump
    /// under `config.stats_name`
    ///
    /// Failing to register is logged and tolerated; the log still works,
    /// it just has no statistics entry.
    pub fn init(
        config: HistoryConfig,
        procs: P,
        clock: C,
        registry: Option<Arc<dyn StatsRegistry>>,
    ) -> Result<Self> {
        config.validate()?;

        let ring = HistoryRing::try_new(config.capacity).map_err(|e| {
            log::error!(
                "DevmemHistory: Failed to allocate space for {} records: {}",
                config.capacity,
                e
            );
            e
        })?;

        let shared = Arc::new(HistoryShared {
            ring: Mutex::new(ring),
            procs,
            clock,
        });

        let stats_entry = registry.and_then(|registry| {
            let entry: Arc<dyn StatsEntry> = shared.clone();
            match registry.create_entry(config.stats_name, entry) {
                Ok(handle) => Some(StatsRegistration { registry, handle }),
                Err(e) => {
                    log::warn!(
                        "DevmemHistory: Failed to create stats entry '{}': {}",
                        config.stats_name,
                        e
                    );
                    None
                }
            }
        });

        log::info!(
            "DevmemHistory: Initialized with {} records ({} stats entry)",
            config.capacity,
            if stats_entry.is_some() { "with" } else { "no" }
        );

        Ok(Self {
            shared,
            stats_entry,
        })
    }
}

impl<P: ProcessSource, C: MonotonicClock> HistoryLog<P, C> {
    /// Record that `[addr, addr + size)` was mapped
    pub fn record_map(&self, addr: GpuAddr, size: ByteSize, label: &str) {
        self.shared.write(addr, size, label, true);
    }

    /// Record that `[addr, addr + size)` was unmapped
    pub fn record_unmap(&self, addr: GpuAddr, size: ByteSize, label: &str) {
        self.shared.write(addr, size, label, false);
    }

    /// Find the most recent events covering `query.addr`
    ///
    /// Results are newest first and capped at
    /// [`QUERY_OUT_MAX_RESULTS`](crate::QUERY_OUT_MAX_RESULTS).
    pub fn query(&self, query: &HistoryQuery) -> QueryOutput {
        let ring = self.shared.ring.lock();
        scan(&ring, query, self.shared.clock.now_ns())
    }

    /// Render the whole history, newest first, into `out`
    pub fn format_all(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        self.shared.format_all(out)
    }

    /// Snapshot of the write counters
    pub fn stats(&self) -> HistoryStats {
        *self.shared.ring.lock().stats()
    }

    /// Number of slots in the ring
    pub fn capacity(&self) -> usize {
        self.shared.ring.lock().capacity()
    }

    /// Number of records currently held
    pub fn len(&self) -> usize {
        self.shared.ring.lock().len()
    }

    /// Check if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.shared.ring.lock().is_empty()
    }

    /// Check whether the log registered a statistics entry
    pub fn has_stats_entry(&self) -> bool {
        self.stats_entry.is_some()
    }

    /// Tear the log down
    ///
    /// Equivalent to dropping it; provided so callers can make teardown
    /// explicit at the subsystem's deinit point.
    pub fn deinit(self) {
        drop(self);
    }
}

impl<P, C> Drop for HistoryLog<P, C> {
    fn drop(&mut self) {
        if let Some(entry) = self.stats_entry.take() {
            entry.registry.remove_entry(entry.handle);
        }
        log::debug!("DevmemHistory: Deinitialized");
    }
}

impl<P, C> fmt::Debug for HistoryLog<P, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryLog")
            .field("ring", &*self.shared.ring.lock())
            .field(
                "stats_entry",
                &self.stats_entry.as_ref().map(|entry| entry.handle),
            )
            .finish()
    }
}
