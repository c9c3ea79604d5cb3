//! # Rogue Platform Traits
//!
//! The narrow surface through which driver subsystems talk to the host
//! kernel.
//!
//! ```text
//! host kernel
//!    │
//!    ├── ProcessSource    (who is calling)
//!    ├── MonotonicClock   (when, in ns)
//!    └── StatsRegistry    (debugfs-style text entries)
//!           │
//!           └── StatsEntry (registered by a subsystem)
//! ```
//!
//! Subsystems hold the per-call services (`ProcessSource`,
//! `MonotonicClock`) as generic parameters so the hot paths stay free of
//! virtual dispatch. The registry is only touched at init and teardown and
//! is passed as a trait object.

use alloc::sync::Arc;
use core::fmt;

use crate::error::Result;
use crate::types::*;

// =============================================================================
// PROCESS SOURCE
// =============================================================================

/// Source of the current process identifier
pub trait ProcessSource: Send + Sync {
    /// Identifier of the process on whose behalf the caller is running
    fn current_pid(&self) -> ProcessId;
}

// =============================================================================
// CLOCK
// =============================================================================

/// Monotonic nanosecond clock
///
/// Readings are 64-bit and may wrap. Consumers must compute intervals with
/// wrap in mind.
pub trait MonotonicClock: Send + Sync {
    /// Current time in nanoseconds
    fn now_ns(&self) -> u64;
}

impl<T: ProcessSource + ?Sized> ProcessSource for Arc<T> {
    #[inline]
    fn current_pid(&self) -> ProcessId {
        (**self).current_pid()
    }
}

impl<T: MonotonicClock + ?Sized> MonotonicClock for Arc<T> {
    #[inline]
    fn now_ns(&self) -> u64 {
        (**self).now_ns()
    }
}

// =============================================================================
// STATISTICS
// =============================================================================

/// A text entry that can be rendered on demand
///
/// The registry calls [`StatsEntry::show`] whenever the entry is read,
/// passing a sink that accepts formatted lines.
pub trait StatsEntry: Send + Sync {
    /// Render the entry into `out`
    fn show(&self, out: &mut dyn fmt::Write) -> fmt::Result;
}

/// Registry of named statistics entries (debugfs/procfs style)
pub trait StatsRegistry: Send + Sync {
    /// Register `entry` under `name`
    fn create_entry(&self, name: &'static str, entry: Arc<dyn StatsEntry>) -> Result<StatsHandle>;

    /// Remove a previously created entry
    ///
    /// The registry must drop its reference to the entry before returning.
    fn remove_entry(&self, handle: StatsHandle);
}

// =============================================================================
// STATIC ASSERTIONS
// =============================================================================

// Ensure key types are Send + Sync
static_assertions::assert_impl_all!(GpuAddr: Send, Sync, Copy);
static_assertions::assert_impl_all!(ByteSize: Send, Sync, Copy);
static_assertions::assert_impl_all!(ProcessId: Send, Sync, Copy);
static_assertions::assert_impl_all!(StatsHandle: Send, Sync, Copy);
static_assertions::assert_obj_safe!(ProcessSource, MonotonicClock, StatsEntry, StatsRegistry);
