//! # Device Memory History
//!
//! A bounded, lock-protected log of device-memory map and unmap events.
//!
//! When the GPU raises a page fault the driver only knows the faulting
//! device virtual address. This subsystem remembers the last
//! [`HISTORY_LEN`] mappings so the fault handler can ask "what used to live
//! at this address, and who owned it?".
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        HistoryLog                               │
//! │                                                                 │
//! │  record_map / record_unmap          query / format_all          │
//! │            │                                 │                  │
//! │  ┌─────────▼─────────────────────────────────▼───────────────┐  │
//! │  │              spin::Mutex<HistoryRing>                     │  │
//! │  │   [rec][rec][rec][rec][   ][   ] ... [   ]                │  │
//! │  │                      ▲ head (next write)                  │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! │                              │                                  │
//! │                   StatsRegistry ("devicemem_history")           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Writes overwrite the oldest slot once the ring is full. Queries and
//! dumps walk backward from the newest slot, so results are always
//! newest-first.

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]
#![warn(clippy::all)]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod clock;
pub mod config;
pub mod format;
pub mod history;
pub mod query;
pub mod record;
pub mod ring;

#[cfg(test)]
mod testing;

// Re-exports
pub use config::HistoryConfig;
pub use history::{HistoryLog, HistoryStats};
pub use query::{HistoryQuery, PidFilter, QueryOutput, QueryResult};
pub use record::{AllocationRecord, Label};

// =============================================================================
// CONSTANTS
// =============================================================================

/// Default number of records kept in the ring
///
/// Keeps the record array just under [`HISTORY_BUDGET_BYTES`].
pub const HISTORY_LEN: usize = 29127;

/// Size of a record label buffer, including the terminating NUL
pub const TEXT_BUFSZ: usize = 40;

/// Maximum number of results a single query returns
pub const QUERY_OUT_MAX_RESULTS: usize = 10;

/// Raw process id meaning "any process" on the bridge interface
pub const PID_ANY_RAW: u32 = 0xFFFF_FFFE;

/// Name of the statistics entry the log registers
pub const STATS_ENTRY_NAME: &str = "devicemem_history";

/// Memory budget for the default record array
pub const HISTORY_BUDGET_BYTES: usize = 2 * 1024 * 1024;
