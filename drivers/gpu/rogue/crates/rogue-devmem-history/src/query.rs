//! # History Queries
//!
//! Reverse-chronological lookup of the records covering a device virtual
//! address, optionally restricted to one process.

use arrayvec::ArrayVec;
use rogue_core::{ByteSize, GpuAddr, ProcessId};

use crate::clock::age_ns;
use crate::record::Label;
use crate::ring::HistoryRing;
use crate::{PID_ANY_RAW, QUERY_OUT_MAX_RESULTS};

// =============================================================================
// QUERY INPUT
// =============================================================================

/// Which processes a query matches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PidFilter {
    /// Records from every process
    Any,
    /// Records from one process only
    Pid(ProcessId),
}

impl PidFilter {
    /// Decode the raw process id used on the bridge interface
    pub const fn from_raw(raw: u32) -> Self {
        if raw == PID_ANY_RAW {
            Self::Any
        } else {
            Self::Pid(ProcessId::new(raw))
        }
    }

    /// Check whether a record from `pid` passes the filter
    #[inline]
    pub fn matches(self, pid: ProcessId) -> bool {
        match self {
            Self::Any => true,
            Self::Pid(wanted) => wanted == pid,
        }
    }
}

/// A history lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryQuery {
    /// Process filter
    pub pid: PidFilter,
    /// Address that must fall inside a record's range
    pub addr: GpuAddr,
}

impl HistoryQuery {
    /// Look up `addr` across all processes
    pub const fn any(addr: GpuAddr) -> Self {
        Self {
            pid: PidFilter::Any,
            addr,
        }
    }

    /// Look up `addr` for a single process
    pub const fn for_pid(pid: ProcessId, addr: GpuAddr) -> Self {
        Self {
            pid: PidFilter::Pid(pid),
            addr,
        }
    }
}

// =============================================================================
// QUERY OUTPUT
// =============================================================================

/// One matching record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryResult {
    /// Allocation name
    pub label: Label,
    /// Base address of the recorded region
    pub base: GpuAddr,
    /// Size of the recorded region
    pub size: ByteSize,
    /// `true` if this was a map event
    pub allocated: bool,
    /// Nanoseconds between the event and the query
    pub age_ns: u64,
    /// Absolute clock reading of the event
    pub when_ns: u64,
    /// Process responsible for the event
    pub pid: ProcessId,
}

/// Matches for a query, newest first
///
/// Holds at most [`QUERY_OUT_MAX_RESULTS`] entries. Being empty is a normal
/// outcome meaning no history covers the address.
#[derive(Debug, Clone, Default)]
pub struct QueryOutput {
    results: ArrayVec<QueryResult, QUERY_OUT_MAX_RESULTS>,
}

impl QueryOutput {
    /// Check whether anything matched
    #[inline]
    pub fn found(&self) -> bool {
        !self.results.is_empty()
    }

    /// Number of results
    #[inline]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Check if no result was found
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Results, newest first
    #[inline]
    pub fn results(&self) -> &[QueryResult] {
        &self.results
    }

    /// Iterate over results, newest first
    pub fn iter(&self) -> core::slice::Iter<'_, QueryResult> {
        self.results.iter()
    }
}

impl<'a> IntoIterator for &'a QueryOutput {
    type Item = &'a QueryResult;
    type IntoIter = core::slice::Iter<'a, QueryResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// SCAN
// =============================================================================

/// Walk the ring newest-first collecting matches for `query`
///
/// Stops once the output is full or every slot has been visited.
pub(crate) fn scan(ring: &HistoryRing, query: &HistoryQuery, now_ns: u64) -> QueryOutput {
    let mut out = QueryOutput::default();

    for record in ring.newest_first() {
        if out.results.is_full() {
            break;
        }
        if !query.pid.matches(record.pid) || !record.contains(query.addr) {
            continue;
        }

        out.results.push(QueryResult {
            label: record.label,
            base: record.addr,
            size: record.size,
            allocated: record.allocated,
            age_ns: age_ns(record.time_ns, now_ns),
            when_ns: record.time_ns,
            pid: record.pid,
        });
    }

    out
}
