//! # History Records
//!
//! One ring slot per map/unmap event.

use core::fmt;
use core::mem::size_of;

use rogue_core::{ByteSize, GpuAddr, ProcessId};

use crate::{HISTORY_BUDGET_BYTES, HISTORY_LEN, TEXT_BUFSZ};

// =============================================================================
// LABEL
// =============================================================================

/// Fixed-capacity, NUL-terminated allocation name
///
/// Holds at most `TEXT_BUFSZ - 1` bytes of text. Longer names are cut at
/// the last character boundary that fits.
#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct Label([u8; TEXT_BUFSZ]);

impl Label {
    /// Longest text a label can hold, in bytes
    pub const MAX_LEN: usize = TEXT_BUFSZ - 1;

    /// Empty label
    pub const fn empty() -> Self {
        Self([0; TEXT_BUFSZ])
    }

    /// Copy `text` into a label, truncating if needed
    pub fn new(text: &str) -> Self {
        let mut end = text.len().min(Self::MAX_LEN);
        while !text.is_char_boundary(end) {
            end -= 1;
        }

        let mut buf = [0; TEXT_BUFSZ];
        buf[..end].copy_from_slice(&text.as_bytes()[..end]);
        Self(buf)
    }

    /// Length of the text in bytes
    pub fn len(&self) -> usize {
        self.0.iter().position(|&b| b == 0).unwrap_or(Self::MAX_LEN)
    }

    /// Check if the label holds no text
    pub fn is_empty(&self) -> bool {
        self.0[0] == 0
    }

    /// View the label as text
    pub fn as_str(&self) -> &str {
        // Only whole characters are ever copied in.
        core::str::from_utf8(&self.0[..self.len()]).unwrap_or_default()
    }
}

impl Default for Label {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&str> for Label {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad() so width/alignment specifiers apply
        f.pad(self.as_str())
    }
}

// =============================================================================
// ALLOCATION RECORD
// =============================================================================

/// One map or unmap event
///
/// A slot whose address is null has never been written.
#[derive(Debug, Clone, Copy, Default)]
#[repr(C)]
pub struct AllocationRecord {
    /// Base device virtual address of the region
    pub addr: GpuAddr,
    /// Size of the region
    pub size: ByteSize,
    /// Allocation name supplied by the caller
    pub label: Label,
    /// Clock reading at the time of the event
    pub time_ns: u64,
    /// `true` for a map, `false` for an unmap
    pub allocated: bool,
    /// Process that performed the action
    pub pid: ProcessId,
}

impl AllocationRecord {
    /// Check whether this slot has ever been written
    #[inline]
    pub fn is_written(&self) -> bool {
        !self.addr.is_null()
    }

    /// Check whether `addr` falls inside the recorded region
    #[inline]
    pub fn contains(&self, addr: GpuAddr) -> bool {
        addr.within(self.addr, self.size)
    }

    /// Last byte of the region (inclusive)
    #[inline]
    pub fn last_addr(&self) -> GpuAddr {
        GpuAddr::new(
            self.addr
                .raw()
                .wrapping_add(self.size.as_bytes())
                .wrapping_sub(1),
        )
    }

    /// Action name as shown in dumps
    #[inline]
    pub fn action(&self) -> &'static str {
        if self.allocated {
            "MAP"
        } else {
            "UNMAP"
        }
    }
}

// =============================================================================
// STATIC ASSERTIONS
// =============================================================================

static_assertions::const_assert_eq!(size_of::<AllocationRecord>(), 72);
static_assertions::const_assert!(HISTORY_LEN * size_of::<AllocationRecord>() <= HISTORY_BUDGET_BYTES);
static_assertions::assert_impl_all!(AllocationRecord: Send, Sync, Copy);

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn test_label_short_text() {
        let label = Label::new("FWKernelCCB");
        assert_eq!(label.as_str(), "FWKernelCCB");
        assert_eq!(label.len(), 11);
        assert!(!label.is_empty());
    }

    #[test]
    fn test_label_truncates_to_capacity() {
        let long = "A".repeat(100);
        let label = Label::new(&long);
        assert_eq!(label.len(), TEXT_BUFSZ - 1);
        assert_eq!(label.as_str(), &long[..TEXT_BUFSZ - 1]);
    }

    #[test]
    fn test_label_truncates_on_char_boundary() {
        // 38 ASCII bytes followed by a 2-byte character straddling the limit
        let text = format!("{}é", "x".repeat(38));
        let label = Label::new(&text);
        assert_eq!(label.as_str(), "x".repeat(38));
    }

    #[test]
    fn test_label_stops_at_nul() {
        let label = Label::new("abc\0def");
        assert_eq!(label.as_str(), "abc");
    }

    #[test]
    fn test_label_display_padding() {
        let label = Label::new("B");
        assert_eq!(format!("[{:<4}]", label), "[B   ]");
    }

    #[test]
    fn test_default_record_is_unwritten() {
        let record = AllocationRecord::default();
        assert!(!record.is_written());
        assert!(record.label.is_empty());
        assert!(!record.contains(GpuAddr::null()));
    }

    #[test]
    fn test_record_range() {
        let record = AllocationRecord {
            addr: GpuAddr::new(0x1000),
            size: ByteSize::from_bytes(0x100),
            allocated: true,
            ..AllocationRecord::default()
        };

        assert!(record.contains(GpuAddr::new(0x1050)));
        assert!(!record.contains(GpuAddr::new(0x1100)));
        assert_eq!(record.last_addr(), GpuAddr::new(0x10FF));
        assert_eq!(record.action(), "MAP");
    }
}
