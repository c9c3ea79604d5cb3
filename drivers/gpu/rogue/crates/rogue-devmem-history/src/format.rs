//! # History Dump Formatting
//!
//! Human-readable rendering of the ring for the statistics entry.
//!
//! ```text
//! PID  NAME                                     ACTION   ADDR MIN     ADDR MAX       SIZE        ABS NS
//! 0042 FWKernelCCB                              MAP    0x0000001000-0x00000010FF 0x00000100 0000000001234
//!
//! Timestamp reference: 0000000005678
//! ```

use core::fmt::{self, Write};

use crate::record::AllocationRecord;
use crate::ring::HistoryRing;

/// Write the column header line
pub fn write_header(out: &mut dyn Write) -> fmt::Result {
    writeln!(
        out,
        "{:<4} {:<40} {:<6}   {:>10}   {:>10}   {:>8} {:>13}",
        "PID", "NAME", "ACTION", "ADDR MIN", "ADDR MAX", "SIZE", "ABS NS"
    )
}

/// Write one record line
pub fn write_record(out: &mut dyn Write, record: &AllocationRecord) -> fmt::Result {
    // 13 digits is over 2 hours of ns
    writeln!(
        out,
        "{:04} {:<40} {:<6} 0x{:010X}-0x{:010X} 0x{:08X} {:013}",
        record.pid,
        record.label,
        record.action(),
        record.addr.raw(),
        record.last_addr().raw(),
        record.size.as_bytes(),
        record.time_ns,
    )
}

/// Write the trailing clock reference
pub fn write_trailer(out: &mut dyn Write, now_ns: u64) -> fmt::Result {
    write!(out, "\nTimestamp reference: {:013}\n", now_ns)
}

/// Dump the whole ring, newest first
///
/// Stops at the first unwritten slot, so a ring that has not yet wrapped
/// prints only what it holds.
pub(crate) fn write_ring(out: &mut dyn Write, ring: &HistoryRing, now_ns: u64) -> fmt::Result {
    write_header(out)?;
    for record in ring.newest_first().take_while(|r| r.is_written()) {
        write_record(out, record)?;
    }
    write_trailer(out, now_ns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Label;
    use alloc::string::String;
    use rogue_core::{ByteSize, GpuAddr, ProcessId};

    fn sample() -> AllocationRecord {
        AllocationRecord {
            addr: GpuAddr::new(0x1000),
            size: ByteSize::from_bytes(0x100),
            label: Label::new("A"),
            time_ns: 1234,
            allocated: false,
            pid: ProcessId::new(42),
        }
    }

    #[test]
    fn test_header_columns() {
        let mut out = String::new();
        write_header(&mut out).unwrap();

        assert!(out.starts_with("PID  NAME"));
        for column in ["ACTION", "ADDR MIN", "ADDR MAX", "SIZE", "ABS NS"] {
            assert!(out.contains(column), "missing {column}");
        }
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn test_record_line() {
        let mut out = String::new();
        write_record(&mut out, &sample()).unwrap();

        let expected = alloc::format!(
            "0042 {:<40} UNMAP  0x0000001000-0x00000010FF 0x00000100 0000000001234\n",
            "A"
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_trailer() {
        let mut out = String::new();
        write_trailer(&mut out, 99).unwrap();
        assert_eq!(out, "\nTimestamp reference: 0000000000099\n");
    }

    #[test]
    fn test_empty_ring_has_no_rows() {
        let ring = HistoryRing::try_new(4).unwrap();
        let mut out = String::new();
        write_ring(&mut out, &ring, 5).unwrap();

        let mut header = String::new();
        write_header(&mut header).unwrap();
        assert_eq!(out, header + "\nTimestamp reference: 0000000000005\n");
    }

    #[test]
    fn test_ring_dump_newest_first() {
        let mut ring = HistoryRing::try_new(4).unwrap();
        ring.push(AllocationRecord {
            label: Label::new("old"),
            ..sample()
        });
        ring.push(AllocationRecord {
            label: Label::new("new"),
            ..sample()
        });

        let mut out = String::new();
        write_ring(&mut out, &ring, 5).unwrap();

        let rows: alloc::vec::Vec<&str> = out.lines().skip(1).take(2).collect();
        assert!(rows[0].contains("new"));
        assert!(rows[1].contains("old"));
    }
}
