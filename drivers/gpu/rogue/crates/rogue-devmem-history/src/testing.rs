//! Platform doubles for tests.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};

use rogue_core::{
    Error, MonotonicClock, ProcessId, ProcessSource, Result, StatsEntry, StatsHandle,
    StatsRegistry,
};
use spin::Mutex;

/// Process source reporting a settable pid
#[derive(Debug)]
pub struct FixedProcess(AtomicU32);

impl FixedProcess {
    pub fn new(pid: u32) -> Self {
        Self(AtomicU32::new(pid))
    }

    pub fn set(&self, pid: u32) {
        self.0.store(pid, Ordering::Relaxed);
    }
}

impl ProcessSource for FixedProcess {
    fn current_pid(&self) -> ProcessId {
        ProcessId::new(self.0.load(Ordering::Relaxed))
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock(AtomicU64);

impl ManualClock {
    pub fn new(now_ns: u64) -> Self {
        Self(AtomicU64::new(now_ns))
    }

    pub fn set(&self, now_ns: u64) {
        self.0.store(now_ns, Ordering::Relaxed);
    }
}

impl MonotonicClock for ManualClock {
    fn now_ns(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// In-memory stats registry that remembers what was registered
pub struct RecordingRegistry {
    entries: Mutex<Vec<(StatsHandle, &'static str, Arc<dyn StatsEntry>)>>,
    next_id: AtomicU64,
    removed: AtomicU64,
    fail_next: AtomicBool,
}

impl RecordingRegistry {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            removed: AtomicU64::new(0),
            fail_next: AtomicBool::new(false),
        }
    }

    /// Make the next `create_entry` fail
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::Relaxed);
    }

    /// Registry as the trait object `HistoryLog::init` takes
    pub fn as_dyn(self: &Arc<Self>) -> Option<Arc<dyn StatsRegistry>> {
        let registry: Arc<dyn StatsRegistry> = self.clone();
        Some(registry)
    }

    pub fn live_entries(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn removed(&self) -> u64 {
        self.removed.load(Ordering::Relaxed)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.entries.lock().iter().map(|(_, name, _)| *name).collect()
    }

    /// Read an entry the way the host would on a debugfs read
    pub fn render(&self, name: &str) -> Option<String> {
        let entry = self
            .entries
            .lock()
            .iter()
            .find(|(_, n, _)| *n == name)
            .map(|(_, _, entry)| entry.clone())?;

        let mut out = String::new();
        entry.show(&mut out).ok()?;
        Some(out)
    }
}

impl StatsRegistry for RecordingRegistry {
    fn create_entry(&self, name: &'static str, entry: Arc<dyn StatsEntry>) -> Result<StatsHandle> {
        if self.fail_next.swap(false, Ordering::Relaxed) {
            return Err(Error::RegistryFull);
        }

        let mut entries = self.entries.lock();
        if entries.iter().any(|(_, n, _)| *n == name) {
            return Err(Error::AlreadyRegistered);
        }

        let handle = StatsHandle::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        entries.push((handle, name, entry));
        Ok(handle)
    }

    fn remove_entry(&self, handle: StatsHandle) {
        self.entries.lock().retain(|(h, _, _)| *h != handle);
        self.removed.fetch_add(1, Ordering::Relaxed);
    }
}

impl fmt::Debug for RecordingRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingRegistry")
            .field("names", &self.names())
            .finish()
    }
}
