//! # History Configuration

use rogue_core::{Error, Result};

use crate::{HISTORY_LEN, STATS_ENTRY_NAME};

/// History log configuration
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Number of records in the ring
    pub capacity: usize,
    /// Name the log registers its statistics entry under
    pub stats_name: &'static str,
}

impl HistoryConfig {
    /// Configuration with a custom ring capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Check the configuration can back a log
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 || self.stats_name.is_empty() {
            return Err(Error::InvalidParameter);
        }
        Ok(())
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: HISTORY_LEN,
            stats_name: STATS_ENTRY_NAME,
        }
    }
}
