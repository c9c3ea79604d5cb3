//! # Rogue Error Handling
//!
//! Error types for the driver subsystems.
//!
//! Errors are plain `Copy` values so they can cross the bridge layer
//! without allocation and stay `no_std` compatible.

use core::fmt;

// =============================================================================
// RESULT TYPE
// =============================================================================

/// Rogue Result type alias
pub type Result<T> = core::result::Result<T, Error>;

// =============================================================================
// ERROR ENUM
// =============================================================================

/// Rogue unified error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    // =========================================================================
    // Generic Errors
    // =========================================================================
    /// Invalid parameter provided
    InvalidParameter,

    // =========================================================================
    // Memory Errors
    // =========================================================================
    /// Allocation of a driver-internal buffer failed
    AllocationFailed,

    // =========================================================================
    // Statistics Errors
    // =========================================================================
    /// A statistics entry with this name is already registered
    AlreadyRegistered,
    /// The statistics registry cannot take more entries
    RegistryFull,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Generic
            Self::InvalidParameter => write!(f, "invalid parameter"),

            // Memory
            Self::AllocationFailed => write!(f, "allocation failed"),

            // Statistics
            Self::AlreadyRegistered => write!(f, "statistics entry already registered"),
            Self::RegistryFull => write!(f, "statistics registry full"),
        }
    }
}

// =============================================================================
// ERROR CONVERSION
// =============================================================================

impl From<alloc::collections::TryReserveError> for Error {
    fn from(_: alloc::collections::TryReserveError) -> Self {
        Error::AllocationFailed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    #[test]
    fn test_display_messages() {
        assert_eq!(Error::AllocationFailed.to_string(), "allocation failed");
        assert_eq!(
            Error::AlreadyRegistered.to_string(),
            "statistics entry already registered"
        );
    }

    #[test]
    fn test_try_reserve_maps_to_allocation_failed() {
        let mut v: Vec<u64> = Vec::new();
        let err = v.try_reserve_exact(usize::MAX).unwrap_err();
        assert_eq!(Error::from(err), Error::AllocationFailed);
    }
}
