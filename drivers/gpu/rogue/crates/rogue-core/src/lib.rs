//! # Rogue Core
//!
//! Foundational types, errors and platform traits shared by the Rogue GPU
//! driver subsystems.
//!
//! The driver proper (module registration, ioctl bridge, MMU programming)
//! lives in the host kernel. Subsystems built on this crate only see the
//! narrow platform surface declared in [`traits`]: a process-id source, a
//! monotonic clock and a statistics registry.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         rogue-core                          │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────┐  │
//! │  │   Traits    │  │   Types     │  │       Error         │  │
//! │  │  (Clock,    │  │ (GpuAddr,   │  │     Handling        │  │
//! │  │   Stats)    │  │  ProcessId) │  │                     │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]
#![warn(clippy::all)]

extern crate alloc;

// =============================================================================
// MODULE EXPORTS
// =============================================================================

pub mod error;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use error::{Error, Result};
pub use traits::*;
pub use types::*;
