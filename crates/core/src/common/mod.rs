//! Common types and constants shared by every part of the simulator.
//!
//! 1. **Typed values:** Virtual addresses, VM identities, and page tokens.
//! 2. **Constants:** Page window, prefetch step, capacities, admission limits.
//! 3. **Errors:** Configuration and admission error types.

/// Address, VM identity, and page token types.
pub mod addr;

/// Simulation-wide constants.
pub mod constants;

/// Error types.
pub mod error;

pub use addr::{Page, VirtAddr, VmId};
pub use error::{AdmissionError, ConfigError};
