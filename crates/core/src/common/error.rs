//! Error definitions.
//!
//! Steady-state simulation never fails: every access resolves to a page.
//! Errors exist only at the edges:
//! 1. **Configuration:** Loading and validating a [`Config`](crate::config::Config).
//! 2. **Admission:** Explaining why a VM was turned away.

use std::path::PathBuf;

use thiserror::Error;

use super::addr::VmId;

/// Errors raised while loading or validating a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid JSON for [`Config`](crate::config::Config).
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Total memory is zero.
    #[error("total memory must be a positive integer")]
    ZeroTotalMemory,

    /// Total memory is at or above the supported ceiling.
    #[error("total memory {total} MB exceeds the {limit} MB limit")]
    TotalMemoryTooLarge {
        /// Requested total memory.
        total: u64,
        /// Exclusive ceiling.
        limit: u64,
    },

    /// A VM was configured with zero memory.
    #[error("memory size for VM {index} must be a positive integer")]
    ZeroVmMemory {
        /// One-based position of the VM in the configuration.
        index: usize,
    },

    /// The maximum VM count is zero.
    #[error("max_vms must be a positive integer")]
    ZeroMaxVms,

    /// The VM limit is above the supported maximum.
    #[error("max_vms {max_vms} exceeds the limit of {limit} VMs")]
    TooManyVms {
        /// Requested VM limit.
        max_vms: usize,
        /// Supported maximum.
        limit: usize,
    },

    /// A bounded structure was configured with zero capacity.
    #[error("{name} must be a positive integer")]
    ZeroCapacity {
        /// Name of the offending field.
        name: &'static str,
    },

    /// The prefetch step does not fit inside the page window.
    #[error("prefetch step {step} must be positive and no larger than page size {page_size}")]
    InvalidPrefetchStep {
        /// Configured step.
        step: u64,
        /// Configured page size.
        page_size: u64,
    },
}

/// Reasons an admission request is rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionError {
    /// The infrastructure already hosts the maximum number of VMs.
    #[error("{id} rejected: VM limit of {limit} reached")]
    VmLimitReached {
        /// Rejected VM.
        id: VmId,
        /// Maximum VM count.
        limit: usize,
    },

    /// The VM asks for more memory than is currently free.
    #[error("{id} rejected: requested {requested} MB, only {available} MB available")]
    InsufficientMemory {
        /// Rejected VM.
        id: VmId,
        /// Requested memory.
        requested: u64,
        /// Memory still free.
        available: u64,
    },

    /// A VM with the same identity is already admitted.
    #[error("{id} rejected: identity already admitted")]
    DuplicateId {
        /// Rejected VM.
        id: VmId,
    },
}
