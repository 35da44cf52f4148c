//! Global simulation constants.
//!
//! 1. **Paging:** Page window and prefetch sub-block sizes.
//! 2. **Capacity:** Default sizes of the bounded recency structures.
//! 3. **Cloud:** Admission limits.

/// Size of the clustered prefetch window in simulated bytes.
pub const PAGE_SIZE: u64 = 6000;

/// Distance between two prefetched sub-blocks inside the page window.
pub const PREFETCH_STEP: u64 = 1000;

/// Number of translations the TLB holds.
pub const TLB_SIZE: usize = 16;

/// Number of pages the replacement tracker holds.
pub const TRACKER_SIZE: usize = 16;

/// Maximum number of VMs the infrastructure admits.
pub const MAX_VM_COUNT: usize = 5;

/// Exclusive upper bound on the total memory capacity, in MB.
pub const MAX_TOTAL_MEMORY: u64 = 4000;

/// Address pattern each VM replays when no workload is configured.
pub const DEFAULT_ACCESS_PATTERN: [u64; 8] = [1000, 2000, 3000, 1000, 4000, 5000, 2000, 6000];
