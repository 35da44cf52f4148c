//! Memory subsystem units.
//!
//! 1. **MMU:** TLB, page tables, backing store, paging handler, fault manager.
//! 2. **Policies:** LRU usage stack and the page replacement tracker.
//! 3. **Prefetch:** Page-window prefetchers used on page-table misses.

/// Address resolution (TLB, page tables, backing store, fault handling).
pub mod mmu;

/// Recency policies (LRU stack, page replacement tracker).
pub mod policies;

/// Page prefetchers.
pub mod prefetch;
