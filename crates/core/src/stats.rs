//! Access statistics.
//!
//! Tallies the outcome of every memory access and derives:
//! 1. **Page fault rate:** Faults over total accesses.
//! 2. **TLB hit rate:** TLB hits over total accesses.
//!
//! The monitor is an explicitly owned aggregator: every operation that
//! resolves an access receives a `&mut ResourceMonitor` to report into.

use serde::Serialize;

/// Access counters for one simulation run.
///
/// All counters are monotonically non-decreasing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResourceMonitor {
    total_accesses: u64,
    page_faults: u64,
    tlb_hits: u64,
}

impl ResourceMonitor {
    /// Creates a monitor with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of one access.
    ///
    /// The total always advances; the fault and hit counters advance only
    /// when their flag is set.
    pub fn record(&mut self, fault: bool, hit: bool) {
        self.total_accesses += 1;
        if fault {
            self.page_faults += 1;
        }
        if hit {
            self.tlb_hits += 1;
        }
    }

    /// Number of accesses recorded.
    pub const fn total_accesses(&self) -> u64 {
        self.total_accesses
    }

    /// Number of accesses that faulted.
    pub const fn page_faults(&self) -> u64 {
        self.page_faults
    }

    /// Number of accesses served by the TLB.
    pub const fn tlb_hits(&self) -> u64 {
        self.tlb_hits
    }

    /// Faults over total accesses, or 0 before any access.
    pub fn fault_rate(&self) -> f64 {
        ratio(self.page_faults, self.total_accesses)
    }

    /// TLB hits over total accesses, or 0 before any access.
    pub fn hit_rate(&self) -> f64 {
        ratio(self.tlb_hits, self.total_accesses)
    }
}

fn ratio(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}
