//! Clustered Prefetcher.
//!
//! On a page-table miss, fetches every sub-block of the page window that
//! starts at the faulting address: `addr`, `addr + step`, `addr + 2·step`,
//! up to but excluding `addr + page_size`. This anticipates spatial
//! locality in the VM's upcoming accesses. The window stops at the top of
//! the address space.

use crate::common::VirtAddr;

use super::Prefetcher;

/// Clustered prefetcher state.
#[derive(Debug, Clone, Copy)]
pub struct ClusterPrefetcher {
    /// Size of the window in simulated bytes.
    page_size: u64,
    /// Distance between sub-blocks.
    step: u64,
}

impl ClusterPrefetcher {
    /// Creates a new clustered prefetcher.
    ///
    /// # Arguments
    ///
    /// * `page_size` - Size of the prefetch window.
    /// * `step` - Distance between prefetched sub-blocks (zero is raised to one).
    pub fn new(page_size: u64, step: u64) -> Self {
        Self {
            page_size,
            step: step.max(1),
        }
    }

    /// Number of sub-blocks one fault fetches below the top of the address space.
    pub const fn degree(&self) -> u64 {
        self.page_size.div_ceil(self.step)
    }
}

impl Prefetcher for ClusterPrefetcher {
    fn observe(&mut self, addr: VirtAddr) -> Vec<VirtAddr> {
        (0..self.page_size)
            .step_by(self.step as usize)
            .map_while(|offset| addr.checked_offset(offset))
            .collect()
    }
}
