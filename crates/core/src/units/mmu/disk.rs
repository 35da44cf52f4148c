//! Simulated backing store.
//!
//! Stands in for slow storage behind the page tables. Fetching is a pure
//! function of the address. Reclaiming is the hook invoked whenever a bounded
//! structure drops a page, and only accounts for the work.

use crate::common::{Page, VirtAddr};

/// Interface between the paging handler and backing storage.
pub trait BackingStore {
    /// Reads the page backing `addr`.
    fn fetch(&mut self, addr: VirtAddr) -> Page;

    /// Releases the frame holding `page`.
    fn reclaim(&mut self, page: Page);
}

/// Deterministic disk model that counts its traffic.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedDisk {
    fetches: u64,
    reclaims: u64,
}

impl SimulatedDisk {
    /// Creates a disk with zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pages read so far.
    pub const fn fetches(&self) -> u64 {
        self.fetches
    }

    /// Number of pages reclaimed so far.
    pub const fn reclaims(&self) -> u64 {
        self.reclaims
    }
}

impl BackingStore for SimulatedDisk {
    fn fetch(&mut self, addr: VirtAddr) -> Page {
        self.fetches += 1;
        Page::for_address(addr)
    }

    fn reclaim(&mut self, _page: Page) {
        self.reclaims += 1;
    }
}
