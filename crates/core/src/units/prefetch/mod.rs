//! Page prefetcher implementations.
//!
//! Prefetchers decide which addresses to populate when a page-table miss
//! forces a trip to the backing store.

use std::fmt;

use crate::common::VirtAddr;

/// Clustered prefetcher (populates the whole page window around a fault).
pub mod cluster;

pub use self::cluster::ClusterPrefetcher;

/// Trait for page prefetcher implementations.
pub trait Prefetcher: Send + Sync + fmt::Debug {
    /// Observes a page-table miss and generates the addresses to populate.
    ///
    /// # Arguments
    ///
    /// * `addr` - The faulting address.
    ///
    /// # Returns
    ///
    /// Addresses to fetch and map. Empty if the prefetcher is idle.
    fn observe(&mut self, addr: VirtAddr) -> Vec<VirtAddr>;
}

/// Prefetcher that never fetches ahead.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPrefetcher;

impl Prefetcher for NoPrefetcher {
    fn observe(&mut self, _addr: VirtAddr) -> Vec<VirtAddr> {
        Vec::new()
    }
}
