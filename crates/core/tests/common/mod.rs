//! Shared helpers for simulator tests.


use vmsim_core::common::{Page, VirtAddr, VmId};
use vmsim_core::units::mmu::PagingHandler;
use vmsim_core::units::mmu::disk::{BackingStore, SimulatedDisk};
use vmsim_core::units::mmu::tlb::Tlb;
use vmsim_core::units::policies::PageReplacementStrategy;
use vmsim_core::units::prefetch::ClusterPrefetcher;

/// Routes `tracing` output through the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("vmsim_core=trace")
        .try_init();
}

/// Shorthand for a virtual address.
pub fn va(addr: u64) -> VirtAddr {
    VirtAddr::new(addr)
}

/// Shorthand for the page a fetch of `addr` produces.
pub fn page(addr: u64) -> Page {
    Page::for_address(VirtAddr::new(addr))
}

/// Shorthand for a VM identity.
pub fn vm(id: u32) -> VmId {
    VmId::new(id)
}

/// Handler with the stock clustered prefetcher (6000 / 1000) over `disk`.
pub fn handler_with<D: BackingStore>(
    tlb_size: usize,
    tracker_size: usize,
    disk: D,
) -> PagingHandler<D> {
    init_tracing();
    PagingHandler::new(
        Tlb::new(tlb_size),
        PageReplacementStrategy::new(tracker_size),
        Box::new(ClusterPrefetcher::new(6000, 1000)),
        disk,
    )
}

/// Handler over a fresh [`SimulatedDisk`].
pub fn handler(tlb_size: usize, tracker_size: usize) -> PagingHandler {
    handler_with(tlb_size, tracker_size, SimulatedDisk::new())
}
