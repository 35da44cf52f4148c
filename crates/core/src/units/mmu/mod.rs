//! Memory Management Unit (MMU).
//!
//! Resolves virtual addresses issued by simulated VMs. Each access walks a
//! two-level lookup:
//! 1. **TLB:** Shared, bounded, LRU-ordered address cache.
//! 2. **Page table:** Per-VM, unbounded backing map.
//!
//! A miss in both levels goes to the backing store, which is where the
//! clustered prefetcher populates the surrounding page window.

/// Simulated backing store.
pub mod disk;

/// Page fault manager façade.
pub mod fault;

/// Per-VM page tables.
pub mod page_table;

/// Translation Lookaside Buffer (TLB) for caching address-to-page mappings.
pub mod tlb;

use tracing::{debug, trace};

use crate::common::{Page, VirtAddr, VmId};
use crate::config::{PagingConfig, PrefetcherKind};
use crate::stats::ResourceMonitor;
use crate::units::policies::PageReplacementStrategy;
use crate::units::prefetch::{ClusterPrefetcher, NoPrefetcher, Prefetcher};

use self::disk::{BackingStore, SimulatedDisk};
use self::page_table::PageTables;
use self::tlb::Tlb;

/// Where an access was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Served by the TLB.
    TlbHit,
    /// TLB miss served by the VM's page table.
    PageTable,
    /// Miss in both levels; the page came from the backing store.
    Disk {
        /// Number of addresses the prefetcher populated.
        prefetched: usize,
    },
}

/// Result of resolving a single access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessOutcome {
    /// Page the TLB now holds for the address.
    pub page: Page,
    /// Level that served the access.
    pub resolution: Resolution,
}

impl AccessOutcome {
    /// Returns whether the TLB served the access.
    pub fn is_hit(&self) -> bool {
        self.resolution == Resolution::TlbHit
    }

    /// Returns whether the access faulted.
    pub fn is_fault(&self) -> bool {
        !self.is_hit()
    }
}

/// Orchestrates address resolution across TLB, page tables, and disk.
#[derive(Debug)]
pub struct PagingHandler<D: BackingStore = SimulatedDisk> {
    page_tables: PageTables,
    tlb: Tlb,
    replacement: PageReplacementStrategy,
    prefetcher: Box<dyn Prefetcher>,
    disk: D,
}

impl PagingHandler<SimulatedDisk> {
    /// Builds a handler backed by a [`SimulatedDisk`] from `config`.
    pub fn from_config(config: &PagingConfig) -> Self {
        let prefetcher: Box<dyn Prefetcher> = match config.prefetcher {
            PrefetcherKind::Cluster => Box::new(ClusterPrefetcher::new(
                config.page_size,
                config.prefetch_step,
            )),
            PrefetcherKind::None => Box::new(NoPrefetcher),
        };
        Self::new(
            Tlb::new(config.tlb_size),
            PageReplacementStrategy::new(config.tracker_size),
            prefetcher,
            SimulatedDisk::new(),
        )
    }
}

impl<D: BackingStore> PagingHandler<D> {
    /// Creates a handler with empty page tables.
    ///
    /// # Arguments
    ///
    /// * `tlb` - TLB shared by every VM.
    /// * `replacement` - Page popularity tracker.
    /// * `prefetcher` - Prefetch policy applied on page-table misses.
    /// * `disk` - Backing store for pages absent from every level.
    pub fn new(
        tlb: Tlb,
        replacement: PageReplacementStrategy,
        prefetcher: Box<dyn Prefetcher>,
        disk: D,
    ) -> Self {
        Self {
            page_tables: PageTables::new(),
            tlb,
            replacement,
            prefetcher,
            disk,
        }
    }

    /// Resolves an access and reports it to `monitor`.
    ///
    /// # Returns
    ///
    /// `true` if the TLB served the access.
    pub fn access(&mut self, vm: VmId, addr: VirtAddr, monitor: &mut ResourceMonitor) -> bool {
        self.resolve(vm, addr, monitor).is_hit()
    }

    /// Resolves an access of `vm` to `addr`.
    ///
    /// The outcome is recorded into `monitor` exactly once: a TLB hit as
    /// `(fault = false, hit = true)`, anything else as `(true, false)`.
    /// On a miss in both levels, every address the prefetcher yields is
    /// fetched, mapped, cached in the TLB, and touched in the tracker. The
    /// requested address is then cached against the last page fetched, so
    /// after a clustered prefetch it aliases the top of the window while its
    /// page table entry keeps its own page. Without prefetch the requested
    /// address alone is fetched and mapped.
    pub fn resolve(
        &mut self,
        vm: VmId,
        addr: VirtAddr,
        monitor: &mut ResourceMonitor,
    ) -> AccessOutcome {
        if let Some(page) = self.tlb.resolve(addr) {
            debug!(%vm, %addr, %page, "TLB hit");
            monitor.record(false, true);
            return AccessOutcome {
                page,
                resolution: Resolution::TlbHit,
            };
        }

        let mapped = self.page_tables.get(vm).and_then(|t| t.lookup(addr));
        let outcome = match mapped {
            Some(page) => {
                debug!(%vm, %addr, %page, "page fault served by page table");
                AccessOutcome {
                    page,
                    resolution: Resolution::PageTable,
                }
            }
            None => {
                let (prefetched, last) = self.populate(vm, addr);
                let page = match last {
                    Some(page) => page,
                    None => {
                        let page = self.disk.fetch(addr);
                        self.page_tables.table_mut(vm).map(addr, page);
                        page
                    }
                };
                debug!(%vm, %addr, %page, prefetched, "page fault served by disk");
                AccessOutcome {
                    page,
                    resolution: Resolution::Disk { prefetched },
                }
            }
        };

        self.install(addr, outcome.page);
        monitor.record(true, false);
        outcome
    }

    /// Fetches and installs every address the prefetcher yields for `addr`.
    ///
    /// # Returns
    ///
    /// The number of addresses populated and the last page fetched.
    fn populate(&mut self, vm: VmId, addr: VirtAddr) -> (usize, Option<Page>) {
        let targets = self.prefetcher.observe(addr);
        let mut last = None;
        for &target in &targets {
            let page = self.disk.fetch(target);
            self.page_tables.table_mut(vm).map(target, page);
            self.install(target, page);
            last = Some(page);
        }
        (targets.len(), last)
    }

    /// Caches `addr -> page` in the TLB and marks `page` as recently used,
    /// reclaiming whatever either structure evicts.
    fn install(&mut self, addr: VirtAddr, page: Page) {
        if let Some((evicted_addr, evicted)) = self.tlb.insert(addr, page) {
            trace!(addr = %evicted_addr, page = %evicted, "TLB eviction");
            self.disk.reclaim(evicted);
        }
        if let Some(evicted) = self.replacement.touch(page) {
            trace!(page = %evicted, "replacement tracker eviction");
            self.disk.reclaim(evicted);
        }
    }

    /// The shared TLB.
    pub fn tlb(&self) -> &Tlb {
        &self.tlb
    }

    /// Per-VM page tables.
    pub fn page_tables(&self) -> &PageTables {
        &self.page_tables
    }

    /// Page popularity tracker.
    pub fn replacement(&self) -> &PageReplacementStrategy {
        &self.replacement
    }

    /// The backing store.
    pub fn disk(&self) -> &D {
        &self.disk
    }

    /// Exclusive access to the backing store.
    pub fn disk_mut(&mut self) -> &mut D {
        &mut self.disk
    }
}
