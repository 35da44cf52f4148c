//! Per-VM page tables.
//!
//! Page tables are the unbounded backing map behind the TLB. Entries are
//! never evicted.

use std::collections::HashMap;

use crate::common::{Page, VirtAddr, VmId};

/// Mapping from virtual address to page for a single VM.
#[derive(Debug, Clone, Default)]
pub struct PageTable {
    entries: HashMap<VirtAddr, Page>,
}

impl PageTable {
    /// Creates an empty page table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the page mapped at `addr`.
    pub fn lookup(&self, addr: VirtAddr) -> Option<Page> {
        self.entries.get(&addr).copied()
    }

    /// Maps `addr` to `page`, replacing any previous mapping.
    pub fn map(&mut self, addr: VirtAddr, page: Page) {
        let _ = self.entries.insert(addr, page);
    }

    /// Returns whether `addr` is mapped.
    pub fn contains(&self, addr: VirtAddr) -> bool {
        self.entries.contains_key(&addr)
    }

    /// Number of mapped addresses.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether nothing is mapped.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Page tables for every VM seen by the paging handler.
#[derive(Debug, Clone, Default)]
pub struct PageTables {
    tables: HashMap<VmId, PageTable>,
}

impl PageTables {
    /// Creates an empty set of page tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the page table of `vm`, if it has one.
    pub fn get(&self, vm: VmId) -> Option<&PageTable> {
        self.tables.get(&vm)
    }

    /// Returns the page table of `vm`, creating an empty one on first use.
    pub fn table_mut(&mut self, vm: VmId) -> &mut PageTable {
        self.tables.entry(vm).or_default()
    }

    /// Number of VMs with a page table.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns whether no VM has a page table yet.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
