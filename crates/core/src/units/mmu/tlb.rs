//! Translation Lookaside Buffer (TLB).
//!
//! A fully associative, capacity-bounded cache mapping virtual addresses to
//! pages. Recency is tracked with an LRU usage stack over addresses; the
//! stack is always a permutation of the mapped keys.

use std::collections::HashMap;

use crate::common::{Page, VirtAddr};
use crate::units::policies::LruStack;

/// Translation Lookaside Buffer structure.
#[derive(Debug, Clone)]
pub struct Tlb {
    /// Resident translations.
    entries: HashMap<VirtAddr, Page>,
    /// Recency order over `entries` keys, MRU first.
    history: LruStack<VirtAddr>,
}

impl Tlb {
    /// Creates a new TLB holding at most `size` translations.
    pub fn new(size: usize) -> Self {
        let history = LruStack::new(size);
        Self {
            entries: HashMap::with_capacity(history.capacity() + 1),
            history,
        }
    }

    /// Looks up `addr`.
    ///
    /// A hit promotes the address to MRU. A miss has no side effect.
    ///
    /// # Returns
    ///
    /// `Some(page)` on a hit, otherwise `None`.
    pub fn resolve(&mut self, addr: VirtAddr) -> Option<Page> {
        let page = self.entries.get(&addr).copied()?;
        let _ = self.history.promote(&addr);
        Some(page)
    }

    /// Looks up `addr` without touching recency.
    pub fn peek(&self, addr: VirtAddr) -> Option<Page> {
        self.entries.get(&addr).copied()
    }

    /// Inserts or updates the mapping for `addr` and promotes it to MRU.
    ///
    /// # Returns
    ///
    /// The evicted LRU translation if the insert overflowed the capacity.
    pub fn insert(&mut self, addr: VirtAddr, page: Page) -> Option<(VirtAddr, Page)> {
        let _ = self.entries.insert(addr, page);
        let victim = self.history.touch(addr)?;
        self.entries.remove(&victim).map(|evicted| (victim, evicted))
    }

    /// Drops every translation.
    pub fn flush(&mut self) {
        self.entries.clear();
        while self.history.pop_lru().is_some() {}
    }

    /// Returns whether `addr` is resident.
    pub fn contains(&self, addr: VirtAddr) -> bool {
        self.entries.contains_key(&addr)
    }

    /// Resident addresses, MRU first.
    pub fn recency(&self) -> impl Iterator<Item = &VirtAddr> {
        self.history.iter()
    }

    /// Number of resident translations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the TLB is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of resident translations.
    pub const fn capacity(&self) -> usize {
        self.history.capacity()
    }
}
