//! Page replacement tracker.
//!
//! Records page-level popularity independently of the TLB. The TLB is keyed
//! by address while this tracker is keyed by page, so a page reached through
//! several addresses still occupies a single slot here.
//!
//! The tracker does not gate any fault or admission decision. Its contents
//! are surfaced as the run's "hot pages".

use crate::common::Page;

use super::lru::LruStack;

/// Bounded LRU list of recently used pages.
#[derive(Debug, Clone)]
pub struct PageReplacementStrategy {
    history: LruStack<Page>,
}

impl PageReplacementStrategy {
    /// Creates a tracker holding at most `size` pages.
    pub fn new(size: usize) -> Self {
        Self {
            history: LruStack::new(size),
        }
    }

    /// Marks `page` as most recently used.
    ///
    /// # Returns
    ///
    /// The page dropped from the LRU end on overflow. The caller owns
    /// reclaiming it.
    pub fn touch(&mut self, page: Page) -> Option<Page> {
        self.history.touch(page)
    }

    /// Page that would be dropped next.
    pub fn victim(&self) -> Option<&Page> {
        self.history.victim()
    }

    /// Tracked pages, most recently used first.
    pub fn hot_pages(&self) -> impl Iterator<Item = &Page> {
        self.history.iter()
    }

    /// Returns whether `page` is tracked.
    pub fn contains(&self, page: &Page) -> bool {
        self.history.contains(page)
    }

    /// Number of tracked pages.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Returns whether no page is tracked.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Maximum number of tracked pages.
    pub const fn capacity(&self) -> usize {
        self.history.capacity()
    }
}
