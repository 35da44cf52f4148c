//! Least Recently Used (LRU) recency stack.
//!
//! Keeps a bounded usage stack of keys. When a key is touched it moves to
//! the top (Most Recently Used position); the bottom of the stack is the
//! Least Recently Used key and is the one dropped on overflow.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `touch()`: O(C) where C is the capacity
//!   - `victim()`: O(1)
//! - **Space Complexity:** O(C)
//! - **Best Case:** Working sets smaller than the capacity
//! - **Worst Case:** Cyclic scans one key larger than the capacity (thrashing)

use std::collections::VecDeque;

/// Bounded LRU usage stack.
///
/// Index 0 is MRU, the last index is LRU. A key appears at most once.
#[derive(Debug, Clone)]
pub struct LruStack<K> {
    usage: VecDeque<K>,
    capacity: usize,
}

impl<K: PartialEq> LruStack<K> {
    /// Creates an empty stack holding at most `capacity` keys.
    ///
    /// A capacity of zero is raised to one so that the most recent key is
    /// always retained.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            usage: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Moves `key` to the MRU position, inserting it if absent.
    ///
    /// # Returns
    ///
    /// The key pushed out of the LRU position when the insert overflowed the
    /// capacity, otherwise `None`.
    pub fn touch(&mut self, key: K) -> Option<K> {
        if let Some(pos) = self.position(&key) {
            let _ = self.usage.remove(pos);
        }
        self.usage.push_front(key);
        if self.usage.len() > self.capacity {
            self.usage.pop_back()
        } else {
            None
        }
    }

    /// Moves `key` to the MRU position only if it is already tracked.
    ///
    /// # Returns
    ///
    /// `true` when the key was present.
    pub fn promote(&mut self, key: &K) -> bool {
        match self.position(key) {
            Some(0) => true,
            Some(pos) => {
                if let Some(k) = self.usage.remove(pos) {
                    self.usage.push_front(k);
                }
                true
            }
            None => false,
        }
    }

    /// Removes and returns the LRU key.
    pub fn pop_lru(&mut self) -> Option<K> {
        self.usage.pop_back()
    }

    /// Returns the key that the next overflow would evict.
    pub fn victim(&self) -> Option<&K> {
        self.usage.back()
    }

    /// Returns the MRU key.
    pub fn most_recent(&self) -> Option<&K> {
        self.usage.front()
    }

    /// Returns whether `key` is tracked.
    pub fn contains(&self, key: &K) -> bool {
        self.usage.contains(key)
    }

    /// Iterates over the keys from MRU to LRU.
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.usage.iter()
    }

    /// Number of tracked keys.
    pub fn len(&self) -> usize {
        self.usage.len()
    }

    /// Returns whether nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.usage.is_empty()
    }

    /// Maximum number of tracked keys.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    fn position(&self, key: &K) -> Option<usize> {
        self.usage.iter().position(|k| k == key)
    }
}
