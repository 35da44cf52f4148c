//! Recency policies.
//!
//! # Structures
//!
//! - `LruStack`: bounded Least Recently Used usage stack, generic over its key.
//! - `PageReplacementStrategy`: page-keyed tracker built on `LruStack`.

/// Least Recently Used usage stack.
pub mod lru;

/// Page-level replacement tracker.
pub mod replacement;

pub use lru::LruStack;
pub use replacement::PageReplacementStrategy;
