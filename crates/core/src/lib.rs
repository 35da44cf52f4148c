//! Virtual memory management simulator library.
//!
//! This crate models memory management for a small pool of virtual machines:
//! 1. **Cloud:** Admission of VMs into a fixed memory pool and a Banker's-style safety check.
//! 2. **MMU:** A shared LRU TLB in front of per-VM page tables and a simulated disk.
//! 3. **Policies:** LRU recency stacks and the page replacement tracker.
//! 4. **Prefetch:** Clustered prefetch of the page window around a fault.
//! 5. **Simulation:** Configuration, access statistics, the run driver, and its report.

/// VM admission and the safety check.
pub mod cloud;
/// Common types and constants (addresses, VM ids, pages, errors).
pub mod common;
/// Simulator configuration (defaults, hierarchical config structures, validation).
pub mod config;
/// Simulation driver and report.
pub mod sim;
/// Access statistics.
pub mod stats;
/// Memory subsystem units (MMU, recency policies, prefetchers).
pub mod units;

/// Root configuration type; use `Config::default()` or load it from JSON.
pub use crate::config::Config;
/// Top-level simulator; construct with `Simulator::new`.
pub use crate::sim::Simulator;
