//! Address, VM identity, and page token types.
//!
//! Strong types keep the three kinds of integers flowing through the
//! simulator apart:
//! 1. **Virtual addresses:** Keys of the TLB and every per-VM page table.
//! 2. **VM identities:** Small positive integers naming admitted workloads.
//! 3. **Pages:** Opaque tokens produced by the backing store.

use std::fmt;

use serde::Serialize;

/// A virtual address issued by a simulated VM.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct VirtAddr(pub u64);

impl VirtAddr {
    /// Creates a new virtual address from a raw value.
    #[inline(always)]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw address value.
    #[inline(always)]
    pub const fn val(&self) -> u64 {
        self.0
    }

    /// Returns the address `offset` bytes above this one, or `None` past `u64::MAX`.
    #[inline]
    pub const fn checked_offset(&self, offset: u64) -> Option<Self> {
        match self.0.checked_add(offset) {
            Some(addr) => Some(Self(addr)),
            None => None,
        }
    }
}

impl fmt::Display for VirtAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a virtual machine, unique within a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct VmId(pub u32);

impl VmId {
    /// Creates a new VM identity.
    #[inline(always)]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw identity value.
    #[inline(always)]
    pub const fn val(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for VmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VM {}", self.0)
    }
}

/// A page of simulated memory.
///
/// The token is identified by the address it was fetched for. Two pages are
/// equal exactly when they were fetched for the same address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Page {
    source: VirtAddr,
}

impl Page {
    /// Creates the page that a fetch of `source` produces.
    #[inline]
    pub const fn for_address(source: VirtAddr) -> Self {
        Self { source }
    }

    /// Returns the address this page was fetched for.
    #[inline]
    pub const fn source(&self) -> VirtAddr {
        self.source
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Page_for_{}", self.source.0)
    }
}
