//! Page fault manager.
//!
//! Entry point used by the simulation driver for every access in the
//! stream. It forwards each access to the paging handler, keeping the
//! operating-system vocabulary of "processing a page fault" at the call site.

use crate::common::{VirtAddr, VmId};
use crate::stats::ResourceMonitor;

use super::PagingHandler;
use super::disk::{BackingStore, SimulatedDisk};

/// Thin façade over a [`PagingHandler`].
#[derive(Debug)]
pub struct PageFaultManager<D: BackingStore = SimulatedDisk> {
    handler: PagingHandler<D>,
}

impl<D: BackingStore> PageFaultManager<D> {
    /// Wraps `handler`.
    pub fn new(handler: PagingHandler<D>) -> Self {
        Self { handler }
    }

    /// Resolves one access of `vm` to `addr`, reporting into `monitor`.
    ///
    /// # Returns
    ///
    /// `true` if the TLB served the access.
    pub fn process(&mut self, vm: VmId, addr: VirtAddr, monitor: &mut ResourceMonitor) -> bool {
        self.handler.access(vm, addr, monitor)
    }

    /// Shared access to the wrapped handler.
    pub fn handler(&self) -> &PagingHandler<D> {
        &self.handler
    }

    /// Exclusive access to the wrapped handler.
    pub fn handler_mut(&mut self) -> &mut PagingHandler<D> {
        &mut self.handler
    }

    /// Unwraps the handler.
    pub fn into_inner(self) -> PagingHandler<D> {
        self.handler
    }
}
