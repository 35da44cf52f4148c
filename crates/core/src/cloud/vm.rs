//! Virtual machine descriptor.

use serde::Serialize;

use crate::common::VmId;

/// An admitted (or candidate) workload: its identity and committed memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VirtualMachine {
    id: VmId,
    memory_size: u64,
}

impl VirtualMachine {
    /// Describes VM `id` committing `memory_size` MB.
    pub const fn new(id: VmId, memory_size: u64) -> Self {
        Self { id, memory_size }
    }

    /// Identity of the VM.
    pub const fn id(&self) -> VmId {
        self.id
    }

    /// Committed memory in MB.
    pub const fn memory_size(&self) -> u64 {
        self.memory_size
    }
}
