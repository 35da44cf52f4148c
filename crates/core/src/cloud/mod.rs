//! Cloud infrastructure: VM admission and the global safety check.
//!
//! The infrastructure owns a fixed memory pool. VMs are admitted in arrival
//! order while both the VM-count limit and the free pool allow it; memory is
//! never returned because no VM release is modeled.

/// Banker's-style reachability check.
pub mod safety;

/// Virtual machine descriptor.
pub mod vm;

use std::collections::HashMap;

use tracing::{info, warn};

use crate::common::constants::MAX_VM_COUNT;
use crate::common::{AdmissionError, VmId};
use crate::config::CloudConfig;

use self::safety::Claim;
pub use self::vm::VirtualMachine;

/// Memory pool, admitted VMs, and their allocations.
#[derive(Debug, Clone)]
pub struct CloudInfrastructure {
    total_memory: u64,
    available_memory: u64,
    max_vms: usize,
    /// Admission order.
    virtual_machines: Vec<VirtualMachine>,
    /// Memory held per VM, recorded at admission.
    allocations: HashMap<VmId, u64>,
}

impl CloudInfrastructure {
    /// Creates an empty infrastructure with `total_memory` MB and a limit of
    /// `max_vms` VMs, capped at [`MAX_VM_COUNT`].
    pub fn new(total_memory: u64, max_vms: usize) -> Self {
        let max_vms = max_vms.min(MAX_VM_COUNT);
        Self {
            total_memory,
            available_memory: total_memory,
            max_vms,
            virtual_machines: Vec::with_capacity(max_vms),
            allocations: HashMap::with_capacity(max_vms),
        }
    }

    /// Builds an infrastructure from `config`.
    pub fn from_config(config: &CloudConfig) -> Self {
        Self::new(config.total_memory, config.max_vms)
    }

    /// Admits `vm` if it fits, explaining a rejection.
    ///
    /// The first candidate that fits is accepted; no comparison between
    /// candidates takes place.
    pub fn try_admit(&mut self, vm: VirtualMachine) -> Result<(), AdmissionError> {
        let id = vm.id();
        if self.virtual_machines.len() >= self.max_vms {
            return Err(AdmissionError::VmLimitReached {
                id,
                limit: self.max_vms,
            });
        }
        if vm.memory_size() > self.available_memory {
            return Err(AdmissionError::InsufficientMemory {
                id,
                requested: vm.memory_size(),
                available: self.available_memory,
            });
        }
        if self.allocations.contains_key(&id) {
            return Err(AdmissionError::DuplicateId { id });
        }

        self.available_memory -= vm.memory_size();
        self.virtual_machines.push(vm);
        let _ = self.allocations.insert(id, vm.memory_size());
        info!(
            %id,
            memory = vm.memory_size(),
            available = self.available_memory,
            "VM admitted"
        );
        Ok(())
    }

    /// Admits `vm` if it fits.
    ///
    /// # Returns
    ///
    /// Whether admission succeeded. A rejection leaves the state unchanged.
    pub fn admit(&mut self, vm: VirtualMachine) -> bool {
        match self.try_admit(vm) {
            Ok(()) => true,
            Err(err) => {
                warn!("{err}");
                false
            }
        }
    }

    /// Current claims, one per admitted VM in admission order.
    ///
    /// Maximum demand equals the VM's committed size, so every need is zero.
    pub fn claims(&self) -> Vec<Claim> {
        self.virtual_machines
            .iter()
            .map(|vm| Claim {
                id: vm.id(),
                allocation: self.allocations.get(&vm.id()).copied().unwrap_or(0),
                max_demand: vm.memory_size(),
            })
            .collect()
    }

    /// Order in which the admitted VMs can finish, if the state is safe.
    pub fn safe_sequence(&self) -> Option<Vec<VmId>> {
        safety::safe_sequence(self.available_memory, &self.claims())
    }

    /// Evaluates the Banker's safety predicate over the recorded allocations.
    ///
    /// With maximum demand equal to allocation this always holds. Evaluation
    /// works on a copy; the recorded allocations are untouched.
    pub fn is_safe_state(&self) -> bool {
        let safe = self.safe_sequence().is_some();
        if !safe {
            warn!(available = self.available_memory, "system is in an unsafe state");
        }
        safe
    }

    /// Sum of admitted sizes over total memory (unclamped).
    pub fn memory_utilization(&self) -> f64 {
        if self.total_memory == 0 {
            return 0.0;
        }
        self.used_memory() as f64 / self.total_memory as f64
    }

    /// Sum of admitted sizes.
    pub fn used_memory(&self) -> u64 {
        self.virtual_machines.iter().map(VirtualMachine::memory_size).sum()
    }

    /// Total memory capacity.
    pub const fn total_memory(&self) -> u64 {
        self.total_memory
    }

    /// Memory not yet allocated.
    pub const fn available_memory(&self) -> u64 {
        self.available_memory
    }

    /// Maximum number of admitted VMs.
    pub const fn max_vms(&self) -> usize {
        self.max_vms
    }

    /// Admitted VMs in admission order.
    pub fn virtual_machines(&self) -> &[VirtualMachine] {
        &self.virtual_machines
    }

    /// Memory recorded for `id`, if admitted.
    pub fn allocation(&self, id: VmId) -> Option<u64> {
        self.allocations.get(&id).copied()
    }
}
