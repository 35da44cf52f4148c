//! Simulator: owns the infrastructure, the paging path, and the monitor.
//!
//! A run has two phases. Admission places the configured VMs into the
//! memory pool. Replay then feeds every VM's access pattern through the
//! page fault manager, one access fully resolved before the next begins.

use std::fmt;
use std::thread;
use std::time::Duration;

use tracing::{debug, info};

use crate::cloud::{CloudInfrastructure, VirtualMachine};
use crate::common::{ConfigError, VirtAddr, VmId};
use crate::config::Config;
use crate::stats::ResourceMonitor;
use crate::units::mmu::PagingHandler;
use crate::units::mmu::fault::PageFaultManager;

use super::report::SimulationReport;

/// Hook invoked between two consecutive accesses.
pub type PacingHook = Box<dyn FnMut()>;

/// Top-level simulator.
pub struct Simulator {
    config: Config,
    cloud: CloudInfrastructure,
    faults: PageFaultManager,
    monitor: ResourceMonitor,
    rejected: Vec<VmId>,
    pacing: Option<PacingHook>,
}

impl fmt::Debug for Simulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulator")
            .field("cloud", &self.cloud)
            .field("faults", &self.faults)
            .field("monitor", &self.monitor)
            .field("rejected", &self.rejected)
            .field("paced", &self.pacing.is_some())
            .finish_non_exhaustive()
    }
}

impl Simulator {
    /// Builds a simulator from an already validated configuration.
    ///
    /// A non-zero `access_delay_ms` installs a sleeping pacing hook.
    pub fn new(config: Config) -> Self {
        let cloud = CloudInfrastructure::from_config(&config.cloud);
        let faults = PageFaultManager::new(PagingHandler::from_config(&config.paging));
        let pacing: Option<PacingHook> = match config.workload.access_delay_ms {
            0 => None,
            ms => {
                let delay = Duration::from_millis(ms);
                Some(Box::new(move || thread::sleep(delay)))
            }
        };
        Self {
            config,
            cloud,
            faults,
            monitor: ResourceMonitor::new(),
            rejected: Vec::new(),
            pacing,
        }
    }

    /// Validates `config`, then builds a simulator from it.
    pub fn try_new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Replaces the pacing hook. Tests pass a counter or nothing at all.
    pub fn set_pacing(&mut self, hook: impl FnMut() + 'static) {
        self.pacing = Some(Box::new(hook));
    }

    /// Removes the pacing hook.
    pub fn clear_pacing(&mut self) {
        self.pacing = None;
    }

    /// VM ids taking part in the run: `1..=n`, `n` clamped to the VM limit.
    pub fn vm_ids(&self) -> impl Iterator<Item = VmId> + use<> {
        let n = self.config.cloud.requested_vms().len() as u32;
        (1..=n).map(VmId::new)
    }

    /// Admits every configured VM in order.
    ///
    /// # Returns
    ///
    /// The number of VMs admitted.
    pub fn admit_all(&mut self) -> usize {
        let requests: Vec<u64> = self.config.cloud.requested_vms().to_vec();
        let mut admitted = 0;
        for (id, memory) in self.vm_ids().zip(requests) {
            if self.cloud.admit(VirtualMachine::new(id, memory)) {
                admitted += 1;
            } else {
                self.rejected.push(id);
            }
        }
        admitted
    }

    /// Resolves a single access.
    ///
    /// # Returns
    ///
    /// `true` if the TLB served the access.
    pub fn access(&mut self, vm: VmId, addr: VirtAddr) -> bool {
        self.faults.process(vm, addr, &mut self.monitor)
    }

    /// Replays the workload pattern for every requested VM.
    ///
    /// Rejected VMs replay too: their page tables exist independently of
    /// admission.
    pub fn replay(&mut self) {
        let pattern: Vec<VirtAddr> = self
            .config
            .workload
            .pattern
            .iter()
            .copied()
            .map(VirtAddr::new)
            .collect();
        for vm in self.vm_ids() {
            debug!(%vm, accesses = pattern.len(), "replaying access pattern");
            self.replay_stream(pattern.iter().map(|&addr| (vm, addr)));
        }
    }

    /// Resolves an arbitrary `(vm, address)` stream in order.
    pub fn replay_stream(&mut self, stream: impl IntoIterator<Item = (VmId, VirtAddr)>) {
        for (vm, addr) in stream {
            let _ = self.access(vm, addr);
            if let Some(hook) = self.pacing.as_mut() {
                hook();
            }
        }
    }

    /// Admits, replays, and reports.
    pub fn run(&mut self) -> SimulationReport {
        let admitted = self.admit_all();
        info!(admitted, rejected = self.rejected.len(), "admission complete");
        self.replay();
        self.report()
    }

    /// Snapshot of the current state as a report.
    pub fn report(&self) -> SimulationReport {
        let handler = self.faults.handler();
        SimulationReport {
            admitted: self.cloud.virtual_machines().to_vec(),
            rejected: self.rejected.clone(),
            total_memory: self.cloud.total_memory(),
            available_memory: self.cloud.available_memory(),
            memory_utilization: self.cloud.memory_utilization(),
            total_accesses: self.monitor.total_accesses(),
            page_faults: self.monitor.page_faults(),
            tlb_hits: self.monitor.tlb_hits(),
            page_fault_rate: self.monitor.fault_rate(),
            tlb_hit_rate: self.monitor.hit_rate(),
            disk_fetches: handler.disk().fetches(),
            reclaims: handler.disk().reclaims(),
            safe: self.cloud.is_safe_state(),
            hot_pages: handler
                .replacement()
                .hot_pages()
                .map(ToString::to_string)
                .collect(),
        }
    }

    /// The cloud infrastructure.
    pub fn cloud(&self) -> &CloudInfrastructure {
        &self.cloud
    }

    /// The page fault manager.
    pub fn faults(&self) -> &PageFaultManager {
        &self.faults
    }

    /// The access monitor.
    pub fn monitor(&self) -> &ResourceMonitor {
        &self.monitor
    }

    /// VMs turned away by `admit_all`.
    pub fn rejected(&self) -> &[VmId] {
        &self.rejected
    }

    /// The configuration this simulator was built from.
    pub fn config(&self) -> &Config {
        &self.config
    }
}
