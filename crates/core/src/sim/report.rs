//! End-of-run report.
//!
//! Collects everything the reporting layer needs once the access stream has
//! been replayed: admission results, memory utilization, access rates, disk
//! traffic, the safety verdict, and the hot pages.

use serde::Serialize;

use crate::cloud::VirtualMachine;
use crate::common::VmId;

/// Summary of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    /// VMs admitted, in admission order.
    pub admitted: Vec<VirtualMachine>,
    /// VMs turned away at admission.
    pub rejected: Vec<VmId>,
    /// Total memory capacity in MB.
    pub total_memory: u64,
    /// Memory left unallocated in MB.
    pub available_memory: u64,
    /// Allocated over total memory, unclamped.
    pub memory_utilization: f64,
    /// Accesses replayed.
    pub total_accesses: u64,
    /// Accesses that faulted.
    pub page_faults: u64,
    /// Accesses served by the TLB.
    pub tlb_hits: u64,
    /// Faults over accesses.
    pub page_fault_rate: f64,
    /// TLB hits over accesses.
    pub tlb_hit_rate: f64,
    /// Pages read from the backing store.
    pub disk_fetches: u64,
    /// Pages reclaimed after eviction.
    pub reclaims: u64,
    /// Banker's safety verdict.
    pub safe: bool,
    /// Replacement tracker contents, most recently used first.
    pub hot_pages: Vec<String>,
}

impl SimulationReport {
    /// Utilization as a percentage, clamped to 100 for display.
    pub fn display_utilization(&self) -> f64 {
        (self.memory_utilization * 100.0).min(100.0)
    }

    /// Returns whether more memory is allocated than exists.
    ///
    /// Checked against the unclamped fraction.
    pub fn overcommitted(&self) -> bool {
        self.memory_utilization > 1.0
    }

    /// Prints the report to stdout.
    pub fn print(&self) {
        println!("\n==========================================================");
        println!("VM MEMORY SIMULATION REPORT");
        println!("==========================================================");
        for vm in &self.admitted {
            println!("  {:<22} {} MB", format!("{} admitted", vm.id()), vm.memory_size());
        }
        for id in &self.rejected {
            println!("  {:<22} rejected", id.to_string());
        }
        println!(
            "  memory.available       {} / {} MB",
            self.available_memory, self.total_memory
        );
        println!("----------------------------------------------------------");
        if self.safe {
            println!("The system is in a safe state.");
        } else {
            println!("Warning: The system is in an unsafe state.");
        }
        println!("\nPerformance Analysis:");
        println!("{:<20} {:.2}%", "Memory Utilization:", self.display_utilization());
        if self.overcommitted() {
            println!("Warning: Memory utilization exceeds total available memory.");
        }
        println!("{:<20} {:.4}", "Page Fault Rate:", self.page_fault_rate);
        println!("{:<20} {:.4}", "TLB Hit Rate:", self.tlb_hit_rate);
        println!("----------------------------------------------------------");
        println!("  accesses               {}", self.total_accesses);
        println!("  page_faults            {}", self.page_faults);
        println!("  tlb_hits               {}", self.tlb_hits);
        println!("  disk.fetches           {}", self.disk_fetches);
        println!("  disk.reclaims          {}", self.reclaims);
        println!("  hot_pages              {}", self.hot_pages.join(", "));
        println!("==========================================================");
    }
}
