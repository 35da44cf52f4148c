//! End-to-end simulator tests.

use std::cell::Cell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use vmsim_core::common::ConfigError;
use vmsim_core::config::Config;
use vmsim_core::sim::Simulator;

use crate::common::{init_tracing, va, vm};

fn config(total: u64, vms: &[u64]) -> Config {
    let mut config = Config::default();
    config.cloud.total_memory = total;
    config.cloud.vm_memory = vms.to_vec();
    config
}

/// 2000 MB; VM1(500) and VM2(800) fit, VM3(800) does not. A cold access
/// faults once and prefetches six blocks; repeating it hits.
#[test]
fn admission_then_fault_then_hit() {
    init_tracing();
    let mut sim = Simulator::new(config(2000, &[500, 800, 800]));

    assert_eq!(sim.admit_all(), 2);
    assert_eq!(sim.cloud().available_memory(), 700);
    assert_eq!(sim.rejected(), &[vm(3)]);

    assert!(!sim.access(vm(1), va(1000)));
    let handler = sim.faults().handler();
    assert_eq!(handler.page_tables().get(vm(1)).map(|t| t.len()), Some(6));
    assert_eq!(handler.tlb().len(), 6);
    assert_eq!(sim.monitor().page_faults(), 1);

    assert!(sim.access(vm(1), va(1000)));
    assert_eq!(sim.monitor().tlb_hits(), 1);
}

/// The stock workload: one cold fault, everything else hits the shared TLB.
#[test]
fn default_run_report() {
    init_tracing();
    let mut sim = Simulator::new(Config::default());
    let report = sim.run();

    assert_eq!(report.admitted.len(), 2);
    assert!(report.rejected.is_empty());
    assert_eq!(report.available_memory, 700);
    assert!((report.memory_utilization - 0.65).abs() < 1e-12);
    assert!((report.display_utilization() - 65.0).abs() < 1e-9);
    assert!(!report.overcommitted());
    assert_eq!(report.total_accesses, 16);
    assert_eq!(report.page_faults, 1);
    assert_eq!(report.tlb_hits, 15);
    assert!((report.page_fault_rate - 1.0 / 16.0).abs() < 1e-12);
    assert!((report.tlb_hit_rate - 15.0 / 16.0).abs() < 1e-12);
    assert_eq!(report.disk_fetches, 6);
    assert_eq!(report.reclaims, 0);
    assert!(report.safe);
    assert_eq!(
        report.hot_pages,
        vec![
            "Page_for_6000",
            "Page_for_5000",
            "Page_for_4000",
            "Page_for_3000",
            "Page_for_2000",
            "Page_for_1000",
        ]
    );
}

/// Rejected VMs still replay their pattern.
#[test]
fn rejected_vms_replay() {
    let mut cfg = config(1000, &[900, 900]);
    cfg.workload.pattern = vec![10_000];
    let mut sim = Simulator::new(cfg);
    let report = sim.run();

    assert_eq!(report.rejected, vec![vm(2)]);
    assert_eq!(report.total_accesses, 2);
    assert_eq!(report.page_faults, 1);
}

/// Requests beyond the VM limit are dropped before admission and replay.
#[test]
fn requests_clamp_to_vm_limit() {
    let mut cfg = config(3000, &[100; 7]);
    cfg.workload.pattern = vec![1000];
    let mut sim = Simulator::new(cfg);
    let report = sim.run();

    assert_eq!(report.admitted.len(), 5);
    assert!(report.rejected.is_empty());
    assert_eq!(report.total_accesses, 5);
}

/// The pacing hook runs once per access.
#[test]
fn pacing_hook_runs_between_accesses() {
    let calls = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&calls);

    let mut sim = Simulator::new(Config::default());
    sim.set_pacing(move || counter.set(counter.get() + 1));
    let _ = sim.run();
    assert_eq!(calls.get(), 16);

    sim.clear_pacing();
    sim.replay_stream([(vm(1), va(1000))]);
    assert_eq!(calls.get(), 16);
}

/// A VM limit above five is refused, and an unvalidated one is still capped.
#[test]
fn vm_limit_cannot_exceed_five() {
    let mut cfg = config(3000, &[100; 8]);
    cfg.cloud.max_vms = 10;
    let err = Simulator::try_new(cfg.clone()).unwrap_err();
    assert!(matches!(err, ConfigError::TooManyVms { max_vms: 10, limit: 5 }));

    cfg.workload.pattern = vec![1000];
    let mut sim = Simulator::new(cfg);
    assert_eq!(sim.admit_all(), 5);
    assert_eq!(sim.cloud().virtual_machines().len(), 5);
    assert_eq!(sim.cloud().available_memory(), 2500);
    assert_eq!(sim.vm_ids().count(), 5);
}

/// Invalid configurations are refused before anything runs.
#[test]
fn try_new_validates() {
    let err = Simulator::try_new(config(0, &[100])).unwrap_err();
    assert!(matches!(err, ConfigError::ZeroTotalMemory));
}

/// The report serializes to JSON for the CLI.
#[test]
fn report_serializes() {
    let mut sim = Simulator::new(Config::default());
    let report = sim.run();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["total_accesses"], 16);
    assert_eq!(json["admitted"][1]["memory_size"], 800);
    assert_eq!(json["rejected"], serde_json::json!([]));
    assert_eq!(json["safe"], true);
}
