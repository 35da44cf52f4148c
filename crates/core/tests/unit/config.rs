//! # Configuration Tests
//!
//! Defaults, JSON deserialization, file loading, and validation.

use std::io::Write;

use rstest::rstest;
use tempfile::NamedTempFile;
use vmsim_core::common::ConfigError;
use vmsim_core::config::*;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.cloud.total_memory, 2000);
    assert_eq!(config.cloud.max_vms, 5);
    assert_eq!(config.cloud.vm_memory, vec![500, 800]);
    assert_eq!(config.paging.tlb_size, 16);
    assert_eq!(config.paging.tracker_size, 16);
    assert_eq!(config.paging.page_size, 6000);
    assert_eq!(config.paging.prefetch_step, 1000);
    assert_eq!(config.paging.prefetcher, PrefetcherKind::Cluster);
    assert_eq!(
        config.workload.pattern,
        vec![1000, 2000, 3000, 1000, 4000, 5000, 2000, 6000]
    );
    assert_eq!(config.workload.access_delay_ms, 0);
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_json_uses_defaults() {
    let config = Config::from_json_str("{}").unwrap();
    assert_eq!(config.cloud.total_memory, 2000);
    assert_eq!(config.paging.tlb_size, 16);
}

#[test]
fn test_partial_sections_fill_in_defaults() {
    let config = Config::from_json_str(r#"{"paging": {"page_size": 4000}}"#).unwrap();
    assert_eq!(config.paging.page_size, 4000);
    assert_eq!(config.paging.prefetch_step, 1000);
    assert_eq!(config.paging.tlb_size, 16);
}

#[test]
fn test_vm_requests_clamp_to_limit() {
    let cloud = CloudConfig {
        vm_memory: vec![10; 9],
        ..CloudConfig::default()
    };
    assert_eq!(cloud.requested_vms().len(), 5);
}

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"cloud": {{"total_memory": 1500, "vm_memory": [700]}}, "workload": {{"access_delay_ms": 5}}}}"#
    )
    .unwrap();

    let config = Config::from_path(file.path()).unwrap();
    assert_eq!(config.cloud.total_memory, 1500);
    assert_eq!(config.cloud.vm_memory, vec![700]);
    assert_eq!(config.workload.access_delay_ms, 5);
}

#[test]
fn test_missing_file_is_io_error() {
    let err = Config::from_path("/nonexistent/vmsim.json").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_malformed_json_is_parse_error() {
    let err = Config::from_json_str(r#"{"cloud": {"total_memory": "lots"}}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[rstest]
#[case(r#"{"cloud": {"total_memory": 0}}"#)]
#[case(r#"{"cloud": {"total_memory": 4000}}"#)]
#[case(r#"{"cloud": {"total_memory": 5000}}"#)]
#[case(r#"{"cloud": {"max_vms": 0}}"#)]
#[case(r#"{"cloud": {"max_vms": 6}}"#)]
#[case(r#"{"cloud": {"max_vms": 10, "vm_memory": [100, 100, 100, 100, 100, 100, 100, 100]}}"#)]
#[case(r#"{"cloud": {"vm_memory": [100, 0]}}"#)]
#[case(r#"{"paging": {"tlb_size": 0}}"#)]
#[case(r#"{"paging": {"tracker_size": 0}}"#)]
#[case(r#"{"paging": {"page_size": 0}}"#)]
#[case(r#"{"paging": {"prefetch_step": 0}}"#)]
#[case(r#"{"paging": {"prefetch_step": 7000}}"#)]
fn test_out_of_range_values_are_rejected(#[case] json: &str) {
    assert!(Config::from_json_str(json).is_err());
}

#[test]
fn test_error_messages_name_the_problem() {
    let err = Config::from_json_str(r#"{"cloud": {"total_memory": 4200}}"#).unwrap_err();
    assert_eq!(err.to_string(), "total memory 4200 MB exceeds the 4000 MB limit");

    let err = Config::from_json_str(r#"{"cloud": {"vm_memory": [5, 0]}}"#).unwrap_err();
    assert_eq!(err.to_string(), "memory size for VM 2 must be a positive integer");

    let err = Config::from_json_str(r#"{"cloud": {"max_vms": 10}}"#).unwrap_err();
    assert_eq!(err.to_string(), "max_vms 10 exceeds the limit of 5 VMs");
}

#[test]
fn test_unvalidated_vm_limit_still_clamps_requests() {
    let cloud = CloudConfig {
        max_vms: 10,
        vm_memory: vec![10; 8],
        ..CloudConfig::default()
    };
    assert_eq!(cloud.requested_vms().len(), 5);
}

#[test]
fn test_largest_total_below_ceiling_is_accepted() {
    assert!(Config::from_json_str(r#"{"cloud": {"total_memory": 3999}}"#).is_ok());
}
