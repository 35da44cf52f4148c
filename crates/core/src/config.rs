//! Configuration system for the VM memory simulator.
//!
//! This module defines all configuration structures used to parameterize a
//! run. It provides:
//! 1. **Defaults:** Baseline constants (memory ceiling, VM limit, TLB size, page window).
//! 2. **Structures:** Hierarchical config for the cloud, paging, and workload.
//! 3. **Validation:** Rejection of non-positive or out-of-range values.
//!
//! Configuration is supplied as JSON (file or string) or built with
//! `Config::default()` and overridden field by field from the CLI.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::ConfigError;
use crate::common::constants;

/// Default configuration constants.
mod defaults {
    use crate::common::constants;

    /// Total memory capacity in MB.
    pub const TOTAL_MEMORY: u64 = 2000;

    /// Memory requested by each default VM, in MB.
    pub const VM_MEMORY: [u64; 2] = [500, 800];

    /// Pacing delay between accesses in milliseconds (disabled).
    pub const ACCESS_DELAY_MS: u64 = 0;

    /// Returns the default workload pattern.
    pub fn pattern() -> Vec<u64> {
        constants::DEFAULT_ACCESS_PATTERN.to_vec()
    }
}

/// Page prefetcher types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub enum PrefetcherKind {
    /// No prefetching: a fault maps only the requested address.
    None,
    /// Clustered prefetching over the whole page window.
    #[default]
    Cluster,
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use vmsim_core::config::{Config, PrefetcherKind};
///
/// let json = r#"{
///     "cloud": { "total_memory": 3000, "vm_memory": [1000, 1000, 500] },
///     "paging": { "tlb_size": 8, "prefetcher": "None" },
///     "workload": { "pattern": [1000, 1000] }
/// }"#;
///
/// let config = Config::from_json_str(json).unwrap();
/// assert_eq!(config.cloud.total_memory, 3000);
/// assert_eq!(config.cloud.max_vms, 5);
/// assert_eq!(config.paging.tlb_size, 8);
/// assert_eq!(config.paging.page_size, 6000);
/// assert_eq!(config.paging.prefetcher, PrefetcherKind::None);
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Admission parameters
    #[serde(default)]
    pub cloud: CloudConfig,
    /// TLB, tracker, and prefetch parameters
    #[serde(default)]
    pub paging: PagingConfig,
    /// Access stream parameters
    #[serde(default)]
    pub workload: WorkloadConfig,
}

impl Config {
    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Checks every value against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.cloud.validate()?;
        self.paging.validate()
    }
}

/// Cloud infrastructure configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CloudConfig {
    /// Total memory capacity in MB (must be below the 4000 MB ceiling)
    #[serde(default = "CloudConfig::default_total_memory")]
    pub total_memory: u64,

    /// Maximum number of admitted VMs (at most 5)
    #[serde(default = "CloudConfig::default_max_vms")]
    pub max_vms: usize,

    /// Requested memory per VM, in MB. VM ids are assigned 1, 2, ... in
    /// order; entries past `max_vms` are ignored.
    #[serde(default = "CloudConfig::default_vm_memory")]
    pub vm_memory: Vec<u64>,
}

impl CloudConfig {
    fn default_total_memory() -> u64 {
        defaults::TOTAL_MEMORY
    }

    fn default_max_vms() -> usize {
        constants::MAX_VM_COUNT
    }

    fn default_vm_memory() -> Vec<u64> {
        defaults::VM_MEMORY.to_vec()
    }

    /// VM memory requests that take part in the run, clamped to `max_vms`
    /// and to the fixed VM limit.
    pub fn requested_vms(&self) -> &[u64] {
        let n = self
            .vm_memory
            .len()
            .min(self.max_vms)
            .min(constants::MAX_VM_COUNT);
        &self.vm_memory[..n]
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.total_memory == 0 {
            return Err(ConfigError::ZeroTotalMemory);
        }
        if self.total_memory >= constants::MAX_TOTAL_MEMORY {
            return Err(ConfigError::TotalMemoryTooLarge {
                total: self.total_memory,
                limit: constants::MAX_TOTAL_MEMORY,
            });
        }
        if self.max_vms == 0 {
            return Err(ConfigError::ZeroMaxVms);
        }
        if self.max_vms > constants::MAX_VM_COUNT {
            return Err(ConfigError::TooManyVms {
                max_vms: self.max_vms,
                limit: constants::MAX_VM_COUNT,
            });
        }
        if let Some(pos) = self.vm_memory.iter().position(|&m| m == 0) {
            return Err(ConfigError::ZeroVmMemory { index: pos + 1 });
        }
        Ok(())
    }
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            total_memory: defaults::TOTAL_MEMORY,
            max_vms: constants::MAX_VM_COUNT,
            vm_memory: defaults::VM_MEMORY.to_vec(),
        }
    }
}

/// Paging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PagingConfig {
    /// TLB entry count
    #[serde(default = "PagingConfig::default_tlb_size")]
    pub tlb_size: usize,

    /// Replacement tracker entry count
    #[serde(default = "PagingConfig::default_tracker_size")]
    pub tracker_size: usize,

    /// Prefetch window size in simulated bytes
    #[serde(default = "PagingConfig::default_page_size")]
    pub page_size: u64,

    /// Distance between prefetched sub-blocks
    #[serde(default = "PagingConfig::default_prefetch_step")]
    pub prefetch_step: u64,

    /// Prefetch policy applied on page-table misses
    #[serde(default)]
    pub prefetcher: PrefetcherKind,
}

impl PagingConfig {
    fn default_tlb_size() -> usize {
        constants::TLB_SIZE
    }

    fn default_tracker_size() -> usize {
        constants::TRACKER_SIZE
    }

    fn default_page_size() -> u64 {
        constants::PAGE_SIZE
    }

    fn default_prefetch_step() -> u64 {
        constants::PREFETCH_STEP
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tlb_size == 0 {
            return Err(ConfigError::ZeroCapacity { name: "tlb_size" });
        }
        if self.tracker_size == 0 {
            return Err(ConfigError::ZeroCapacity {
                name: "tracker_size",
            });
        }
        if self.page_size == 0 {
            return Err(ConfigError::ZeroCapacity { name: "page_size" });
        }
        if self.prefetch_step == 0 || self.prefetch_step > self.page_size {
            return Err(ConfigError::InvalidPrefetchStep {
                step: self.prefetch_step,
                page_size: self.page_size,
            });
        }
        Ok(())
    }
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            tlb_size: constants::TLB_SIZE,
            tracker_size: constants::TRACKER_SIZE,
            page_size: constants::PAGE_SIZE,
            prefetch_step: constants::PREFETCH_STEP,
            prefetcher: PrefetcherKind::Cluster,
        }
    }
}

/// Workload configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkloadConfig {
    /// Virtual addresses each VM accesses, in order
    #[serde(default = "defaults::pattern")]
    pub pattern: Vec<u64>,

    /// Pause between accesses in milliseconds; 0 disables pacing
    #[serde(default)]
    pub access_delay_ms: u64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            pattern: defaults::pattern(),
            access_delay_ms: defaults::ACCESS_DELAY_MS,
        }
    }
}
