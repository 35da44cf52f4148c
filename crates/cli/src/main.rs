//! VM memory simulator CLI.
//!
//! This binary drives a single simulation run. It performs:
//! 1. **Configuration:** Loads an optional JSON config, then applies flag overrides.
//! 2. **Admission and replay:** Admits the requested VMs and replays their access pattern.
//! 3. **Reporting:** Prints the performance analysis as text, or the full report as JSON.

use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use vmsim_core::config::{Config, PrefetcherKind};
use vmsim_core::sim::Simulator;

#[derive(Parser, Debug)]
#[command(
    name = "vmsim",
    author,
    version,
    about = "Deterministic VM memory-management simulator",
    long_about = "Admit VMs into a fixed memory pool, replay an access pattern through a shared LRU TLB and per-VM page tables, and report fault/hit rates plus the Banker's safety verdict.\n\nExamples:\n  vmsim --total-memory 2000 --vm 500 --vm 800 --vm 800\n  vmsim --config sim.json --json\n  vmsim --addresses 1000,2000,1000 --delay-ms 100"
)]
struct Cli {
    /// JSON configuration file; flags override its values.
    #[arg(short, long)]
    config: Option<String>,

    /// Total memory capacity in MB (must be below 4000).
    #[arg(long)]
    total_memory: Option<u64>,

    /// Memory size of the next VM in MB. Repeat once per VM.
    #[arg(long = "vm", value_name = "MB")]
    vms: Vec<u64>,

    /// TLB entry count.
    #[arg(long)]
    tlb_size: Option<usize>,

    /// Replacement tracker entry count.
    #[arg(long)]
    tracker_size: Option<usize>,

    /// Disable clustered prefetch.
    #[arg(long)]
    no_prefetch: bool,

    /// Comma-separated virtual addresses each VM accesses.
    #[arg(long, value_delimiter = ',')]
    addresses: Vec<u64>,

    /// Pause between accesses in milliseconds.
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,

    /// Log every access (debug level).
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(2);
        }
    };

    let mut sim = Simulator::new(config);
    let report = sim.run();

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{text}"),
            Err(err) => {
                eprintln!("error: failed to encode report: {err}");
                process::exit(1);
            }
        }
    } else {
        report.print();
    }
}

/// Installs the fmt subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Loads the config file (or defaults), applies flag overrides, and validates.
fn build_config(cli: &Cli) -> Result<Config, vmsim_core::common::ConfigError> {
    let mut config = match &cli.config {
        Some(path) => Config::from_path(path)?,
        None => Config::default(),
    };

    if let Some(total) = cli.total_memory {
        config.cloud.total_memory = total;
    }
    if !cli.vms.is_empty() {
        config.cloud.vm_memory.clone_from(&cli.vms);
    }
    if let Some(size) = cli.tlb_size {
        config.paging.tlb_size = size;
    }
    if let Some(size) = cli.tracker_size {
        config.paging.tracker_size = size;
    }
    if cli.no_prefetch {
        config.paging.prefetcher = PrefetcherKind::None;
    }
    if !cli.addresses.is_empty() {
        config.workload.pattern.clone_from(&cli.addresses);
    }
    if let Some(ms) = cli.delay_ms {
        config.workload.access_delay_ms = ms;
    }

    config.validate()?;
    Ok(config)
}
