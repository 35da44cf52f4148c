//! Simulation driver and reporting.

/// End-of-run report.
pub mod report;

/// Top-level simulator.
pub mod simulator;

pub use report::SimulationReport;
pub use simulator::Simulator;
