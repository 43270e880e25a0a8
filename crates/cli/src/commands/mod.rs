//! Command implementations for the FaultScope CLI
//!
//! The binary has a single workflow: `analyze` scans a generated tests folder
//! for evidence of injected faults and writes the detection report.

pub mod analyze;
