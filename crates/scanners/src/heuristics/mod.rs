//! Text heuristics applied to generated test artifacts
//!
//! Each heuristic is an independent, pure function of one artifact and one
//! fault: it returns candidate records and never touches the ledger. The text
//! scanner composes them and owns insertion, which keeps window sizes and
//! indicator tokens tunable and testable in isolation.

pub mod direct_name;
pub mod endpoint_proximity;
pub mod marker_correlation;

pub use direct_name::DirectNameHeuristic;
pub use endpoint_proximity::EndpointProximityHeuristic;
pub use marker_correlation::MarkerCorrelationHeuristic;

use crate::core::{DetectionRecord, FaultDefinition, ScanConfig};
use crate::evidence::ArtifactContext;

pub trait Heuristic: Send + Sync {
    fn id(&self) -> &'static str;

    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str {
        "No description provided"
    }

    fn detect(&self, context: &ArtifactContext<'_>, fault: &FaultDefinition) -> Vec<DetectionRecord>;

    /// When true, a candidate is dropped outright if the ledger already holds a
    /// record for the fault with the same test method, whatever its source.
    fn skips_recorded_methods(&self) -> bool {
        false
    }
}

/// The three heuristics in the order they must run for each fault.
pub fn default_heuristics(config: &ScanConfig) -> Vec<Box<dyn Heuristic>> {
    vec![
        Box::new(DirectNameHeuristic::new()),
        Box::new(MarkerCorrelationHeuristic::new()),
        Box::new(EndpointProximityHeuristic::from_config(config)),
    ]
}
