use crate::core::{DetectionRecord, FaultDefinition};
use crate::evidence::ArtifactContext;
use crate::heuristics::Heuristic;

/// Every literal mention of the fault name counts as evidence.
pub struct DirectNameHeuristic;

impl DirectNameHeuristic {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DirectNameHeuristic {
    fn default() -> Self {
        Self::new()
    }
}

impl Heuristic for DirectNameHeuristic {
    fn id(&self) -> &'static str {
        "direct-name"
    }

    fn name(&self) -> &'static str {
        "Direct fault name"
    }

    fn description(&self) -> &'static str {
        "Matches literal occurrences of the fault name in generated test code"
    }

    fn detect(&self, context: &ArtifactContext<'_>, fault: &FaultDefinition) -> Vec<DetectionRecord> {
        if fault.fault_name.is_empty() {
            return Vec::new();
        }

        context
            .content()
            .match_indices(fault.fault_name.as_str())
            .map(|(offset, _)| context.record_at(offset))
            .collect()
    }
}
