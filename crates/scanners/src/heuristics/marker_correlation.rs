//! Correlates an injected-fault flag with the fault name serialized after it.
//!
//! Generated assertions often embed response bodies as dict literals, so the
//! evidence shows up as `"isInjected": True, ..., "faultName": "X"` rather than
//! as the bare fault name. The pairing is non-greedy and may span lines.

use crate::core::{DetectionRecord, FaultDefinition};
use crate::evidence::ArtifactContext;
use crate::heuristics::Heuristic;
use regex::Regex;
use std::sync::LazyLock;

static INJECTED_TRUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)["']isInjected["']\s*:\s*true"#).expect("injected marker pattern is valid")
});

static INJECTED_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)["']isInjected["']\s*:\s*[Tt]rue.*?["']faultName["']\s*:\s*["'](\w+)["']"#)
        .expect("injected pair pattern is valid")
});

pub struct MarkerCorrelationHeuristic;

impl MarkerCorrelationHeuristic {
    pub fn new() -> Self {
        Self
    }

    pub fn has_injected_marker(text: &str) -> bool {
        INJECTED_TRUE.is_match(text)
    }
}

impl Default for MarkerCorrelationHeuristic {
    fn default() -> Self {
        Self::new()
    }
}

impl Heuristic for MarkerCorrelationHeuristic {
    fn id(&self) -> &'static str {
        "marker-correlation"
    }

    fn name(&self) -> &'static str {
        "Injected marker correlation"
    }

    fn description(&self) -> &'static str {
        "Pairs an isInjected=true flag with the faultName value that follows it"
    }

    fn detect(&self, context: &ArtifactContext<'_>, fault: &FaultDefinition) -> Vec<DetectionRecord> {
        let text = context.content();
        if !Self::has_injected_marker(text) {
            return Vec::new();
        }

        INJECTED_PAIR
            .captures_iter(text)
            .filter(|caps| caps.get(1).is_some_and(|name| name.as_str() == fault.fault_name))
            .filter_map(|caps| caps.get(0))
            .map(|whole| context.record_at(whole.start()))
            .collect()
    }
}
