//! Flags faults whose endpoint is called next to a rejection indicator.
//!
//! For every occurrence of one of the fault's API paths, a window of
//! `proximity_window` characters on each side is inspected for any configured
//! indicator (`400`, a zero status, the injected flag) or the fault name itself.
//! Templated segments such as `{tripId}` match any concrete value.

use crate::core::{DetectionRecord, FaultDefinition, ScanConfig};
use crate::evidence::ArtifactContext;
use crate::heuristics::Heuristic;
use tracing::warn;

pub struct EndpointProximityHeuristic {
    window: usize,
    indicators: Vec<String>,
    match_fault_name: bool,
}

impl EndpointProximityHeuristic {
    pub fn new(window: usize, indicators: Vec<String>) -> Self {
        Self {
            window,
            indicators,
            match_fault_name: true,
        }
    }

    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(config.proximity_window, config.proximity_indicators.clone())
            .with_fault_name_match(config.match_fault_name_in_window)
    }

    pub fn with_fault_name_match(mut self, enabled: bool) -> Self {
        self.match_fault_name = enabled;
        self
    }

    fn window_has_indicator(&self, window: &str, fault_name: &str) -> bool {
        self.indicators
            .iter()
            .filter(|indicator| !indicator.is_empty())
            .any(|indicator| window.contains(indicator.as_str()))
            || (self.match_fault_name && !fault_name.is_empty() && window.contains(fault_name))
    }
}

impl Default for EndpointProximityHeuristic {
    fn default() -> Self {
        Self::from_config(&ScanConfig::default())
    }
}

impl Heuristic for EndpointProximityHeuristic {
    fn id(&self) -> &'static str {
        "endpoint-proximity"
    }

    fn name(&self) -> &'static str {
        "Endpoint proximity"
    }

    fn description(&self) -> &'static str {
        "Matches a fault's API path with a rejection indicator nearby"
    }

    fn detect(&self, context: &ArtifactContext<'_>, fault: &FaultDefinition) -> Vec<DetectionRecord> {
        let text = context.content();
        let mut records = Vec::new();

        for endpoint in &fault.api {
            let regex = match endpoint.path_regex() {
                Ok(regex) => regex,
                Err(e) => {
                    warn!("Skipping endpoint {}: {}", endpoint, e);
                    continue;
                }
            };

            for occurrence in regex.find_iter(text) {
                let window = surrounding(text, occurrence.start(), occurrence.end(), self.window);
                if self.window_has_indicator(window, &fault.fault_name) {
                    records.push(
                        context
                            .record_at(occurrence.start())
                            .with_api_path(endpoint.path.as_str()),
                    );
                }
            }
        }

        records
    }

    fn skips_recorded_methods(&self) -> bool {
        true
    }
}

/// `text[start..end]` widened by up to `radius` characters on each side.
fn surrounding(text: &str, start: usize, end: usize, radius: usize) -> &str {
    let from = text[..start]
        .char_indices()
        .rev()
        .take(radius)
        .last()
        .map_or(start, |(idx, _)| idx);

    let to = text[end..]
        .char_indices()
        .nth(radius)
        .map_or(text.len(), |(idx, _)| end + idx);

    &text[from..to]
}
