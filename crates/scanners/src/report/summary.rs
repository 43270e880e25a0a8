use crate::core::{DetectionLedger, FaultCatalog};
use serde::Serialize;

pub const PROGRESS_BAR_WIDTH: usize = 50;

/// Catalog-level coverage; UNKNOWN or other uncatalogued ledger entries never
/// count as detected faults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoverageSummary {
    pub total: usize,
    pub detected: usize,
    pub undetected: usize,
    pub percentage: f64,
}

impl CoverageSummary {
    pub fn from_ledger(catalog: &FaultCatalog, ledger: &DetectionLedger) -> Self {
        let total = catalog.len();
        let detected = catalog
            .iter()
            .filter(|fault| ledger.is_detected(&fault.fault_name))
            .count();

        let percentage = if total > 0 {
            detected as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total,
            detected,
            undetected: total - detected,
            percentage,
        }
    }

    pub fn undetected_percentage(&self) -> f64 {
        100.0 - self.percentage
    }
}

pub fn progress_bar(percentage: f64, width: usize) -> String {
    let filled = ((width as f64 * percentage / 100.0).floor().max(0.0) as usize).min(width);
    format!(
        "[{}{}] {:.1}%",
        "#".repeat(filled),
        "-".repeat(width - filled),
        percentage
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DetectionRecord;

    #[test]
    fn test_progress_bar_at_thirty_percent() {
        let bar = progress_bar(30.0, PROGRESS_BAR_WIDTH);
        assert_eq!(bar.matches('#').count(), 15);
        assert_eq!(bar.matches('-').count(), 35);
        assert!(bar.ends_with("] 30.0%"));
    }

    #[test]
    fn test_progress_bar_bounds() {
        assert_eq!(progress_bar(0.0, 4), "[----] 0.0%");
        assert_eq!(progress_bar(100.0, 4), "[####] 100.0%");
        assert_eq!(progress_bar(33.333, 10), "[###-------] 33.3%");
    }

    #[test]
    fn test_summary_ignores_uncatalogued_entries() {
        let catalog = FaultCatalog::train_ticket();
        let mut ledger = DetectionLedger::new();
        for name in [
            "INVALID_ROUTE_ID_FAULT",
            "INVALID_PRICE_RATE_FAULT",
            "INVALID_SEAT_NUMBER_FAULT",
            "UNKNOWN",
        ] {
            ledger.record(name, DetectionRecord::new("report.json"));
        }

        let summary = CoverageSummary::from_ledger(&catalog, &ledger);
        assert_eq!(summary.total, 10);
        assert_eq!(summary.detected, 3);
        assert_eq!(summary.undetected, 7);
        assert!((summary.percentage - 30.0).abs() < 1e-9);
        assert!((summary.undetected_percentage() - 70.0).abs() < 1e-9);
    }
}
