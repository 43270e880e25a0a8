use crate::core::{DetectionLedger, DetectionRecord, FaultCatalog, ScanConfig, UNKNOWN_TEST_METHOD};
use crate::error::Result;
use crate::evidence::artifact::file_name;
use crate::evidence::{find_test_artifacts, ArtifactContext, TestArtifact, TestMethodLocator};
use crate::heuristics::{default_heuristics, Heuristic};
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextScanStats {
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub records_stored: usize,
}

pub struct TextEvidenceScanner {
    locator: TestMethodLocator,
    heuristics: Vec<Box<dyn Heuristic>>,
    config: ScanConfig,
}

impl TextEvidenceScanner {
    pub fn new(config: &ScanConfig) -> Result<Self> {
        Ok(Self {
            locator: TestMethodLocator::from_config(config)?,
            heuristics: default_heuristics(config),
            config: config.clone(),
        })
    }

    pub fn with_heuristics(mut self, heuristics: Vec<Box<dyn Heuristic>>) -> Self {
        self.heuristics = heuristics;
        self
    }

    pub fn heuristics(&self) -> &[Box<dyn Heuristic>] {
        &self.heuristics
    }

    pub fn scan_directory(
        &self,
        dir: &Path,
        catalog: &FaultCatalog,
        ledger: &mut DetectionLedger,
    ) -> Result<TextScanStats> {
        let mut stats = TextScanStats::default();

        for path in find_test_artifacts(dir, &self.config)? {
            let artifact = match TestArtifact::load(&path, &self.config) {
                Ok(artifact) => artifact,
                Err(e) => {
                    let name = file_name(&path).unwrap_or_else(|| path.display().to_string());
                    warn!("Error reading {}: {}", name, e);
                    stats.files_skipped += 1;
                    continue;
                }
            };

            let stored = self.scan_artifact(&artifact, catalog, ledger);
            debug!("{}: {} detection record(s)", artifact.name(), stored);
            stats.files_scanned += 1;
            stats.records_stored += stored;
        }

        info!(
            "Scanned {} test file(s), skipped {}, stored {} detection record(s)",
            stats.files_scanned, stats.files_skipped, stats.records_stored
        );
        Ok(stats)
    }

    /// Runs every heuristic for every fault in catalog order, inserting each
    /// candidate as soon as it is produced so later candidates see it.
    pub fn scan_artifact(
        &self,
        artifact: &TestArtifact,
        catalog: &FaultCatalog,
        ledger: &mut DetectionLedger,
    ) -> usize {
        let context = ArtifactContext::new(artifact, &self.locator);
        let mut stored = 0;

        for fault in catalog {
            for heuristic in &self.heuristics {
                for record in heuristic.detect(&context, fault) {
                    if heuristic.skips_recorded_methods()
                        && ledger.has_test_method(&fault.fault_name, located_method(&record))
                    {
                        continue;
                    }

                    if ledger.record(&fault.fault_name, record) {
                        stored += 1;
                    }
                }
            }
        }

        stored
    }
}

/// The locator's answer behind a candidate; the `unknown` placeholder maps
/// back to no method, which matches records that never had one.
fn located_method(record: &DetectionRecord) -> Option<&str> {
    record
        .test_method()
        .filter(|method| *method != UNKNOWN_TEST_METHOD)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner() -> TextEvidenceScanner {
        TextEvidenceScanner::new(&ScanConfig::default()).unwrap()
    }

    #[test]
    fn test_repeated_path_in_one_method_recorded_once() {
        let artifact = TestArtifact::new(
            "EvoMaster_faults_Test.py",
            r#"
    def test_2_post_on_adminroute(self):
        requests.post(self.baseUrlOfSut + "/api/v1/adminrouteservice/adminroute")
        assert res.status_code == 400
        requests.post(self.baseUrlOfSut + "/api/v1/adminrouteservice/adminroute")
"#,
            "py",
        );
        let catalog = FaultCatalog::train_ticket();
        let mut ledger = DetectionLedger::new();
        scanner().scan_artifact(&artifact, &catalog, &mut ledger);

        let records = ledger.detections("INSUFFICIENT_STATIONS_FAULT");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].test_method(), Some("test_2_post_on_adminroute"));
        assert_eq!(ledger.detection_count("INVALID_STATION_NAME_LENGTH_FAULT"), 1);
    }

    #[test]
    fn test_proximity_skips_method_already_recorded_elsewhere() {
        let artifact = TestArtifact::new(
            "EvoMaster_b_Test.py",
            r#"
    def test_2_post_on_adminroute(self):
        requests.post("/api/v1/adminrouteservice/adminroute")
        assert res.status_code == 400
"#,
            "py",
        );
        let catalog = FaultCatalog::train_ticket();
        let mut ledger = DetectionLedger::new();
        ledger.record(
            "INSUFFICIENT_STATIONS_FAULT",
            DetectionRecord::new("EvoMaster_a_Test.py").with_test_method(Some("test_2_post_on_adminroute")),
        );

        scanner().scan_artifact(&artifact, &catalog, &mut ledger);
        assert_eq!(ledger.detection_count("INSUFFICIENT_STATIONS_FAULT"), 1);
        assert_eq!(ledger.detection_count("INVALID_STATION_NAME_LENGTH_FAULT"), 1);
    }

    const UNATTRIBUTED_CALL: &str = r#"
res = requests.post(self.baseUrlOfSut + "/api/v1/adminrouteservice/adminroute")
assert res.status_code == 400
"#;

    #[test]
    fn test_unattributed_proximity_blocked_by_structured_record() {
        let artifact = TestArtifact::new("EvoMaster_faults_Test.py", UNATTRIBUTED_CALL, "py");
        let catalog = FaultCatalog::train_ticket();
        let mut ledger = DetectionLedger::new();
        ledger.record("INSUFFICIENT_STATIONS_FAULT", DetectionRecord::new("report.json"));

        scanner().scan_artifact(&artifact, &catalog, &mut ledger);
        assert_eq!(ledger.detection_count("INSUFFICIENT_STATIONS_FAULT"), 1);

        let other = ledger.detections("INVALID_STATION_NAME_LENGTH_FAULT");
        assert_eq!(other.len(), 1);
        assert_eq!(other[0].test_method(), Some("unknown"));
    }

    #[test]
    fn test_unattributed_proximity_not_blocked_by_unknown_method() {
        let artifact = TestArtifact::new("EvoMaster_faults_Test.py", UNATTRIBUTED_CALL, "py");
        let catalog = FaultCatalog::train_ticket();
        let mut ledger = DetectionLedger::new();
        ledger.record(
            "INSUFFICIENT_STATIONS_FAULT",
            DetectionRecord::new("EvoMaster_other_Test.py").with_test_method(None),
        );

        scanner().scan_artifact(&artifact, &catalog, &mut ledger);

        let sources: Vec<_> = ledger
            .detections("INSUFFICIENT_STATIONS_FAULT")
            .iter()
            .map(|record| record.source.as_str())
            .collect();
        assert_eq!(sources, vec!["EvoMaster_other_Test.py", "EvoMaster_faults_Test.py"]);
    }

    #[test]
    fn test_direct_name_and_proximity_share_key() {
        let artifact = TestArtifact::new(
            "EvoMaster_faults_Test.py",
            r#"
    def test_4_post_on_minStation(self):
        res = requests.post("/api/v1/travelplanservice/travelPlan/minStation")
        assert "INVALID_STATION_NAME_FAULT" in res.text
"#,
            "py",
        );
        let catalog = FaultCatalog::train_ticket();
        let mut ledger = DetectionLedger::new();
        scanner().scan_artifact(&artifact, &catalog, &mut ledger);

        let records = ledger.detections("INVALID_STATION_NAME_FAULT");
        assert_eq!(records.len(), 1);
        assert!(records[0].api_path.is_none());
        assert!(!ledger.is_detected("INVALID_STATION_LENGTH_FAULT"));
    }

    #[test]
    fn test_scan_directory_skips_helpers_and_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("em_test_utils.py"),
            "INVALID_SEAT_NUMBER_FAULT",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("EvoMaster_faults_Test.py"),
            "def test_0(self):\n    assert 'INVALID_PRICE_RATE_FAULT'\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("EvoMaster_binary_Test.py"), [0xff, 0xfe, 0x00]).unwrap();

        let catalog = FaultCatalog::train_ticket();
        let mut ledger = DetectionLedger::new();
        let stats = scanner()
            .scan_directory(dir.path(), &catalog, &mut ledger)
            .unwrap();

        assert_eq!(stats.files_scanned, 1);
        assert_eq!(stats.files_skipped, 1);
        assert!(ledger.is_detected("INVALID_PRICE_RATE_FAULT"));
        assert!(!ledger.is_detected("INVALID_SEAT_NUMBER_FAULT"));
    }

    #[test]
    fn test_custom_heuristic_set() {
        let scanner = scanner().with_heuristics(Vec::new());
        let artifact = TestArtifact::new("a.py", "INVALID_PRICE_RATE_FAULT", "py");
        let catalog = FaultCatalog::train_ticket();
        let mut ledger = DetectionLedger::new();
        assert_eq!(scanner.scan_artifact(&artifact, &catalog, &mut ledger), 0);
    }
}
