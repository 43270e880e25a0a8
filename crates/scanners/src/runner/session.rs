use crate::core::{DetectionLedger, FaultCatalog, ScanConfig, TIMESTAMP_FORMAT};
use crate::error::{Error, Result};
use crate::evidence::{CaseCounter, StructuredEvidenceScanner, TextEvidenceScanner, TextScanStats};
use crate::report::{CoverageSummary, FaultReport, ReportFormat, ReportGenerator, ReportMetadata};
use chrono::Local;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisStats {
    pub structured_records: usize,
    pub text: TextScanStats,
    pub total_test_cases: usize,
}

/// One analysis run over a generated tests folder. Owns the ledger that both
/// evidence channels write into.
pub struct AnalysisSession {
    tests_dir: PathBuf,
    catalog: FaultCatalog,
    config: ScanConfig,
    ledger: DetectionLedger,
    experiment: String,
    total_test_cases: usize,
}

impl AnalysisSession {
    pub fn new(tests_dir: impl Into<PathBuf>, catalog: FaultCatalog, config: ScanConfig) -> Result<Self> {
        let tests_dir = tests_dir.into();
        if !tests_dir.is_dir() {
            return Err(Error::MissingDirectory(tests_dir));
        }

        let experiment = format!(
            "{}_{}",
            config.experiment_prefix,
            Local::now().format("%Y%m%d%H%M%S")
        );

        Ok(Self {
            tests_dir,
            catalog,
            config,
            ledger: DetectionLedger::new(),
            experiment,
            total_test_cases: 0,
        })
    }

    pub fn with_experiment(mut self, experiment: impl Into<String>) -> Self {
        self.experiment = experiment.into();
        self
    }

    /// Structured report first, then test files, then the case count. Starts
    /// from an empty ledger on every call.
    pub fn analyze(&mut self) -> Result<AnalysisStats> {
        self.ledger = DetectionLedger::new();

        let structured_records = StructuredEvidenceScanner::new(&self.catalog, &self.config)
            .scan_directory(&self.tests_dir, &mut self.ledger);

        let text = TextEvidenceScanner::new(&self.config)?.scan_directory(
            &self.tests_dir,
            &self.catalog,
            &mut self.ledger,
        )?;

        self.total_test_cases = CaseCounter::new(&self.config)?.count_directory(&self.tests_dir);

        info!(
            "Analysis of {} complete: {} structured record(s), {} text record(s), {} test case(s)",
            self.tests_dir.display(),
            structured_records,
            text.records_stored,
            self.total_test_cases
        );

        Ok(AnalysisStats {
            structured_records,
            text,
            total_test_cases: self.total_test_cases,
        })
    }

    pub fn tests_dir(&self) -> &Path {
        &self.tests_dir
    }

    pub fn catalog(&self) -> &FaultCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn ledger(&self) -> &DetectionLedger {
        &self.ledger
    }

    pub fn experiment(&self) -> &str {
        &self.experiment
    }

    pub fn total_test_cases(&self) -> usize {
        self.total_test_cases
    }

    pub fn summary(&self) -> CoverageSummary {
        CoverageSummary::from_ledger(&self.catalog, &self.ledger)
    }

    /// Metadata stamped with the current time.
    pub fn metadata(&self) -> ReportMetadata {
        ReportMetadata {
            experiment: self.experiment.clone(),
            generated_at: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            test_folder: self.tests_dir.display().to_string(),
            total_test_cases: self.total_test_cases,
        }
    }

    pub fn render(&self, format: ReportFormat) -> Result<String> {
        let metadata = self.metadata();
        let report = FaultReport::new(&self.catalog, &self.ledger, &metadata)
            .with_max_detections_shown(self.config.max_detections_shown);
        ReportGenerator::generate(&report, format)
    }
}
