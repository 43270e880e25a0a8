//! FaultScope Scanners - Injected Fault Detection Engine
//!
//! This crate decides which faults injected into a system under test were
//! exercised by an automatically generated test suite. Evidence comes from the
//! generator's structured run report and from heuristics applied to the
//! generated test files; both feed one deduplicating ledger that the report
//! generator summarizes against the fault catalog.

pub mod core;
pub mod error;
pub mod evidence;
pub mod heuristics;
pub mod report;
pub mod runner;

pub use crate::core::{
    ApiEndpoint, DetectionLedger, DetectionRecord, FaultCatalog, FaultDefinition, ScanConfig,
};

pub use error::{Error, Result};

pub use evidence::{
    CaseCounter, StructuredEvidenceScanner, TestArtifact, TestMethodLocator, TextEvidenceScanner,
};

pub use heuristics::{
    default_heuristics, DirectNameHeuristic, EndpointProximityHeuristic, Heuristic,
    MarkerCorrelationHeuristic,
};

pub use report::{CoverageSummary, FaultReport, ReportFormat, ReportGenerator, ReportMetadata};

pub use runner::{AnalysisSession, AnalysisStats};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
