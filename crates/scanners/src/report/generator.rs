use crate::core::{DetectionLedger, DetectionRecord, FaultCatalog, FaultDefinition};
use crate::error::Result;
use crate::report::summary::{progress_bar, CoverageSummary, PROGRESS_BAR_WIDTH};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

const SECTION_RULE_WIDTH: usize = 80;
const TABLE_RULE_WIDTH: usize = 70;

const TRIGGER_SUGGESTIONS: [&str; 3] = [
    "Check if the API endpoint was tested",
    "Verify authentication is working for admin endpoints",
    "Consider increasing test duration",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown report format `{}` (expected text or json)", other)),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMetadata {
    pub experiment: String,
    pub generated_at: String,
    pub test_folder: String,
    pub total_test_cases: usize,
}

/// Everything a report is rendered from.
pub struct FaultReport<'a> {
    pub catalog: &'a FaultCatalog,
    pub ledger: &'a DetectionLedger,
    pub metadata: &'a ReportMetadata,
    pub max_detections_shown: usize,
}

impl<'a> FaultReport<'a> {
    pub fn new(catalog: &'a FaultCatalog, ledger: &'a DetectionLedger, metadata: &'a ReportMetadata) -> Self {
        Self {
            catalog,
            ledger,
            metadata,
            max_detections_shown: 5,
        }
    }

    pub fn with_max_detections_shown(mut self, limit: usize) -> Self {
        self.max_detections_shown = limit;
        self
    }

    pub fn summary(&self) -> CoverageSummary {
        CoverageSummary::from_ledger(self.catalog, self.ledger)
    }
}

#[derive(Serialize)]
struct FaultStatus<'a> {
    fault_name: &'a str,
    service: &'a str,
    api: String,
    description: &'a str,
    detected: bool,
    detection_count: usize,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    metadata: &'a ReportMetadata,
    summary: CoverageSummary,
    faults: Vec<FaultStatus<'a>>,
    detections: &'a DetectionLedger,
}

pub struct ReportGenerator;

impl ReportGenerator {
    pub fn generate(report: &FaultReport<'_>, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Text => Ok(Self::render_text(report)),
            ReportFormat::Json => Self::render_json(report),
        }
    }

    pub fn render_text(report: &FaultReport<'_>) -> String {
        let summary = report.summary();
        let metadata = report.metadata;
        let mut lines: Vec<String> = Vec::new();

        banner(&mut lines, "                    FAULT DETECTION SUMMARY REPORT");
        lines.push(String::new());
        lines.push(format!("Experiment:         {}", metadata.experiment));
        lines.push(format!("Generated:          {}", metadata.generated_at));
        lines.push(format!("Test Folder:        {}", metadata.test_folder));
        lines.push(format!("Total Test Cases:   {}", metadata.total_test_cases));
        lines.push(String::new());

        banner(&mut lines, "FAULT COVERAGE SUMMARY");
        lines.push(String::new());
        lines.push(format!("Total Injected Faults:    {}", summary.total));
        lines.push(format!(
            "Detected Faults:          {} ({:.1}%)",
            summary.detected, summary.percentage
        ));
        lines.push(format!(
            "Undetected Faults:        {} ({:.1}%)",
            summary.undetected,
            summary.undetected_percentage()
        ));
        lines.push(String::new());
        lines.push("Detection Progress:".to_string());
        lines.push(progress_bar(summary.percentage, PROGRESS_BAR_WIDTH));
        lines.push(String::new());

        Self::append_detected(&mut lines, report, &summary);
        Self::append_undetected(&mut lines, report, &summary);
        Self::append_statistics(&mut lines, report, &summary);

        banner(&mut lines, "END OF REPORT");
        lines.join("\n")
    }

    pub fn render_json(report: &FaultReport<'_>) -> Result<String> {
        let faults = report
            .catalog
            .iter()
            .map(|fault| FaultStatus {
                fault_name: &fault.fault_name,
                service: &fault.service,
                api: fault.api_summary(),
                description: &fault.description,
                detected: report.ledger.is_detected(&fault.fault_name),
                detection_count: report.ledger.detection_count(&fault.fault_name),
            })
            .collect();

        let document = JsonReport {
            metadata: report.metadata,
            summary: report.summary(),
            faults,
            detections: report.ledger,
        };

        Ok(serde_json::to_string_pretty(&document)?)
    }

    fn append_detected(lines: &mut Vec<String>, report: &FaultReport<'_>, summary: &CoverageSummary) {
        banner(lines, &format!("DETECTED FAULTS ({})", summary.detected));
        lines.push(String::new());

        let detected = report
            .catalog
            .iter()
            .filter(|fault| report.ledger.is_detected(&fault.fault_name));

        for (number, fault) in detected.enumerate() {
            let detections = report.ledger.detections(&fault.fault_name);
            append_fault_header(lines, number + 1, fault);
            lines.push(format!("   Detections:    {} time(s)", detections.len()));
            lines.push(String::new());

            for (index, record) in detections.iter().take(report.max_detections_shown).enumerate() {
                append_detection(lines, index + 1, record);
            }

            if detections.len() > report.max_detections_shown {
                lines.push(format!(
                    "   ... and {} more detection(s)",
                    detections.len() - report.max_detections_shown
                ));
                lines.push(String::new());
            }

            lines.push("-".repeat(SECTION_RULE_WIDTH));
            lines.push(String::new());
        }

        if summary.detected == 0 {
            lines.push("No faults were detected in this test run.".to_string());
            lines.push(String::new());
        }
    }

    fn append_undetected(lines: &mut Vec<String>, report: &FaultReport<'_>, summary: &CoverageSummary) {
        banner(lines, &format!("UNDETECTED FAULTS ({})", summary.undetected));
        lines.push(String::new());

        let undetected = report
            .catalog
            .iter()
            .filter(|fault| !report.ledger.is_detected(&fault.fault_name));

        for (number, fault) in undetected.enumerate() {
            append_fault_header(lines, number + 1, fault);
            lines.push("   Status:        NOT DETECTED".to_string());
            lines.push(String::new());
            lines.push("   Trigger Conditions:".to_string());
            for suggestion in TRIGGER_SUGGESTIONS {
                lines.push(format!("     - {}", suggestion));
            }
            lines.push(String::new());
            lines.push("-".repeat(SECTION_RULE_WIDTH));
            lines.push(String::new());
        }

        if summary.undetected == 0 {
            lines.push("All injected faults were detected! Excellent coverage.".to_string());
            lines.push(String::new());
        }
    }

    fn append_statistics(lines: &mut Vec<String>, report: &FaultReport<'_>, summary: &CoverageSummary) {
        banner(lines, "DETECTION STATISTICS");
        lines.push(String::new());
        lines.push(format!("{:<45} {:<15} {:<10}", "Fault Name", "Status", "Count"));
        lines.push("-".repeat(TABLE_RULE_WIDTH));

        for fault in report.catalog {
            let count = report.ledger.detection_count(&fault.fault_name);
            let status = if count > 0 { "DETECTED" } else { "NOT DETECTED" };
            lines.push(format!("{:<45} {:<15} {:<10}", fault.fault_name, status, count));
        }

        lines.push("-".repeat(TABLE_RULE_WIDTH));
        lines.push(format!(
            "{:<45} {}/{:<14} {:<10}",
            "TOTAL",
            summary.detected,
            summary.total,
            report.ledger.total_records()
        ));
        lines.push(String::new());
    }
}

fn banner(lines: &mut Vec<String>, title: &str) {
    lines.push("=".repeat(SECTION_RULE_WIDTH));
    lines.push(title.to_string());
    lines.push("=".repeat(SECTION_RULE_WIDTH));
}

fn append_fault_header(lines: &mut Vec<String>, number: usize, fault: &FaultDefinition) {
    lines.push(format!("{}. {}", number, fault.fault_name));
    lines.push(format!("   Service:       {}", fault.service));
    lines.push(format!("   API:           {}", fault.api_summary()));
    lines.push(format!("   Description:   {}", fault.description));
}

fn append_detection(lines: &mut Vec<String>, index: usize, record: &DetectionRecord) {
    lines.push(format!("   Detection #{}:", index));
    if let Some(test_class) = non_empty(&record.test_class) {
        lines.push(format!("     Test Class:  {}", test_class));
    }
    if let Some(test_method) = non_empty(&record.test_method) {
        lines.push(format!("     Test Method: {}", test_method));
    }
    if non_empty(&record.test_class).is_none() && !record.source.is_empty() {
        lines.push(format!("     Source:      {}", record.source));
    }
    if let Some(api_path) = non_empty(&record.api_path) {
        lines.push(format!("     API Path:    {}", api_path));
    }
    if let Some(timestamp) = non_empty(&record.timestamp) {
        lines.push(format!("     Timestamp:   {}", timestamp));
    }
    lines.push(String::new());
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
