//! Fault detection analysis over a generated tests folder
//!
//! Loads the catalog and scan configuration, runs both evidence channels into a
//! single ledger, writes the report to disk and echoes it to the console
//! followed by the final detection rate.

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Args, ValueEnum};
use colored::*;
use std::path::{Path, PathBuf};
use tracing::warn;

use faultscope_scanners::{
    report::{echo_report, write_report},
    AnalysisSession, FaultCatalog, ReportFormat, ScanConfig,
};

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Folder holding the generated tests and the run report
    #[arg(value_name = "TESTS_DIR", default_value = "./generated_tests")]
    pub tests_dir: PathBuf,

    /// Report destination [default: ./fault_detection_report_<timestamp>.log]
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Scan configuration file (JSON or YAML)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Replacement fault catalog (JSON or YAML)
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum OutputFormat {
    Text,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

pub fn execute(args: AnalyzeArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let catalog = load_catalog(args.catalog.as_deref())?;
    let output = args.output.clone().unwrap_or_else(default_output_path);

    let mut session = AnalysisSession::new(&args.tests_dir, catalog, config)?;
    session
        .analyze()
        .with_context(|| format!("Failed to analyze {}", args.tests_dir.display()))?;

    let content = session.render(args.format.into())?;
    write_report(&output, &content)
        .with_context(|| format!("Failed to write report to {}", output.display()))?;

    if let Err(e) = echo_report(&mut std::io::stdout().lock(), &content) {
        warn!("Could not echo report to console: {}", e);
    }

    println!("\n{} {}", "Report saved to:".bright_green(), output.display());

    let summary = session.summary();
    println!("\n{}", "=".repeat(50).bright_blue());
    println!(
        "{}",
        format!(
            "Final Detection Rate: {}/{} ({:.1}%)",
            summary.detected, summary.total, summary.percentage
        )
        .bold()
    );
    println!("{}", "=".repeat(50).bright_blue());

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ScanConfig> {
    let config = match path {
        Some(path) => ScanConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => ScanConfig::default(),
    };
    Ok(config.with_env_overrides())
}

fn load_catalog(path: Option<&Path>) -> Result<FaultCatalog> {
    match path {
        Some(path) => FaultCatalog::from_file(path)
            .with_context(|| format!("Failed to load fault catalog: {}", path.display())),
        None => Ok(FaultCatalog::train_ticket()),
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from(format!(
        "./fault_detection_report_{}.log",
        Local::now().format("%Y%m%d_%H%M%S")
    ))
}
