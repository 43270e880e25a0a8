//! Rendering of the fault detection report
//!
//! The report is a pure function of the catalog, the ledger and the run
//! metadata. The text layout is fixed-width and meant for humans and diffing;
//! the JSON rendition carries the same summary plus every stored record.

pub mod generator;
pub mod output;
pub mod summary;

pub use generator::{FaultReport, ReportFormat, ReportGenerator, ReportMetadata};
pub use output::{echo_report, to_ascii_lossy, write_report};
pub use summary::{progress_bar, CoverageSummary, PROGRESS_BAR_WIDTH};
