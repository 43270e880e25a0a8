//! Analysis orchestration
//!
//! A session validates the tests folder, runs the structured and text evidence
//! channels into a single ledger, counts generated test cases and renders the
//! report. Channels run sequentially and a failure in one input file never
//! aborts the run.

pub mod session;

pub use session::{AnalysisSession, AnalysisStats};
