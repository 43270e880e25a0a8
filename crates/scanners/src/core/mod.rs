//! Core data model shared by every evidence channel
//!
//! The fault catalog fixes which defects exist and in what order they are
//! reported. Scanners turn raw matches into `DetectionRecord`s and hand them to
//! the `DetectionLedger`, which is the single aggregation point for a run and the
//! only place duplicates are filtered. `ScanConfig` carries every tunable the
//! heuristics use: file conventions, proximity window, indicator tokens.

pub mod catalog;
pub mod config;
pub mod fault;
pub mod ledger;
pub mod record;

pub use catalog::FaultCatalog;
pub use config::ScanConfig;
pub use fault::{ApiEndpoint, FaultDefinition};
pub use ledger::{DetectionLedger, TIMESTAMP_FORMAT};
pub use record::{excerpt, DetectionRecord, UNKNOWN_TEST_METHOD};
