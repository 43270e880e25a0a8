//! Evidence channels feeding the detection ledger
//!
//! Two scanners populate the same ledger: the structured scanner walks the
//! generator's JSON run report for explicit injected-fault markers, and the text
//! scanner runs the heuristics over every generated test file. The locator maps
//! text offsets back to test cases for both the heuristics and the case counter.

pub mod artifact;
pub mod counter;
pub mod locator;
pub mod structured;
pub mod text;

pub use artifact::{find_test_artifacts, ArtifactContext, TestArtifact};
pub use counter::CaseCounter;
pub use locator::TestMethodLocator;
pub use structured::StructuredEvidenceScanner;
pub use text::{TextEvidenceScanner, TextScanStats};
