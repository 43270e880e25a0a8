//! Structured-evidence scanner for the generator's JSON run report.
//!
//! The report is untyped nested data, so it is walked as a closed set of node
//! kinds: mappings and sequences are recursed into, scalars are only inspected
//! as field values of their owning mapping. Two rules fire on every mapping:
//!
//! 1. An explicit marker, `"isInjected": true`, records the node's `faultName`
//!    (or the unknown sentinel) together with its `message`/`details`.
//! 2. Any string field containing a catalog fault name records that fault with
//!    a bounded excerpt of the string.
//!
//! The provenance path (`items[2].message`) is carried for reporting only and
//! never influences matching.

use crate::core::{excerpt, DetectionLedger, DetectionRecord, FaultCatalog, ScanConfig};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, info, warn};

pub const INJECTED_FLAG_KEY: &str = "isInjected";
pub const FAULT_NAME_KEY: &str = "faultName";
pub const MESSAGE_KEY: &str = "message";
pub const DETAILS_KEY: &str = "details";

enum Node<'v> {
    Mapping(&'v Map<String, Value>),
    Sequence(&'v [Value]),
    Scalar,
}

impl<'v> Node<'v> {
    fn of(value: &'v Value) -> Self {
        match value {
            Value::Object(map) => Node::Mapping(map),
            Value::Array(items) => Node::Sequence(items),
            _ => Node::Scalar,
        }
    }
}

pub struct StructuredEvidenceScanner<'a> {
    catalog: &'a FaultCatalog,
    config: &'a ScanConfig,
}

impl<'a> StructuredEvidenceScanner<'a> {
    pub fn new(catalog: &'a FaultCatalog, config: &'a ScanConfig) -> Self {
        Self { catalog, config }
    }

    /// Scans `<dir>/<report_file>` if present. A missing report is not an
    /// error; an unreadable or malformed one is logged and contributes nothing.
    pub fn scan_directory(&self, dir: &Path, ledger: &mut DetectionLedger) -> usize {
        let path = dir.join(&self.config.report_file);
        if !path.is_file() {
            debug!("No structured report at {}, skipping", path.display());
            return 0;
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Error reading {}: {}", self.config.report_file, e);
                return 0;
            }
        };

        let document: Value = match serde_json::from_str(&content) {
            Ok(document) => document,
            Err(e) => {
                warn!("Error reading {}: {}", self.config.report_file, e);
                return 0;
            }
        };

        let stored = self.scan_document(&document, &self.config.report_file, ledger);
        info!(
            "Structured report {} produced {} detection record(s)",
            self.config.report_file, stored
        );
        stored
    }

    pub fn scan_document(&self, document: &Value, source: &str, ledger: &mut DetectionLedger) -> usize {
        let mut stored = 0;
        self.visit(document, "", 0, source, ledger, &mut stored);
        stored
    }

    fn visit(
        &self,
        value: &Value,
        path: &str,
        depth: usize,
        source: &str,
        ledger: &mut DetectionLedger,
        stored: &mut usize,
    ) {
        if depth > self.config.max_structured_depth {
            debug!("Depth limit reached at `{}`, not descending further", path);
            return;
        }

        match Node::of(value) {
            Node::Mapping(map) => self.visit_mapping(map, path, depth, source, ledger, stored),
            Node::Sequence(items) => {
                for (i, item) in items.iter().enumerate() {
                    let item_path = format!("{}[{}]", path, i);
                    self.visit(item, &item_path, depth + 1, source, ledger, stored);
                }
            }
            Node::Scalar => {}
        }
    }

    fn visit_mapping(
        &self,
        map: &Map<String, Value>,
        path: &str,
        depth: usize,
        source: &str,
        ledger: &mut DetectionLedger,
        stored: &mut usize,
    ) {
        if let Some(record) = self.injected_marker(map, path, source) {
            let fault_name = map
                .get(FAULT_NAME_KEY)
                .and_then(Value::as_str)
                .unwrap_or(&self.config.unknown_fault_name);
            if ledger.record(fault_name, record) {
                *stored += 1;
            }
        }

        for (key, value) in map {
            let field_path = join_key(path, key);

            match value {
                Value::String(text) => {
                    for fault in self.catalog {
                        if text.contains(fault.fault_name.as_str()) {
                            let record = DetectionRecord::new(source)
                                .with_location(field_path.as_str())
                                .with_context(excerpt(text, self.config.context_limit));
                            if ledger.record(&fault.fault_name, record) {
                                *stored += 1;
                            }
                        }
                    }
                }
                _ => self.visit(value, &field_path, depth + 1, source, ledger, stored),
            }
        }
    }

    fn injected_marker(
        &self,
        map: &Map<String, Value>,
        path: &str,
        source: &str,
    ) -> Option<DetectionRecord> {
        if map.get(INJECTED_FLAG_KEY) != Some(&Value::Bool(true)) {
            return None;
        }

        Some(
            DetectionRecord::new(source)
                .with_location(path)
                .with_message(map.get(MESSAGE_KEY).and_then(Value::as_str))
                .with_details(map.get(DETAILS_KEY).and_then(Value::as_str)),
        )
    }
}

fn join_key(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}
