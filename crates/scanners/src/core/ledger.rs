//! Per-run aggregate of detection records keyed by fault name.
//!
//! `record` is the only way to add evidence and the only place the dedup
//! contract is enforced: under a single fault name no two records share the
//! same `(source, test_method)` pair. Keys iterate in first-discovery order and
//! records in insertion order.

use crate::core::DetectionRecord;
use chrono::Local;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Default)]
pub struct DetectionLedger {
    entries: Vec<(String, Vec<DetectionRecord>)>,
    index: HashMap<String, usize>,
}

impl DetectionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `details` under `fault_name` with a fresh capture timestamp unless
    /// a record with the same source and test method is already there.
    /// Returns whether the record was stored.
    pub fn record(&mut self, fault_name: &str, details: DetectionRecord) -> bool {
        let slot = match self.index.get(fault_name) {
            Some(&slot) => slot,
            None => {
                self.entries.push((fault_name.to_string(), Vec::new()));
                let slot = self.entries.len() - 1;
                self.index.insert(fault_name.to_string(), slot);
                slot
            }
        };

        let records = &mut self.entries[slot].1;
        if records.iter().any(|existing| existing.is_duplicate_of(&details)) {
            return false;
        }

        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        records.push(details.with_timestamp(timestamp));
        true
    }

    pub fn detections(&self, fault_name: &str) -> &[DetectionRecord] {
        self.index
            .get(fault_name)
            .map(|&slot| self.entries[slot].1.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_detected(&self, fault_name: &str) -> bool {
        !self.detections(fault_name).is_empty()
    }

    pub fn detection_count(&self, fault_name: &str) -> usize {
        self.detections(fault_name).len()
    }

    /// Whether any source already attributed `fault_name` to `test_method`.
    pub fn has_test_method(&self, fault_name: &str, test_method: Option<&str>) -> bool {
        self.detections(fault_name)
            .iter()
            .any(|record| record.test_method() == test_method)
    }

    pub fn total_records(&self) -> usize {
        self.entries.iter().map(|(_, records)| records.len()).sum()
    }

    pub fn fault_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[DetectionRecord])> {
        self.entries
            .iter()
            .map(|(name, records)| (name.as_str(), records.as_slice()))
    }

    /// Number of distinct fault names holding at least one record.
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, records)| !records.is_empty())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Serialize for DetectionLedger {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, records) in &self.entries {
            map.serialize_entry(name, records)?;
        }
        map.end()
    }
}
