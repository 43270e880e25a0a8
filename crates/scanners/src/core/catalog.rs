//! The fixed, ordered registry of injected faults.
//!
//! Catalog order is part of the contract: scanners walk faults in this order and
//! the report lays out every section in it, so two runs over the same inputs
//! produce byte-identical layouts.

use crate::core::FaultDefinition;
use crate::error::{Error, Result};
use std::collections::HashSet;
use std::path::Path;

const TRAIN_TICKET_CATALOG: &str = include_str!("../../catalog/trainticket.json");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaultCatalog {
    faults: Vec<FaultDefinition>,
}

impl FaultCatalog {
    pub fn new(faults: Vec<FaultDefinition>) -> Result<Self> {
        let mut seen = HashSet::new();
        for fault in &faults {
            if fault.fault_name.trim().is_empty() {
                return Err(Error::InvalidCatalog(
                    "fault name must not be empty".to_string(),
                ));
            }
            if !seen.insert(fault.fault_name.as_str()) {
                return Err(Error::InvalidCatalog(format!(
                    "duplicate fault name `{}`",
                    fault.fault_name
                )));
            }
        }

        Ok(Self { faults })
    }

    /// The ten faults injected into the TrainTicket services.
    pub fn train_ticket() -> Self {
        Self::from_json_str(TRAIN_TICKET_CATALOG).expect("embedded catalog is valid")
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let faults: Vec<FaultDefinition> = serde_json::from_str(content)
            .map_err(|e| Error::InvalidCatalog(e.to_string()))?;
        Self::new(faults)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let faults: Vec<FaultDefinition> =
            serde_json::from_str(&content).map_err(|e| Error::parse(path, e))?;
        Self::new(faults)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let faults: Vec<FaultDefinition> =
            serde_yaml::from_str(&content).map_err(|e| Error::parse(path, e))?;
        Self::new(faults)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_json_file(path),
        }
    }

    pub fn faults(&self) -> &[FaultDefinition] {
        &self.faults
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FaultDefinition> {
        self.faults.iter()
    }

    pub fn get(&self, fault_name: &str) -> Option<&FaultDefinition> {
        self.faults.iter().find(|f| f.fault_name == fault_name)
    }

    pub fn contains(&self, fault_name: &str) -> bool {
        self.get(fault_name).is_some()
    }

    pub fn fault_names(&self) -> impl Iterator<Item = &str> {
        self.faults.iter().map(|f| f.fault_name.as_str())
    }

    pub fn len(&self) -> usize {
        self.faults.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faults.is_empty()
    }
}

impl Default for FaultCatalog {
    fn default() -> Self {
        Self::train_ticket()
    }
}

impl<'a> IntoIterator for &'a FaultCatalog {
    type Item = &'a FaultDefinition;
    type IntoIter = std::slice::Iter<'a, FaultDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.faults.iter()
    }
}
