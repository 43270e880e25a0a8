use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File name of the structured run report inside the tests folder.
    pub report_file: String,

    pub artifact_extension: String,

    pub excluded_artifacts: Vec<String>,

    pub excluded_prefixes: Vec<String>,

    /// Only files starting with this prefix contribute to the case count.
    pub case_file_prefix: String,

    /// Capture group 1 must yield the test-case identifier.
    pub test_case_pattern: String,

    /// Characters inspected on each side of an endpoint occurrence.
    pub proximity_window: usize,

    pub proximity_indicators: Vec<String>,

    pub match_fault_name_in_window: bool,

    pub context_limit: usize,

    pub max_structured_depth: usize,

    pub unknown_fault_name: String,

    pub max_detections_shown: usize,

    pub experiment_prefix: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            report_file: "report.json".to_string(),
            artifact_extension: "py".to_string(),
            excluded_artifacts: vec!["em_test_utils.py".to_string()],
            excluded_prefixes: vec!["__".to_string()],
            case_file_prefix: "EvoMaster_".to_string(),
            test_case_pattern: r"def (test_\w+)\(self\):".to_string(),
            proximity_window: 500,
            proximity_indicators: vec![
                "400".to_string(),
                "status\": 0".to_string(),
                "isInjected".to_string(),
            ],
            match_fault_name_in_window: true,
            context_limit: 200,
            max_structured_depth: 128,
            unknown_fault_name: "UNKNOWN".to_string(),
            max_detections_shown: 5,
            experiment_prefix: "trainticket_evomaster".to_string(),
        }
    }
}

impl ScanConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| Error::parse(path, e))
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        serde_yaml::from_str(&content).map_err(|e| Error::parse(path, e))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_json_file(path),
        }
    }

    /// Applies `FAULTSCOPE_*` environment overrides on top of `self`.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(window) = std::env::var("FAULTSCOPE_PROXIMITY_WINDOW") {
            if let Ok(w) = window.trim().parse::<usize>() {
                self.proximity_window = w;
            }
        }

        if let Ok(indicators) = std::env::var("FAULTSCOPE_INDICATORS") {
            self.proximity_indicators = indicators
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Ok(prefix) = std::env::var("FAULTSCOPE_CASE_PREFIX") {
            self.case_file_prefix = prefix;
        }

        self
    }

    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    pub fn is_artifact_name(&self, file_name: &str) -> bool {
        Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == self.artifact_extension)
    }

    pub fn is_excluded_artifact(&self, file_name: &str) -> bool {
        self.excluded_artifacts.iter().any(|name| name == file_name)
            || self
                .excluded_prefixes
                .iter()
                .any(|prefix| file_name.starts_with(prefix.as_str()))
    }

    pub fn is_case_file(&self, file_name: &str) -> bool {
        file_name.starts_with(self.case_file_prefix.as_str()) && self.is_artifact_name(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScanConfig::default();
        assert_eq!(config.proximity_window, 500);
        assert_eq!(config.context_limit, 200);
        assert_eq!(config.max_detections_shown, 5);
        assert_eq!(config.proximity_indicators.len(), 3);
    }

    #[test]
    fn test_artifact_filters() {
        let config = ScanConfig::default();
        assert!(config.is_artifact_name("EvoMaster_successes_Test.py"));
        assert!(!config.is_artifact_name("report.json"));

        assert!(config.is_excluded_artifact("em_test_utils.py"));
        assert!(config.is_excluded_artifact("__init__.py"));
        assert!(!config.is_excluded_artifact("EvoMaster_faults_Test.py"));

        assert!(config.is_case_file("EvoMaster_faults_Test.py"));
        assert!(!config.is_case_file("custom_Test.py"));
        assert!(!config.is_case_file("EvoMaster_notes.txt"));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.json");
        std::fs::write(&path, r#"{"proximity_window": 120, "proximity_indicators": ["500"]}"#)
            .unwrap();

        let config = ScanConfig::from_file(&path).unwrap();
        assert_eq!(config.proximity_window, 120);
        assert_eq!(config.proximity_indicators, vec!["500".to_string()]);
        assert_eq!(config.report_file, "report.json");
    }

    #[test]
    fn test_yaml_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.yml");
        std::fs::write(&path, "case_file_prefix: Generated_\nmax_detections_shown: 2\n").unwrap();

        let config = ScanConfig::from_file(&path).unwrap();
        assert_eq!(config.case_file_prefix, "Generated_");
        assert_eq!(config.max_detections_shown, 2);
    }

    #[test]
    fn test_malformed_config_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            ScanConfig::from_file(&path),
            Err(Error::Parse { .. })
        ));
    }
}
