use serde::{Deserialize, Serialize};

pub const UNKNOWN_TEST_METHOD: &str = "unknown";

/// One piece of evidence that an artifact exercised a given fault.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionRecord {
    pub source: String,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub test_class: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub test_method: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub api_path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub context: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub details: Option<String>,

    /// Set by the ledger when the record is stored.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub timestamp: Option<String>,
}

impl DetectionRecord {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }

    pub fn with_test_class(mut self, test_class: impl Into<String>) -> Self {
        self.test_class = Some(test_class.into());
        self
    }

    pub fn with_test_method(mut self, test_method: Option<&str>) -> Self {
        self.test_method = Some(test_method.unwrap_or(UNKNOWN_TEST_METHOD).to_string());
        self
    }

    pub fn with_api_path(mut self, api_path: impl Into<String>) -> Self {
        self.api_path = Some(api_path.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_message(mut self, message: Option<&str>) -> Self {
        self.message = message.map(str::to_string);
        self
    }

    pub fn with_details(mut self, details: Option<&str>) -> Self {
        self.details = details.map(str::to_string);
        self
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    pub fn test_method(&self) -> Option<&str> {
        self.test_method.as_deref()
    }

    /// Records sharing this key under one fault are duplicates.
    pub fn dedup_key(&self) -> (&str, Option<&str>) {
        (self.source.as_str(), self.test_method.as_deref())
    }

    pub fn is_duplicate_of(&self, other: &DetectionRecord) -> bool {
        self.dedup_key() == other.dedup_key()
    }
}

/// First `limit` characters of `value`, cut on a character boundary.
pub fn excerpt(value: &str, limit: usize) -> &str {
    match value.char_indices().nth(limit) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}
