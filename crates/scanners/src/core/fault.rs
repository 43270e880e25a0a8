use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^/{}]*\}").expect("placeholder pattern is valid"));

/// Any run of characters that cannot close a quoted string literal.
const PLACEHOLDER_PATTERN: &str = r#"[^"']+"#;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApiEndpoint {
    pub method: String,
    pub path: String,
}

impl ApiEndpoint {
    pub fn parse(descriptor: &str) -> Result<Self> {
        let (method, path) = descriptor
            .trim()
            .split_once(' ')
            .ok_or_else(|| Error::InvalidApiDescriptor(descriptor.to_string()))?;

        let method = method.trim();
        let path = path.trim();
        if method.is_empty() || path.is_empty() {
            return Err(Error::InvalidApiDescriptor(descriptor.to_string()));
        }

        Ok(Self {
            method: method.to_string(),
            path: path.to_string(),
        })
    }

    pub fn has_placeholder(&self) -> bool {
        PLACEHOLDER.is_match(&self.path)
    }

    /// Regex source matching the path literally, with every `{name}` segment
    /// widened so a templated path matches any concrete instantiation.
    pub fn path_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.path.len() + 16);
        let mut last = 0;

        for placeholder in PLACEHOLDER.find_iter(&self.path) {
            pattern.push_str(&regex::escape(&self.path[last..placeholder.start()]));
            pattern.push_str(PLACEHOLDER_PATTERN);
            last = placeholder.end();
        }
        pattern.push_str(&regex::escape(&self.path[last..]));

        pattern
    }

    pub fn path_regex(&self) -> Result<Regex> {
        let pattern = self.path_pattern();
        Regex::new(&pattern).map_err(|e| Error::pattern(&pattern, e))
    }
}

impl fmt::Display for ApiEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

impl TryFrom<String> for ApiEndpoint {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<ApiEndpoint> for String {
    fn from(endpoint: ApiEndpoint) -> Self {
        endpoint.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaultDefinition {
    pub fault_name: String,

    pub service: String,

    pub api: Vec<ApiEndpoint>,

    pub description: String,
}

impl FaultDefinition {
    pub fn new(fault_name: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            fault_name: fault_name.into(),
            service: service.into(),
            api: Vec::new(),
            description: String::new(),
        }
    }

    pub fn with_api(mut self, descriptor: &str) -> Result<Self> {
        self.api.push(ApiEndpoint::parse(descriptor)?);
        Ok(self)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn api_summary(&self) -> String {
        self.api
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
