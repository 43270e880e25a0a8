//! Resolves which generated test case a text offset belongs to.
//!
//! Tie-break: the definition marker closest to the offset *before* it wins.
//! A marker only counts when it lies entirely inside `text[..offset]`; with no
//! such marker the offset is unattributed and `locate` returns `None`.

use crate::core::ScanConfig;
use crate::error::{Error, Result};
use regex::Regex;

#[derive(Debug, Clone)]
pub struct TestMethodLocator {
    pattern: Regex,
}

impl TestMethodLocator {
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| Error::pattern(pattern, e))?;
        Ok(Self { pattern })
    }

    pub fn from_config(config: &ScanConfig) -> Result<Self> {
        Self::new(&config.test_case_pattern)
    }

    pub fn locate<'t>(&self, text: &'t str, offset: usize) -> Option<&'t str> {
        let prefix = &text[..char_floor(text, offset)];
        self.pattern
            .captures_iter(prefix)
            .last()
            .and_then(|caps| caps.get(1).or_else(|| caps.get(0)))
            .map(|m| m.as_str())
    }

    pub fn methods<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(0)))
            .map(|m| m.as_str())
            .collect()
    }

    pub fn count(&self, text: &str) -> usize {
        self.pattern.find_iter(text).count()
    }
}

impl Default for TestMethodLocator {
    fn default() -> Self {
        Self::from_config(&ScanConfig::default()).expect("default test case pattern is valid")
    }
}

/// Largest char boundary not after `offset`, clamped to the text length.
pub(crate) fn char_floor(text: &str, offset: usize) -> usize {
    let mut end = offset.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    end
}
