use crate::core::ScanConfig;
use crate::error::Result;
use crate::evidence::artifact::list_files;
use crate::evidence::TestMethodLocator;
use std::path::Path;
use tracing::debug;

/// Counts generated test cases; independent of fault detection.
pub struct CaseCounter {
    locator: TestMethodLocator,
    config: ScanConfig,
}

impl CaseCounter {
    pub fn new(config: &ScanConfig) -> Result<Self> {
        Ok(Self {
            locator: TestMethodLocator::from_config(config)?,
            config: config.clone(),
        })
    }

    /// Files that cannot be listed or read simply contribute nothing.
    pub fn count_directory(&self, dir: &Path) -> usize {
        let files = match list_files(dir, |name| self.config.is_case_file(name)) {
            Ok(files) => files,
            Err(e) => {
                debug!("Cannot list {}: {}", dir.display(), e);
                return 0;
            }
        };

        files
            .iter()
            .filter_map(|path| match std::fs::read_to_string(path) {
                Ok(content) => Some(self.count_text(&content)),
                Err(e) => {
                    debug!("Not counting {}: {}", path.display(), e);
                    None
                }
            })
            .sum()
    }

    pub fn count_text(&self, content: &str) -> usize {
        self.locator.count(content)
    }
}
