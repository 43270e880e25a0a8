use crate::core::{DetectionRecord, ScanConfig};
use crate::error::{Error, Result};
use crate::evidence::TestMethodLocator;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// A generated test file held fully in memory for scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestArtifact {
    name: String,
    test_class: String,
    content: String,
}

impl TestArtifact {
    pub fn new(name: impl Into<String>, content: impl Into<String>, extension: &str) -> Self {
        let name = name.into();
        let suffix = format!(".{}", extension);
        let test_class = name.strip_suffix(&suffix).unwrap_or(&name).to_string();

        Self {
            name,
            test_class,
            content: content.into(),
        }
    }

    pub fn load(path: &Path, config: &ScanConfig) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let name = file_name(path).unwrap_or_default();
        Ok(Self::new(name, content, &config.artifact_extension))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn test_class(&self) -> &str {
        &self.test_class
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// An artifact paired with the locator used to attribute matches in it.
#[derive(Debug, Clone, Copy)]
pub struct ArtifactContext<'a> {
    pub artifact: &'a TestArtifact,
    pub locator: &'a TestMethodLocator,
}

impl<'a> ArtifactContext<'a> {
    pub fn new(artifact: &'a TestArtifact, locator: &'a TestMethodLocator) -> Self {
        Self { artifact, locator }
    }

    pub fn content(&self) -> &'a str {
        self.artifact.content()
    }

    pub fn method_at(&self, offset: usize) -> Option<&'a str> {
        self.locator.locate(self.artifact.content(), offset)
    }

    /// A record attributed to the test case enclosing `offset`.
    pub fn record_at(&self, offset: usize) -> DetectionRecord {
        DetectionRecord::new(self.artifact.name())
            .with_test_class(self.artifact.test_class())
            .with_test_method(self.method_at(offset))
    }
}

pub(crate) fn file_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
}

/// Files directly inside `dir` accepted by `accept`, in file-name order.
pub(crate) fn list_files(dir: &Path, accept: impl Fn(&str) -> bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                if e.depth() == 0 {
                    let source = e
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
                    return Err(Error::io(dir, source));
                }
                warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        if let Some(name) = entry.file_name().to_str() {
            if accept(name) {
                files.push(entry.into_path());
            }
        }
    }

    Ok(files)
}

/// Test artifacts eligible for text-evidence scanning.
pub fn find_test_artifacts(dir: &Path, config: &ScanConfig) -> Result<Vec<PathBuf>> {
    list_files(dir, |name| {
        config.is_artifact_name(name) && !config.is_excluded_artifact(name)
    })
}
