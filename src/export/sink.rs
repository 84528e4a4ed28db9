//! Destinations for exported debug files.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Write-only store for named output files.
///
/// Writing a name that already exists replaces it.
pub trait OutputSink {
    /// Stores `bytes` under `name` and returns where it went, for logging.
    fn write(&mut self, name: &str, bytes: &[u8]) -> Result<String>;
}

/// Writes files into a directory on disk.
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Creates the directory if needed.
    pub fn create(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl OutputSink for DirectorySink {
    fn write(&mut self, name: &str, bytes: &[u8]) -> Result<String> {
        let path = self.dir.join(name);
        fs::write(&path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path.display().to_string())
    }
}

/// Keeps files in memory, ordered by name.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemorySink {
    files: std::collections::BTreeMap<String, Vec<u8>>,
}

#[cfg(test)]
impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.files.get(name).map(Vec::as_slice)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
impl OutputSink for MemorySink {
    fn write(&mut self, name: &str, bytes: &[u8]) -> Result<String> {
        self.files.insert(name.to_string(), bytes.to_vec());
        Ok(format!("<memory>/{}", name))
    }
}
