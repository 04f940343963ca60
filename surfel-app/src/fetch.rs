//! Dataset text sources.

use crate::errors::FetchError;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Retrieves the full text of a dataset by relative path.
pub trait TextFetcher {
    fn fetch(&self, path: &Path) -> Result<String, FetchError>;
}

/// Reads datasets from a root directory on disk.
#[derive(Debug, Clone)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TextFetcher for FsFetcher {
    fn fetch(&self, path: &Path) -> Result<String, FetchError> {
        let full = self.root.join(path);
        debug!("Reading {}", full.display());
        std::fs::read_to_string(&full).map_err(|source| match source.kind() {
            ErrorKind::NotFound => FetchError::NotFound(full),
            _ => FetchError::Io { path: full, source },
        })
    }
}

/// In-memory dataset store keyed by relative path.
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    files: HashMap<PathBuf, String>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        self.files.insert(path.into(), text.into());
        self
    }
}

impl TextFetcher for MemoryFetcher {
    fn fetch(&self, path: &Path) -> Result<String, FetchError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(path.to_path_buf()))
    }
}
