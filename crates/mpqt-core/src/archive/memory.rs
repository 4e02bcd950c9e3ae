//! An archive held entirely in memory.

use std::path::{Path, PathBuf};

use crate::archive::{output_path, ArchiveReader, RawEntry};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone)]
struct MemoryFile {
    path: String,
    size: u64,
    data: Option<Vec<u8>>,
}

/// A list of files with optional contents.
///
/// Files added with [`InMemoryArchive::with_listed`] appear in the listing
/// but have no data, so extracting them fails the way a damaged archive
/// entry would.
#[derive(Debug, Clone, Default)]
pub struct InMemoryArchive {
    name: String,
    files: Vec<MemoryFile>,
}

impl InMemoryArchive {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: Vec::new(),
        }
    }

    /// Adds a file with contents; its size is the data length.
    pub fn with_file(mut self, path: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        let data = data.into();
        self.files.push(MemoryFile {
            path: path.into(),
            size: data.len() as u64,
            data: Some(data),
        });
        self
    }

    /// Adds a listed file of `size` bytes without contents.
    pub fn with_listed(mut self, path: impl Into<String>, size: u64) -> Self {
        self.files.push(MemoryFile {
            path: path.into(),
            size,
            data: None,
        });
        self
    }

    fn file(&self, path: &str) -> Option<&MemoryFile> {
        self.files.iter().find(|f| f.path == path)
    }
}

impl ArchiveReader for InMemoryArchive {
    fn name(&self) -> &str {
        &self.name
    }

    fn list_entries(&self) -> CoreResult<Vec<RawEntry>> {
        Ok(self
            .files
            .iter()
            .map(|f| RawEntry::new(f.path.clone(), f.size))
            .collect())
    }

    fn extract(&self, path: &str, destination: &Path) -> CoreResult<PathBuf> {
        let file = self
            .file(path)
            .ok_or_else(|| CoreError::Archive(format!("no such file: {path}")))?;
        let data = file
            .data
            .as_ref()
            .ok_or_else(|| CoreError::Archive(format!("no data for {path}")))?;
        let out = output_path(destination, path)
            .ok_or_else(|| CoreError::Archive(format!("invalid file name: {path}")))?;

        if let Some(parent) = out.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CoreError::from_io(parent, e))?;
        }
        std::fs::write(&out, data).map_err(|e| CoreError::from_io(&out, e))?;
        Ok(out)
    }
}
