//! A plain text listing of archive paths.
//!
//! Each line holds one path, optionally followed by a tab and the size in
//! bytes. MPQ `(listfile)` dumps use `;` or line breaks between paths and
//! carry no sizes; both forms are accepted. A listing has no file data,
//! so it can be browsed but not extracted.

use std::path::{Path, PathBuf};

use crate::archive::{ArchiveReader, RawEntry};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone)]
pub struct ListfileArchive {
    name: String,
    location: Option<PathBuf>,
    entries: Vec<RawEntry>,
}

impl ListfileArchive {
    /// Reads the listing at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] or [`CoreError::PermissionDenied`]
    /// if the file cannot be read.
    pub fn open(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| CoreError::from_io(path, e))?;
        let name = path
            .file_name()
            .map(|n| crate::nfc_string(&n.to_string_lossy()))
            .unwrap_or_else(|| path.display().to_string());
        let archive = Self::parse(name, &text);
        tracing::debug!(
            path = %path.display(),
            entries = archive.entries.len(),
            "listfile read"
        );
        Ok(Self {
            location: Some(path.to_path_buf()),
            ..archive
        })
    }

    /// Parses listing `text`. Blank records are skipped; a record whose
    /// size does not parse is taken whole as a path of size `0`.
    pub fn parse(name: impl Into<String>, text: &str) -> Self {
        let entries = text
            .split(['\n', ';'])
            .map(|record| record.trim_end_matches('\r'))
            .filter(|record| !record.trim().is_empty())
            .map(parse_record)
            .collect();
        Self {
            name: name.into(),
            location: None,
            entries,
        }
    }
}

fn parse_record(record: &str) -> RawEntry {
    match record.rsplit_once('\t') {
        Some((path, size)) => match size.trim().parse::<u64>() {
            Ok(size) => RawEntry::new(path, size),
            Err(_) => RawEntry::new(record, 0),
        },
        None => RawEntry::new(record, 0),
    }
}

impl ArchiveReader for ListfileArchive {
    fn name(&self) -> &str {
        &self.name
    }

    fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }

    fn list_entries(&self) -> CoreResult<Vec<RawEntry>> {
        Ok(self.entries.clone())
    }

    fn extract(&self, path: &str, _destination: &Path) -> CoreResult<PathBuf> {
        Err(CoreError::Archive(format!(
            "{} is a listing without file data; cannot extract {path}",
            self.name
        )))
    }
}
