//! The seam between the engine and whatever actually reads archives.
//!
//! An [`ArchiveReader`] lists its files as flat [`RawEntry`] records with
//! backslash-delimited paths, and extracts one file at a time. The engine
//! builds everything else (directories, types, ordering) from the listing.

pub mod directory;
pub mod extract;
pub mod listfile;
pub mod memory;

use std::path::{Component, Path, PathBuf};

use crate::path;

pub use directory::DirectoryArchive;
pub use extract::{collect_targets, extract_entries, ExtractFailure, ExtractSummary};
pub use listfile::ListfileArchive;
pub use memory::InMemoryArchive;

/// One file as the archive lists it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    /// Full archive path, backslash-delimited.
    pub path: String,
    /// Uncompressed size in bytes.
    pub size: u64,
}

impl RawEntry {
    pub fn new(path: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }
}

/// Read access to an opened archive.
pub trait ArchiveReader {
    /// Display name, used for the tab title and the default extraction
    /// directory.
    fn name(&self) -> &str;

    /// Host location the archive was opened from, if any. Used to detect
    /// an archive that is already open.
    fn location(&self) -> Option<&Path> {
        None
    }

    /// Lists every file in the archive.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing cannot be read.
    fn list_entries(&self) -> crate::CoreResult<Vec<RawEntry>>;

    /// Writes the file at archive path `path` below `destination`,
    /// recreating its directories, and returns the written host path.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::Archive`] if the archive has no such
    /// file or cannot produce its data, or an I/O error from writing.
    fn extract(&self, path: &str, destination: &Path) -> crate::CoreResult<PathBuf>;
}

/// The host path an archive file is extracted to.
///
/// Components that could escape `destination` (`..`, roots, drive
/// prefixes, empty names) are dropped. Returns `None` when nothing is left.
pub fn output_path(destination: &Path, archive_path: &str) -> Option<PathBuf> {
    let mut out = destination.to_path_buf();
    let mut pushed = false;
    for component in archive_path.split(path::SEPARATOR) {
        let is_plain = matches!(
            Path::new(component).components().collect::<Vec<_>>().as_slice(),
            [Component::Normal(_)]
        );
        if is_plain && !component.contains('/') {
            out.push(component);
            pushed = true;
        }
    }
    pushed.then_some(out)
}
