//! A directory of loose files presented as an archive.
//!
//! Game clients read loose files that shadow their MPQ contents, laid out
//! with the same paths. Opening such a directory shows it the way the
//! archive would: host separators become backslashes, and only files are
//! listed.

use std::path::{Path, PathBuf};

use crate::archive::{output_path, ArchiveReader, RawEntry};
use crate::error::{CoreError, CoreResult};
use crate::path;

/// Maximum directory depth walked, to stop symlink loops.
const MAX_DEPTH: usize = 64;

#[derive(Debug, Clone)]
pub struct DirectoryArchive {
    root: PathBuf,
    name: String,
}

impl DirectoryArchive {
    /// Opens the directory at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] if `root` does not exist and
    /// [`CoreError::Archive`] if it is not a directory.
    pub fn open(root: &Path) -> CoreResult<Self> {
        let meta = std::fs::metadata(root).map_err(|e| CoreError::from_io(root, e))?;
        if !meta.is_dir() {
            return Err(CoreError::Archive(format!(
                "not a directory: {}",
                root.display()
            )));
        }
        let name = root
            .file_name()
            .map(|n| crate::nfc_string(&n.to_string_lossy()))
            .unwrap_or_else(|| root.display().to_string());
        Ok(Self {
            root: root.to_path_buf(),
            name,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn walk(&self, dir: &Path, prefix: &str, depth: usize, out: &mut Vec<RawEntry>) -> CoreResult<()> {
        if depth > MAX_DEPTH {
            tracing::warn!(path = %dir.display(), "directory too deep, skipped");
            return Ok(());
        }

        let read_dir = std::fs::read_dir(dir).map_err(|e| CoreError::from_io(dir, e))?;
        let mut children: Vec<_> = read_dir.filter_map(Result::ok).collect();
        children.sort_by_key(|c| c.file_name());

        for child in children {
            let Ok(file_type) = child.file_type() else {
                continue;
            };
            let name = crate::nfc_string(&child.file_name().to_string_lossy());
            let archive_path = path::join(prefix, &name);
            if file_type.is_dir() {
                self.walk(&child.path(), &archive_path, depth + 1, out)?;
            } else if let Ok(meta) = child.metadata() {
                if meta.is_file() {
                    out.push(RawEntry::new(archive_path, meta.len()));
                }
            }
        }
        Ok(())
    }
}

impl ArchiveReader for DirectoryArchive {
    fn name(&self) -> &str {
        &self.name
    }

    fn location(&self) -> Option<&Path> {
        Some(&self.root)
    }

    fn list_entries(&self) -> CoreResult<Vec<RawEntry>> {
        let mut entries = Vec::new();
        self.walk(&self.root, "", 0, &mut entries)?;
        Ok(entries)
    }

    fn extract(&self, path: &str, destination: &Path) -> CoreResult<PathBuf> {
        let src = output_path(&self.root, path)
            .ok_or_else(|| CoreError::Archive(format!("invalid file name: {path}")))?;
        if !src.is_file() {
            return Err(CoreError::Archive(format!("no such file: {path}")));
        }
        let dest = output_path(destination, path)
            .ok_or_else(|| CoreError::Archive(format!("invalid file name: {path}")))?;

        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CoreError::from_io(parent, e))?;
        }
        std::fs::copy(&src, &dest).map_err(|e| CoreError::from_io(&src, e))?;
        Ok(dest)
    }
}
