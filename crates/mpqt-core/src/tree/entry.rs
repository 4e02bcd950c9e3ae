//! Namespace entry representation.

use std::cell::OnceCell;

use crate::mime::{ClassificationGraph, MimeId, TypeNode};
use crate::path;

/// Whether an entry is a real archive file or a synthesized directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A file listed by the archive, with its size in bytes.
    File { size: u64 },
    /// A directory inferred from path structure. Its size is not stored;
    /// ask the namespace for its child count.
    Directory,
}

/// A single row of the namespace: a file or a synthetic directory.
///
/// Entries are immutable except for the content type, which is resolved on
/// first request and cached for the entry's lifetime.
#[derive(Debug, Clone)]
pub struct Entry {
    full_path: String,
    leaf_name: String,
    kind: EntryKind,
    content_type: OnceCell<MimeId>,
}

impl Entry {
    /// Creates a file entry; the leaf name is the last path component.
    pub fn file(full_path: impl Into<String>, size: u64) -> Self {
        let full_path = full_path.into();
        let leaf_name = path::split(&full_path).1.to_owned();
        Self::with_leaf(full_path, leaf_name, EntryKind::File { size })
    }

    /// Creates a synthetic directory entry for `full_path`.
    pub fn directory(full_path: impl Into<String>) -> Self {
        let full_path = full_path.into();
        let leaf_name = path::split(&full_path).1.to_owned();
        Self::with_leaf(full_path, leaf_name, EntryKind::Directory)
    }

    pub(crate) fn with_leaf(full_path: String, leaf_name: String, kind: EntryKind) -> Self {
        Self {
            full_path,
            leaf_name,
            kind,
            content_type: OnceCell::new(),
        }
    }

    /// The full archive path, in the case the archive (or the first path
    /// naming this directory) used.
    pub fn full_path(&self) -> &str {
        &self.full_path
    }

    /// The final path component.
    pub fn name(&self) -> &str {
        &self.leaf_name
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.kind, EntryKind::Directory)
    }

    /// File size in bytes; `None` for directories.
    pub fn size(&self) -> Option<u64> {
        match self.kind {
            EntryKind::File { size } => Some(size),
            EntryKind::Directory => None,
        }
    }

    /// Returns `true` once the content type has been resolved.
    pub fn is_type_resolved(&self) -> bool {
        self.content_type.get().is_some()
    }

    /// Resolves the content type against `graph`, at most once.
    ///
    /// The cached id is only meaningful for the graph it came from, which is
    /// why callers go through [`crate::tree::Namespace::content_type`].
    pub(crate) fn content_type<'g>(&self, graph: &'g ClassificationGraph) -> TypeNode<'g> {
        let id = *self.content_type.get_or_init(|| match self.kind {
            EntryKind::Directory => graph.directory_type().id(),
            EntryKind::File { .. } => graph.resolve(&self.leaf_name).id(),
        });
        graph.by_id(id)
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.full_path == other.full_path
            && self.leaf_name == other.leaf_name
            && self.kind == other.kind
    }
}

impl Eq for Entry {}
