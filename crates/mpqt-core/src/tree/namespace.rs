//! Directory synthesis over a flat archive listing.
//!
//! Archives store only full file paths. [`Namespace::build`] infers the
//! directories from those paths and indexes every directory's immediate
//! children by its case-folded path. There are no parent or child pointers;
//! everything is a keyed lookup, with `""` as the root.

use std::collections::HashMap;
use std::sync::Arc;

use crate::archive::RawEntry;
use crate::mime::{ClassificationGraph, TypeNode};
use crate::path;
use crate::tree::entry::{Entry, EntryKind};

/// The synthesized directory tree of one opened archive.
///
/// Invariants after [`Namespace::build`]:
///
/// - the root key `""` exists, even for an empty listing;
/// - the parent of every non-root key is itself a key;
/// - each distinct directory appears as exactly one [`EntryKind::Directory`]
///   entry, in its parent's child list.
#[derive(Debug, Clone)]
pub struct Namespace {
    name: String,
    dirs: HashMap<String, Vec<Entry>>,
    graph: Arc<ClassificationGraph>,
}

impl Namespace {
    /// Builds the namespace for `entries`, in any order.
    ///
    /// Directory keys are compared case-insensitively, so `Art\a.blp` and
    /// `ART\b.blp` share one directory; it is displayed as `Art`, the case
    /// of the first path that produced it. A path that is empty or made only
    /// of separators becomes a root-level file named by the raw path.
    pub fn build<I>(name: impl Into<String>, entries: I, graph: Arc<ClassificationGraph>) -> Self
    where
        I: IntoIterator<Item = RawEntry>,
    {
        let name = name.into();
        let mut dirs: HashMap<String, Vec<Entry>> = HashMap::new();
        dirs.insert(String::new(), Vec::new());

        let mut file_count = 0usize;
        for raw in entries {
            file_count += 1;
            let cleaned = path::clean(&raw.path);
            let kind = EntryKind::File { size: raw.size };

            if cleaned.is_empty() {
                let leaf = raw.path.clone();
                dirs.entry(String::new())
                    .or_default()
                    .push(Entry::with_leaf(raw.path, leaf, kind));
                continue;
            }

            let (parent, leaf) = path::split(&cleaned);
            let key = ensure_path(&mut dirs, parent);
            let entry = Entry::with_leaf(raw.path, leaf.to_owned(), kind);
            dirs.entry(key).or_default().push(entry);
        }

        tracing::debug!(
            archive = %name,
            files = file_count,
            directories = dirs.len() - 1,
            "namespace built"
        );

        Self { name, dirs, graph }
    }

    /// The display name of the archive this namespace was built from.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn graph(&self) -> &ClassificationGraph {
        &self.graph
    }

    /// A shared handle to the classification graph.
    pub fn graph_handle(&self) -> Arc<ClassificationGraph> {
        Arc::clone(&self.graph)
    }

    /// Returns `true` if `path` names a directory (the root included).
    pub fn contains(&self, path: &str) -> bool {
        self.dirs.contains_key(&path::fold_key(path))
    }

    /// Immediate children of the directory at `path`.
    pub fn children(&self, path: &str) -> Option<&[Entry]> {
        self.dirs.get(&path::fold_key(path)).map(Vec::as_slice)
    }

    /// Immediate children of the root.
    pub fn root(&self) -> &[Entry] {
        self.children("").unwrap_or_default()
    }

    /// Number of immediate children of the directory at `path`; `0` when
    /// there is no such directory.
    pub fn child_count(&self, path: &str) -> usize {
        self.children(path).map_or(0, <[Entry]>::len)
    }

    /// The numeric size used for ordering: bytes for a file, immediate
    /// child count for a directory.
    pub fn size_key(&self, entry: &Entry) -> u64 {
        match entry.kind() {
            EntryKind::File { size } => size,
            EntryKind::Directory => self.child_count(entry.full_path()) as u64,
        }
    }

    /// The entry's content type, resolved on first request.
    pub fn content_type(&self, entry: &Entry) -> TypeNode<'_> {
        entry.content_type(&self.graph)
    }

    /// Finds the entry at `path` by looking it up in its parent's listing.
    ///
    /// The leaf compares case-insensitively, like directory keys. When a
    /// directory and a file share the name, the directory is returned. A
    /// path that cleans to nothing matches a root-level file by its raw path.
    pub fn find(&self, path: &str) -> Option<&Entry> {
        let cleaned = path::clean(path);
        if cleaned.is_empty() {
            return self
                .root()
                .iter()
                .find(|entry| !path.is_empty() && entry.full_path() == path);
        }
        let (parent, leaf) = path::split(&cleaned);
        let leaf_key = path::fold_key(leaf);
        let mut matches = self
            .children(parent)?
            .iter()
            .filter(|entry| path::fold_key(entry.name()) == leaf_key);
        matches
            .clone()
            .find(|entry| entry.is_dir())
            .or_else(|| matches.next())
    }

    /// Every file beneath the directory at `path`, depth first.
    pub fn files_under(&self, path: &str) -> Vec<&Entry> {
        let mut files = Vec::new();
        self.collect_files(path, &mut files);
        files
    }

    fn collect_files<'a>(&'a self, path: &str, out: &mut Vec<&'a Entry>) {
        for entry in self.children(path).unwrap_or_default() {
            if entry.is_dir() {
                self.collect_files(entry.full_path(), out);
            } else {
                out.push(entry);
            }
        }
    }

    /// All directory keys, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.dirs.keys().map(String::as_str)
    }

    /// Number of synthesized directories, root excluded.
    pub fn directory_count(&self) -> usize {
        self.dirs.len() - 1
    }

    pub fn file_count(&self) -> usize {
        self.files().count()
    }

    /// Sum of all file sizes in bytes.
    pub fn total_size(&self) -> u64 {
        self.files().filter_map(Entry::size).sum()
    }

    fn files(&self) -> impl Iterator<Item = &Entry> {
        self.dirs.values().flatten().filter(|entry| !entry.is_dir())
    }
}

impl PartialEq for Namespace {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.dirs == other.dirs
    }
}

/// Makes sure the directory `path` and all its ancestors exist, parents
/// first, and returns its key.
fn ensure_path(dirs: &mut HashMap<String, Vec<Entry>>, path: &str) -> String {
    let key = path::fold_key(path);
    if !dirs.contains_key(&key) {
        let (parent, _) = path::split(path);
        let parent_key = ensure_path(dirs, parent);
        dirs.insert(key.clone(), Vec::new());
        dirs.entry(parent_key)
            .or_default()
            .push(Entry::directory(path));
    }
    key
}
