//! MPQt core library: UI-agnostic archive browsing logic.
//!
//! Archives store a flat list of files with backslash-delimited paths.
//! `mpqt-core` turns such a listing into a navigable directory tree and
//! classifies its files by content type, without depending on any UI
//! framework.
//!
//! # Modules
//!
//! - [`path`] - Archive path splitting, joining and case folding.
//! - [`mime`] - Content-type table with parent/alias icon fallback.
//! - [`tree`] - Directory synthesis: [`Entry`] and [`Namespace`].
//! - [`nav`] - Cursor, history, sorting, fuzzy filtering and the [`Panel`] row model.
//! - [`archive`] - The [`ArchiveReader`] seam, bundled readers and batch extraction.
//! - [`config`] - User-facing configuration (TOML settings, keymaps).
//! - [`event`] - Command and event types for UI ↔ Core communication.
//! - [`error`] - Unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod action;
pub mod archive;
pub mod config;
pub mod error;
pub mod event;
pub mod format;
pub mod mime;
pub mod nav;
pub mod path;
pub mod tree;

pub use action::{Action, ActionCategory, ActionDescriptor, ActionRegistry};
pub use archive::{
    extract_entries, ArchiveReader, DirectoryArchive, ExtractSummary, InMemoryArchive,
    ListfileArchive, RawEntry,
};
pub use config::keymap::Keymap;
pub use config::settings::Config;
pub use error::{CoreError, CoreResult};
pub use event::{Command, Event};
pub use mime::{ClassificationGraph, IconTheme, MimeTypeDef, TypeNode};
pub use nav::cursor::Cursor;
pub use nav::filter::{fuzzy_filter, FuzzyMatch};
pub use nav::history::History;
pub use nav::panel::{Column, Panel, SortSettings};
pub use nav::sort::{sort_entries, SortDirection, SortKey};
pub use tree::{Entry, EntryKind, Namespace};

/// Normalises a string to NFC (composed) form.
///
/// macOS stores filenames in NFD (decomposed); directory archives re-compose
/// them so they match listings produced elsewhere.
pub fn nfc_string(s: &str) -> String {
    use unicode_normalization::UnicodeNormalization;
    s.nfc().collect()
}
