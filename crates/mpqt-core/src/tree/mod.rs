//! The virtual directory tree of an opened archive.
//!
//! [`entry::Entry`] is one row (file or synthetic directory);
//! [`namespace::Namespace`] owns every directory's child list.

pub mod entry;
pub mod namespace;

pub use entry::{Entry, EntryKind};
pub use namespace::Namespace;
