//! Event system for communication between UI and Core.
//!
//! The UI translates user input into [`Command`]s and applies them to the
//! engine; the engine answers with [`Event`]s. Nothing here keeps global
//! state: whoever shows a status line subscribes to the events.

use std::path::PathBuf;

use crate::nav::sort::{SortDirection, SortKey};

/// An action the UI requests the core to perform.
///
/// Commands flow **UI → Core**. The core never creates commands itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Navigate to the directory at the given archive path.
    SetPath(String),
    /// Move to the parent directory.
    GoUp,
    /// Move to the archive root.
    GoRoot,
    /// Navigate backward in history.
    GoBack,
    /// Navigate forward in history.
    GoForward,
    /// Move the cursor up by one row.
    CursorUp,
    /// Move the cursor down by one row.
    CursorDown,
    /// Activate the selected row (enter a directory or open a file).
    Activate,
    /// Change the sort key and direction.
    SetSort(SortKey, SortDirection),
    /// Extract the listed archive paths (files or directories) into the
    /// destination directory.
    Extract(Vec<String>, PathBuf),
}

/// A notification the core sends back to the UI.
///
/// Events flow **Core → UI**.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The cursor moved to a new directory.
    PathChanged {
        /// The archive path now displayed, `""` for the root.
        path: String,
    },
    /// A file row was activated. The engine does nothing else with it; the
    /// caller forwards it to the archive reader.
    FileActivated {
        /// Full archive path of the file.
        path: String,
    },
    /// One file of a batch extraction is about to be written.
    ExtractProgress {
        /// 1-based position within the batch.
        index: usize,
        /// Number of files in the batch.
        total: usize,
        /// Archive path of the file.
        path: String,
    },
    /// One file of a batch extraction failed; the batch continues.
    ExtractFailed {
        path: String,
        error: String,
    },
    /// A batch extraction finished.
    ExtractFinished {
        /// Files written successfully.
        extracted: usize,
        /// Files attempted.
        total: usize,
    },
}

impl Event {
    /// A one-line description for a status bar.
    pub fn status_text(&self) -> String {
        match self {
            Self::PathChanged { path } => crate::path::to_location(path),
            Self::FileActivated { path } => format!("Selected {path}"),
            Self::ExtractProgress { index, total, path } => {
                format!("Extracting {path}... ({index}/{total})")
            }
            Self::ExtractFailed { path, error } => format!("Could not extract {path}: {error}"),
            Self::ExtractFinished { extracted, total } if extracted == total => {
                format!("Extracted {extracted} files")
            }
            Self::ExtractFinished { extracted, total } => {
                format!("Extracted {extracted} of {total} files")
            }
        }
    }
}
