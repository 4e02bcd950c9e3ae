//! Batch extraction of a selection.

use std::collections::HashSet;
use std::path::Path;

use crate::archive::ArchiveReader;
use crate::event::Event;
use crate::tree::{Entry, Namespace};

/// One file that could not be extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractFailure {
    pub path: String,
    pub error: String,
}

/// The outcome of [`extract_entries`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    /// Files attempted.
    pub total: usize,
    /// Files written.
    pub extracted: usize,
    pub failures: Vec<ExtractFailure>,
}

impl ExtractSummary {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Expands `selection` into the files it covers.
///
/// Directories contribute every file beneath them. Each file appears once,
/// in first-selected order.
pub fn collect_targets<'a>(namespace: &'a Namespace, selection: &[&'a Entry]) -> Vec<&'a Entry> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut files = Vec::new();
    for entry in selection {
        let expanded = if entry.is_dir() {
            namespace.files_under(entry.full_path())
        } else {
            vec![*entry]
        };
        for file in expanded {
            if seen.insert(file.full_path()) {
                files.push(file);
            }
        }
    }
    files
}

/// Extracts every file covered by `selection` into `destination`.
///
/// `on_event` receives an [`Event::ExtractProgress`] before each file, an
/// [`Event::ExtractFailed`] for each failure and a final
/// [`Event::ExtractFinished`]. A failure does not stop the batch.
pub fn extract_entries<R, F>(
    reader: &R,
    namespace: &Namespace,
    selection: &[&Entry],
    destination: &Path,
    mut on_event: F,
) -> ExtractSummary
where
    R: ArchiveReader + ?Sized,
    F: FnMut(Event),
{
    let targets = collect_targets(namespace, selection);
    let total = targets.len();
    let mut summary = ExtractSummary {
        total,
        ..ExtractSummary::default()
    };

    for (i, file) in targets.iter().enumerate() {
        let path = file.full_path();
        on_event(Event::ExtractProgress {
            index: i + 1,
            total,
            path: path.to_owned(),
        });
        match reader.extract(path, destination) {
            Ok(written) => {
                tracing::debug!(path, written = %written.display(), "extracted");
                summary.extracted += 1;
            }
            Err(e) => {
                tracing::warn!(path, error = %e, "extraction failed");
                on_event(Event::ExtractFailed {
                    path: path.to_owned(),
                    error: e.to_string(),
                });
                summary.failures.push(ExtractFailure {
                    path: path.to_owned(),
                    error: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        archive = reader.name(),
        destination = %destination.display(),
        extracted = summary.extracted,
        total,
        "extraction finished"
    );
    on_event(Event::ExtractFinished {
        extracted: summary.extracted,
        total,
    });
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::InMemoryArchive;
    use crate::mime::ClassificationGraph;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn archive() -> InMemoryArchive {
        InMemoryArchive::new("test.mpq")
            .with_file("Sound\\Music\\intro.mp3", "mp3")
            .with_file("Sound\\Music\\outro.mp3", "mp3!")
            .with_file("Sound\\click.wav", "wav")
            .with_listed("Sound\\Music\\broken.mp3", 9)
            .with_file("readme.txt", "hello")
    }

    fn namespace(archive: &InMemoryArchive) -> Namespace {
        Namespace::build(
            archive.name(),
            archive.list_entries().unwrap(),
            Arc::new(ClassificationGraph::builtin()),
        )
    }

    #[test]
    fn directories_expand_and_deduplicate() {
        let archive = archive();
        let ns = namespace(&archive);
        let sound = ns.find("Sound").unwrap();
        let click = ns.find("Sound\\click.wav").unwrap();

        let targets = collect_targets(&ns, &[click, sound, click]);
        assert_eq!(targets.len(), 4);
        assert_eq!(targets[0].name(), "click.wav");
    }

    #[test]
    fn one_failure_does_not_stop_the_batch() {
        let tmp = TempDir::new().unwrap();
        let archive = archive();
        let ns = namespace(&archive);
        let sound = ns.find("Sound").unwrap();

        let mut events = Vec::new();
        let summary = extract_entries(&archive, &ns, &[sound], tmp.path(), |e| events.push(e));

        assert_eq!(summary.total, 4);
        assert_eq!(summary.extracted, summary.total - 1);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].path, "Sound\\Music\\broken.mp3");
        assert!(!summary.is_complete());

        let progress = events
            .iter()
            .filter(|e| matches!(e, Event::ExtractProgress { .. }))
            .count();
        assert_eq!(progress, 4);
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::ExtractFailed { path, .. } if path == "Sound\\Music\\broken.mp3")));
        assert_eq!(
            events.last(),
            Some(&Event::ExtractFinished {
                extracted: 3,
                total: 4
            })
        );

        assert!(tmp.path().join("Sound").join("Music").join("intro.mp3").exists());
        assert!(tmp.path().join("Sound").join("click.wav").exists());
    }

    #[test]
    fn progress_is_numbered_from_one() {
        let tmp = TempDir::new().unwrap();
        let archive = archive();
        let ns = namespace(&archive);
        let readme = ns.find("readme.txt").unwrap();

        let mut events = Vec::new();
        let summary = extract_entries(&archive, &ns, &[readme], tmp.path(), |e| events.push(e));

        assert!(summary.is_complete());
        assert_eq!(
            events[0],
            Event::ExtractProgress {
                index: 1,
                total: 1,
                path: "readme.txt".to_string()
            }
        );
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("readme.txt")).unwrap(),
            "hello"
        );
    }

    #[test]
    fn empty_selection_finishes_immediately() {
        let tmp = TempDir::new().unwrap();
        let archive = archive();
        let ns = namespace(&archive);

        let mut events = Vec::new();
        let summary = extract_entries(&archive, &ns, &[], tmp.path(), |e| events.push(e));
        assert_eq!(summary, ExtractSummary::default());
        assert_eq!(
            events,
            vec![Event::ExtractFinished {
                extracted: 0,
                total: 0
            }]
        );
    }
}
