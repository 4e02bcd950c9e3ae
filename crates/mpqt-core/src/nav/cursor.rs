//! The current location within a namespace.

use std::rc::Rc;

use crate::error::{CoreError, CoreResult};
use crate::event::Event;
use crate::nav::history::History;
use crate::path;
use crate::tree::{Entry, Namespace};

/// Tracks which directory of a [`Namespace`] a view is showing.
///
/// The current path is always a namespace key; a failed [`Cursor::set_path`]
/// leaves the cursor where it was. The path is kept in display case, so
/// `set_path("ART")` on a directory first seen as `Art` shows `Art`.
#[derive(Debug, Clone)]
pub struct Cursor {
    namespace: Rc<Namespace>,
    current_path: String,
    history: History,
}

impl Cursor {
    /// Creates a cursor at the root of `namespace`.
    pub fn new(namespace: Rc<Namespace>) -> Self {
        Self {
            namespace,
            current_path: String::new(),
            history: History::new(),
        }
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// A shared handle to the namespace, for borrowing entries across a
    /// mutable call on the cursor.
    pub fn namespace_handle(&self) -> Rc<Namespace> {
        Rc::clone(&self.namespace)
    }

    /// The directory being shown, `""` for the root.
    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    pub fn is_root(&self) -> bool {
        self.current_path.is_empty()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    /// Immediate children of the current directory.
    pub fn current_children(&self) -> &[Entry] {
        self.namespace
            .children(&self.current_path)
            .unwrap_or_default()
    }

    /// Moves to the directory at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::PathNotFound`] if `path` is not a directory of
    /// the namespace. The cursor is not moved.
    pub fn set_path(&mut self, path: &str) -> CoreResult<Event> {
        let display = self.display_path(path)?;
        if path::fold_key(&display) != path::fold_key(&self.current_path) {
            self.history = self.history.push(self.current_path.clone());
        }
        Ok(self.move_to(display))
    }

    /// Moves to the parent directory. Returns `None` at the root.
    pub fn go_up(&mut self) -> Option<Event> {
        if self.is_root() {
            return None;
        }
        let (parent, _) = path::split(&self.current_path);
        let parent = parent.to_owned();
        self.set_path(&parent).ok()
    }

    /// Moves to the root. Returns `None` if already there.
    pub fn go_root(&mut self) -> Option<Event> {
        if self.is_root() {
            return None;
        }
        self.set_path("").ok()
    }

    /// Returns to the previously shown directory. Returns `None` if the
    /// back stack is empty.
    pub fn go_back(&mut self) -> Option<Event> {
        let (history, target) = self.history.go_back(&self.current_path)?;
        let display = self.display_path(&target).ok()?;
        self.history = history;
        Some(self.move_to(display))
    }

    /// Undoes the last [`Cursor::go_back`].
    pub fn go_forward(&mut self) -> Option<Event> {
        let (history, target) = self.history.go_forward(&self.current_path)?;
        let display = self.display_path(&target).ok()?;
        self.history = history;
        Some(self.move_to(display))
    }

    /// Enters a directory entry, or reports a file entry as activated.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::PathNotFound`] if a directory entry does not
    /// belong to this cursor's namespace.
    pub fn activate(&mut self, entry: &Entry) -> CoreResult<Event> {
        if entry.is_dir() {
            self.set_path(entry.full_path())
        } else {
            tracing::debug!(path = entry.full_path(), "file activated");
            Ok(Event::FileActivated {
                path: entry.full_path().to_owned(),
            })
        }
    }

    fn move_to(&mut self, path: String) -> Event {
        tracing::debug!(archive = self.namespace.name(), path = %path, "path changed");
        self.current_path = path;
        Event::PathChanged {
            path: self.current_path.clone(),
        }
    }

    /// The display-case form of the directory at `path`.
    fn display_path(&self, path: &str) -> CoreResult<String> {
        if !self.namespace.contains(path) {
            return Err(CoreError::PathNotFound(path.to_owned()));
        }
        if path.is_empty() {
            return Ok(String::new());
        }
        let (parent, leaf) = path::split(path);
        let leaf_key = path::fold_key(leaf);
        let display = self
            .namespace
            .children(parent)
            .unwrap_or_default()
            .iter()
            .find(|entry| entry.is_dir() && path::fold_key(entry.name()) == leaf_key)
            .map_or(path, Entry::full_path);
        Ok(display.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::RawEntry;
    use crate::mime::ClassificationGraph;
    use std::sync::Arc;

    fn cursor(paths: &[&str]) -> Cursor {
        let entries = paths.iter().map(|p| RawEntry::new(*p, 1));
        let graph = Arc::new(ClassificationGraph::builtin());
        Cursor::new(Rc::new(Namespace::build("test.mpq", entries, graph)))
    }

    #[test]
    fn starts_at_root() {
        let cursor = cursor(&["a\\b.txt"]);
        assert_eq!(cursor.current_path(), "");
        assert!(cursor.is_root());
        assert_eq!(cursor.current_children().len(), 1);
    }

    #[test]
    fn set_path_to_directory() {
        let mut cursor = cursor(&["a\\b\\c.txt"]);
        let event = cursor.set_path("a\\b").unwrap();
        assert_eq!(
            event,
            Event::PathChanged {
                path: "a\\b".to_string()
            }
        );
        assert_eq!(cursor.current_children()[0].name(), "c.txt");
    }

    #[test]
    fn set_path_to_missing_leaves_cursor() {
        let mut cursor = cursor(&["a\\b.txt"]);
        cursor.set_path("a").unwrap();

        let err = cursor.set_path("nope").unwrap_err();
        assert!(matches!(err, CoreError::PathNotFound(p) if p == "nope"));
        assert_eq!(cursor.current_path(), "a");
    }

    #[test]
    fn set_path_to_file_is_not_found() {
        let mut cursor = cursor(&["a\\b.txt"]);
        assert!(cursor.set_path("a\\b.txt").is_err());
    }

    #[test]
    fn set_path_uses_display_case() {
        let mut cursor = cursor(&["Art\\x.blp", "ART\\y.blp"]);
        cursor.set_path("art").unwrap();
        assert_eq!(cursor.current_path(), "Art");
        assert_eq!(cursor.current_children().len(), 2);
    }

    #[test]
    fn go_up_from_nested() {
        let mut cursor = cursor(&["a\\b\\c.txt"]);
        cursor.set_path("a\\b").unwrap();

        let event = cursor.go_up().unwrap();
        assert_eq!(
            event,
            Event::PathChanged {
                path: "a".to_string()
            }
        );
        cursor.go_up().unwrap();
        assert!(cursor.is_root());
    }

    #[test]
    fn go_up_at_root_is_noop() {
        let mut cursor = cursor(&["a\\b.txt"]);
        assert!(cursor.go_up().is_none());
        assert!(cursor.is_root());
    }

    #[test]
    fn go_root_jumps_to_root() {
        let mut cursor = cursor(&["a\\b\\c\\d.txt"]);
        cursor.set_path("a\\b\\c").unwrap();
        assert!(cursor.go_root().is_some());
        assert!(cursor.is_root());
        assert!(cursor.go_root().is_none());
    }

    #[test]
    fn activate_directory_enters_it() {
        let mut cursor = cursor(&["Sound\\Music\\intro.mp3"]);
        let ns = cursor.namespace_handle();
        let dir = &ns.root()[0];

        cursor.activate(dir).unwrap();
        assert_eq!(cursor.current_path(), "Sound");
    }

    #[test]
    fn activate_file_reports_it() {
        let mut cursor = cursor(&["readme.txt"]);
        let ns = cursor.namespace_handle();
        let file = &ns.root()[0];

        let event = cursor.activate(file).unwrap();
        assert_eq!(
            event,
            Event::FileActivated {
                path: "readme.txt".to_string()
            }
        );
        assert!(cursor.is_root());
    }

    #[test]
    fn back_and_forward_restore_paths() {
        let mut cursor = cursor(&["a\\b\\c.txt", "x\\y.txt"]);
        cursor.set_path("a").unwrap();
        cursor.set_path("a\\b").unwrap();

        cursor.go_back().unwrap();
        assert_eq!(cursor.current_path(), "a");
        cursor.go_back().unwrap();
        assert_eq!(cursor.current_path(), "");
        assert!(cursor.go_back().is_none());

        cursor.go_forward().unwrap();
        assert_eq!(cursor.current_path(), "a");

        cursor.set_path("x").unwrap();
        assert!(!cursor.can_go_forward());
        cursor.go_back().unwrap();
        assert_eq!(cursor.current_path(), "a");
    }

    #[test]
    fn go_up_is_recorded_in_history() {
        let mut cursor = cursor(&["a\\b\\c.txt"]);
        cursor.set_path("a\\b").unwrap();
        cursor.go_up().unwrap();

        cursor.go_back().unwrap();
        assert_eq!(cursor.current_path(), "a\\b");
    }

    #[test]
    fn same_path_does_not_grow_history() {
        let mut cursor = cursor(&["a\\b.txt"]);
        cursor.set_path("a").unwrap();
        cursor.set_path("A").unwrap();

        cursor.go_back().unwrap();
        assert!(cursor.is_root());
        assert!(!cursor.can_go_back());
    }
}
