//! Per-view row model over a [`Cursor`].
//!
//! A [`Panel`] owns the cursor of one view together with its sort settings,
//! the ordered (and optionally filtered) rows of the current directory, the
//! selected row and a set of marked entries. Frontends read rows and cells
//! from it and never sort or classify anything themselves.

use std::collections::{BTreeSet, HashSet};
use std::rc::Rc;

use crate::error::CoreResult;
use crate::event::Event;
use crate::format;
use crate::mime::IconTheme;
use crate::nav::cursor::Cursor;
use crate::nav::filter::fuzzy_filter;
use crate::nav::sort::{sort_indices, SortDirection, SortKey};
use crate::path;
use crate::tree::{Entry, EntryKind, Namespace};

/// The columns a listing shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Name,
    Size,
    Type,
}

impl Column {
    pub const ALL: [Column; 3] = [Column::Name, Column::Size, Column::Type];

    pub fn title(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Size => "Size",
            Self::Type => "Type",
        }
    }

    /// The sort key a click on this column's header selects.
    pub fn sort_key(self) -> SortKey {
        match self {
            Self::Name => SortKey::Name,
            Self::Size => SortKey::Size,
            Self::Type => SortKey::Type,
        }
    }
}

/// How a panel orders its rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSettings {
    pub key: SortKey,
    pub direction: SortDirection,
    /// Group directories before files.
    pub dirs_first: bool,
}

/// One view's listing of an archive.
///
/// Selection changes consume `self` and return the updated panel;
/// navigation borrows `self` and returns a new panel, so a failed move
/// leaves the original untouched.
#[derive(Debug, Clone)]
pub struct Panel {
    cursor: Cursor,
    sort: SortSettings,
    rows: Vec<usize>,
    selected_index: usize,
    filter: String,
    marked: BTreeSet<String>,
}

impl Panel {
    /// Creates a panel showing the root of `namespace`.
    pub fn new(namespace: Rc<Namespace>, sort: SortSettings) -> Self {
        Self::from_cursor(Cursor::new(namespace), sort)
    }

    fn from_cursor(cursor: Cursor, sort: SortSettings) -> Self {
        let rows = compute_rows(&cursor, sort, "");
        Self {
            cursor,
            sort,
            rows,
            selected_index: 0,
            filter: String::new(),
            marked: BTreeSet::new(),
        }
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn namespace(&self) -> &Namespace {
        self.cursor.namespace()
    }

    pub fn current_path(&self) -> &str {
        self.cursor.current_path()
    }

    pub fn sort(&self) -> SortSettings {
        self.sort
    }

    /// The active filter query, empty when unfiltered.
    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The entry shown at `row`.
    pub fn entry(&self, row: usize) -> Option<&Entry> {
        let index = *self.rows.get(row)?;
        self.cursor.current_children().get(index)
    }

    /// All rows, in display order.
    pub fn rows(&self) -> impl Iterator<Item = &Entry> {
        let children = self.cursor.current_children();
        self.rows.iter().filter_map(move |&i| children.get(i))
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.entry(self.selected_index)
    }

    /// The text of one cell: the leaf name, the size label (`"N items"` for
    /// a directory) or the content-type comment.
    pub fn cell(&self, row: usize, column: Column) -> Option<String> {
        let entry = self.entry(row)?;
        Some(match column {
            Column::Name => entry.name().to_owned(),
            Column::Size => self.size_label(entry),
            Column::Type => self.namespace().content_type(entry).comment().to_owned(),
        })
    }

    /// The icon name for `row` in `theme`.
    pub fn icon<T: IconTheme + ?Sized>(&self, row: usize, theme: &T) -> Option<String> {
        let entry = self.entry(row)?;
        Some(self.namespace().content_type(entry).icon_for(theme))
    }

    pub fn size_label(&self, entry: &Entry) -> String {
        match entry.kind() {
            EntryKind::File { size } => format::human_size(size),
            EntryKind::Directory => format::item_count(self.namespace().size_key(entry) as usize),
        }
    }

    // --- selection ---

    /// Moves the selection to `index`, clamped to bounds.
    pub fn with_selection(self, index: usize) -> Self {
        let clamped = if self.rows.is_empty() {
            0
        } else {
            index.min(self.rows.len() - 1)
        };
        Self {
            selected_index: clamped,
            ..self
        }
    }

    /// Moves the selection up by one. No-op at the top.
    pub fn move_up(self) -> Self {
        let index = self.selected_index.saturating_sub(1);
        self.with_selection(index)
    }

    /// Moves the selection down by one. No-op at the bottom.
    pub fn move_down(self) -> Self {
        let index = self.selected_index + 1;
        self.with_selection(index)
    }

    pub fn go_to_first(self) -> Self {
        self.with_selection(0)
    }

    pub fn go_to_last(self) -> Self {
        let last = self.rows.len().saturating_sub(1);
        self.with_selection(last)
    }

    // --- marks ---

    /// Marks or unmarks the selected entry and moves the selection down.
    pub fn toggle_mark(self) -> Self {
        let Some(path) = self.selected_entry().map(|e| e.full_path().to_owned()) else {
            return self;
        };
        let mut marked = self.marked.clone();
        if !marked.remove(&path) {
            marked.insert(path);
        }
        Self { marked, ..self }.move_down()
    }

    pub fn clear_marks(self) -> Self {
        Self {
            marked: BTreeSet::new(),
            ..self
        }
    }

    pub fn is_marked(&self, entry: &Entry) -> bool {
        self.marked.contains(entry.full_path())
    }

    pub fn marked_count(&self) -> usize {
        self.marked.len()
    }

    /// The entries an operation applies to: the marked ones if any,
    /// otherwise the selected one.
    pub fn target_entries(&self) -> Vec<&Entry> {
        if self.marked.is_empty() {
            return self.selected_entry().into_iter().collect();
        }
        self.rows().filter(|e| self.is_marked(e)).collect()
    }

    // --- ordering and filtering ---

    /// Re-sorts the rows, keeping the selected entry selected.
    pub fn with_sort(self, sort: SortSettings) -> Self {
        let selected = self.rows.get(self.selected_index).copied();
        let rows = compute_rows(&self.cursor, sort, &self.filter);
        let selected_index = selected
            .and_then(|old| rows.iter().position(|&i| i == old))
            .unwrap_or(0);
        Self {
            sort,
            rows,
            selected_index,
            ..self
        }
    }

    /// Header-click behavior: the active key flips direction, another key
    /// becomes active in ascending order.
    pub fn with_sort_key(self, key: SortKey) -> Self {
        let sort = if self.sort.key == key {
            SortSettings {
                direction: self.sort.direction.toggle(),
                ..self.sort
            }
        } else {
            SortSettings {
                key,
                direction: SortDirection::Ascending,
                ..self.sort
            }
        };
        self.with_sort(sort)
    }

    /// Cycles to the next sort key, keeping the direction.
    pub fn with_next_sort(self) -> Self {
        let sort = SortSettings {
            key: self.sort.key.next(),
            ..self.sort
        };
        self.with_sort(sort)
    }

    pub fn with_toggled_direction(self) -> Self {
        let sort = SortSettings {
            direction: self.sort.direction.toggle(),
            ..self.sort
        };
        self.with_sort(sort)
    }

    /// Shows only rows whose leaf name fuzzily matches `query`, in sort
    /// order. An empty query shows everything.
    pub fn with_filter(self, query: &str) -> Self {
        let rows = compute_rows(&self.cursor, self.sort, query);
        Self {
            rows,
            filter: query.to_owned(),
            selected_index: 0,
            ..self
        }
    }

    // --- navigation ---

    /// Shows the directory at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::PathNotFound`] if `path` is not a
    /// directory of the archive.
    pub fn navigate_to(&self, path: &str) -> CoreResult<(Self, Event)> {
        let mut cursor = self.cursor.clone();
        let event = cursor.set_path(path)?;
        Ok((Self::from_cursor(cursor, self.sort), event))
    }

    /// Shows the parent directory with the directory just left selected.
    pub fn go_up(&self) -> Option<(Self, Event)> {
        let left = path::fold_key(self.current_path());
        let mut cursor = self.cursor.clone();
        let event = cursor.go_up()?;
        let panel = Self::from_cursor(cursor, self.sort);
        let row = panel
            .rows()
            .position(|e| e.is_dir() && path::fold_key(e.full_path()) == left)
            .unwrap_or(0);
        Some((panel.with_selection(row), event))
    }

    pub fn go_root(&self) -> Option<(Self, Event)> {
        self.moved(Cursor::go_root)
    }

    pub fn go_back(&self) -> Option<(Self, Event)> {
        self.moved(Cursor::go_back)
    }

    pub fn go_forward(&self) -> Option<(Self, Event)> {
        self.moved(Cursor::go_forward)
    }

    /// Activates the selected row: enters a directory, or reports a file.
    ///
    /// Returns `Ok(None)` when nothing is selected.
    ///
    /// # Errors
    ///
    /// Propagates [`Cursor::activate`] failures.
    pub fn activate_selected(&self) -> CoreResult<Option<(Self, Event)>> {
        let namespace = self.cursor.namespace_handle();
        let Some(entry) = self
            .rows
            .get(self.selected_index)
            .and_then(|&i| namespace.children(self.current_path())?.get(i))
        else {
            return Ok(None);
        };
        let mut cursor = self.cursor.clone();
        let event = cursor.activate(entry)?;
        let panel = if entry.is_dir() {
            Self::from_cursor(cursor, self.sort)
        } else {
            self.clone()
        };
        Ok(Some((panel, event)))
    }

    fn moved(&self, step: impl FnOnce(&mut Cursor) -> Option<Event>) -> Option<(Self, Event)> {
        let mut cursor = self.cursor.clone();
        let event = step(&mut cursor)?;
        Some((Self::from_cursor(cursor, self.sort), event))
    }
}

fn compute_rows(cursor: &Cursor, sort: SortSettings, filter: &str) -> Vec<usize> {
    let children = cursor.current_children();
    let order = sort_indices(
        cursor.namespace(),
        children,
        sort.key,
        sort.direction,
        sort.dirs_first,
    );
    if filter.is_empty() {
        return order;
    }
    let matched: HashSet<usize> = fuzzy_filter(children, filter)
        .iter()
        .map(|m| m.index())
        .collect();
    order.into_iter().filter(|i| matched.contains(i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::RawEntry;
    use crate::mime::ClassificationGraph;
    use std::sync::Arc;

    fn panel(entries: &[(&str, u64)]) -> Panel {
        let ns = Namespace::build(
            "test.mpq",
            entries.iter().map(|(p, s)| RawEntry::new(*p, *s)),
            Arc::new(ClassificationGraph::builtin()),
        );
        Panel::new(Rc::new(ns), SortSettings::default())
    }

    fn names(panel: &Panel) -> Vec<String> {
        panel.rows().map(|e| e.name().to_owned()).collect()
    }

    fn sample() -> Panel {
        panel(&[
            ("World\\Maps\\Azeroth.wdt", 4096),
            ("World\\Maps\\Kalimdor.wdt", 2048),
            ("World\\readme.txt", 10),
            ("Sound\\intro.mp3", 1536),
            ("(listfile)", 100),
        ])
    }

    #[test]
    fn new_panel_lists_root_sorted_by_name() {
        let panel = sample();
        assert_eq!(panel.current_path(), "");
        assert_eq!(names(&panel), vec!["(listfile)", "Sound", "World"]);
        assert_eq!(panel.selected_index(), 0);
    }

    #[test]
    fn cells_render_name_size_and_type() {
        let panel = sample().navigate_to("World").unwrap().0;
        // Maps, readme.txt
        assert_eq!(panel.cell(0, Column::Name).unwrap(), "Maps");
        assert_eq!(panel.cell(0, Column::Size).unwrap(), "2 items");
        assert_eq!(panel.cell(0, Column::Type).unwrap(), "folder");
        assert_eq!(panel.cell(1, Column::Size).unwrap(), "10 B");
        assert_eq!(panel.cell(1, Column::Type).unwrap(), "plain text document");
        assert!(panel.cell(2, Column::Name).is_none());
    }

    #[test]
    fn single_child_reads_one_item() {
        let panel = sample();
        let sound = panel.rows().position(|e| e.name() == "Sound").unwrap();
        assert_eq!(panel.cell(sound, Column::Size).unwrap(), "1 item");
    }

    #[test]
    fn file_size_is_human_readable() {
        let panel = sample().navigate_to("Sound").unwrap().0;
        assert_eq!(panel.cell(0, Column::Size).unwrap(), "1.5 KiB");
    }

    #[test]
    fn icon_uses_theme_chain() {
        let panel = sample();
        let theme: &[&str] = &["folder", "text-x-generic"];
        let world = panel.rows().position(|e| e.name() == "World").unwrap();
        assert_eq!(panel.icon(world, theme).unwrap(), "folder");
        // "(listfile)" has no extension
        assert_eq!(panel.icon(0, theme).unwrap(), "application-octet-stream");
    }

    #[test]
    fn selection_moves_and_clamps() {
        let panel = sample().move_down().move_down().move_down();
        assert_eq!(panel.selected_index(), 2);
        let panel = panel.move_up();
        assert_eq!(panel.selected_index(), 1);
        let panel = panel.go_to_first().move_up();
        assert_eq!(panel.selected_index(), 0);
        let panel = panel.go_to_last();
        assert_eq!(panel.selected_entry().unwrap().name(), "World");
        let panel = panel.with_selection(99);
        assert_eq!(panel.selected_index(), 2);
    }

    #[test]
    fn empty_panel_has_no_selection() {
        let panel = panel(&[]).move_down().go_to_last();
        assert_eq!(panel.row_count(), 0);
        assert_eq!(panel.selected_index(), 0);
        assert!(panel.selected_entry().is_none());
        assert!(panel.activate_selected().unwrap().is_none());
    }

    #[test]
    fn navigate_to_missing_keeps_panel() {
        let panel = sample().with_selection(2);
        assert!(panel.navigate_to("Nope").is_err());
        assert_eq!(panel.current_path(), "");
        assert_eq!(panel.selected_index(), 2);
    }

    #[test]
    fn activate_directory_enters_it() {
        let panel = sample().with_selection(2);
        let (panel, event) = panel.activate_selected().unwrap().unwrap();
        assert_eq!(
            event,
            Event::PathChanged {
                path: "World".to_string()
            }
        );
        assert_eq!(names(&panel), vec!["Maps", "readme.txt"]);
        assert_eq!(panel.selected_index(), 0);
    }

    #[test]
    fn activate_file_reports_it() {
        let panel = sample();
        let (panel, event) = panel.activate_selected().unwrap().unwrap();
        assert_eq!(
            event,
            Event::FileActivated {
                path: "(listfile)".to_string()
            }
        );
        assert_eq!(panel.current_path(), "");
    }

    #[test]
    fn go_up_selects_directory_left() {
        let panel = sample().navigate_to("World\\Maps").unwrap().0;
        let (panel, _) = panel.go_up().unwrap();
        assert_eq!(panel.current_path(), "World");
        assert_eq!(panel.selected_entry().unwrap().name(), "Maps");

        let (panel, _) = panel.go_up().unwrap();
        assert_eq!(panel.selected_entry().unwrap().name(), "World");
        assert!(panel.go_up().is_none());
    }

    #[test]
    fn back_forward_and_root() {
        let panel = sample().navigate_to("World").unwrap().0;
        let panel = panel.navigate_to("World\\Maps").unwrap().0;

        let (panel, _) = panel.go_back().unwrap();
        assert_eq!(panel.current_path(), "World");
        let (panel, _) = panel.go_forward().unwrap();
        assert_eq!(panel.current_path(), "World\\Maps");
        let (panel, _) = panel.go_root().unwrap();
        assert_eq!(panel.current_path(), "");
        assert!(panel.go_root().is_none());
    }

    #[test]
    fn sort_keeps_selected_entry() {
        let panel = sample().navigate_to("World\\Maps").unwrap().0;
        let panel = panel.move_down();
        assert_eq!(panel.selected_entry().unwrap().name(), "Kalimdor.wdt");

        let panel = panel.with_sort_key(SortKey::Size);
        assert_eq!(names(&panel), vec!["Kalimdor.wdt", "Azeroth.wdt"]);
        assert_eq!(panel.selected_entry().unwrap().name(), "Kalimdor.wdt");
    }

    #[test]
    fn same_sort_key_flips_direction() {
        let panel = sample().with_sort_key(SortKey::Name);
        assert_eq!(panel.sort().direction, SortDirection::Descending);
        assert_eq!(names(&panel), vec!["World", "Sound", "(listfile)"]);

        let panel = panel.with_sort_key(SortKey::Size);
        assert_eq!(panel.sort().key, SortKey::Size);
        assert_eq!(panel.sort().direction, SortDirection::Ascending);
    }

    #[test]
    fn next_sort_cycles_keys() {
        let panel = sample().with_next_sort();
        assert_eq!(panel.sort().key, SortKey::Size);
        let panel = panel.with_next_sort().with_next_sort();
        assert_eq!(panel.sort().key, SortKey::Name);
    }

    #[test]
    fn filter_keeps_sort_order() {
        let panel = sample().navigate_to("World\\Maps").unwrap().0;
        let panel = panel.with_filter("wdt");
        assert_eq!(names(&panel), vec!["Azeroth.wdt", "Kalimdor.wdt"]);

        let panel = panel.with_filter("kal");
        assert_eq!(names(&panel), vec!["Kalimdor.wdt"]);
        assert_eq!(panel.filter(), "kal");

        let panel = panel.with_filter("");
        assert_eq!(panel.row_count(), 2);
    }

    #[test]
    fn navigation_clears_filter() {
        let panel = sample().with_filter("wor");
        assert_eq!(panel.row_count(), 1);
        let (panel, _) = panel.activate_selected().unwrap().unwrap();
        assert_eq!(panel.filter(), "");
        assert_eq!(panel.row_count(), 2);
    }

    #[test]
    fn marks_select_targets() {
        let panel = sample();
        assert_eq!(panel.target_entries().len(), 1);

        let panel = panel.toggle_mark().toggle_mark();
        assert_eq!(panel.marked_count(), 2);
        assert_eq!(panel.selected_index(), 2);
        let targets: Vec<&str> = panel.target_entries().iter().map(|e| e.name()).collect();
        assert_eq!(targets, vec!["(listfile)", "Sound"]);

        let panel = panel.with_selection(0).toggle_mark();
        assert_eq!(panel.marked_count(), 1);
        assert_eq!(panel.clear_marks().marked_count(), 0);
    }

    #[test]
    fn dirs_first_setting() {
        let panel = sample().with_sort(SortSettings {
            key: SortKey::Name,
            direction: SortDirection::Ascending,
            dirs_first: true,
        });
        assert_eq!(names(&panel), vec!["Sound", "World", "(listfile)"]);
    }
}
