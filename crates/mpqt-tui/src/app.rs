use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

use mpqt_core::action::ActionRegistry;
use mpqt_core::archive::{extract_entries, ArchiveReader, DirectoryArchive, ListfileArchive};
use mpqt_core::config::keymap::Keymap;
use mpqt_core::config::settings::Config;
use mpqt_core::event::{Command, Event};
use mpqt_core::nav::panel::{Panel, SortSettings};
use mpqt_core::nav::sort::SortKey;
use mpqt_core::{path, ClassificationGraph, CoreResult, Entry, Namespace};

/// Application mode. Determines how input is routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    /// Filtering the listing; the string is the query being typed.
    Search(String),
    /// Editing the location bar; the string is the path being typed.
    Location(String),
    Help,
}

/// One open archive: its reader, the panel browsing it and the tab label.
#[derive(Clone)]
pub struct TabEntry {
    pub reader: Rc<dyn ArchiveReader>,
    pub panel: Panel,
    pub label: String,
}

impl fmt::Debug for TabEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabEntry")
            .field("label", &self.label)
            .field("panel", &self.panel)
            .finish_non_exhaustive()
    }
}

impl TabEntry {
    fn with_panel(self, panel: Panel) -> Self {
        Self { panel, ..self }
    }
}

/// The open archives, one per tab. May be empty.
#[derive(Debug, Clone, Default)]
pub struct TabGroup {
    tabs: Vec<TabEntry>,
    active_tab: usize,
}

impl TabGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_tab(&self) -> Option<&TabEntry> {
        self.tabs.get(self.active_tab)
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn active_tab_index(&self) -> usize {
        self.active_tab
    }

    pub fn tabs(&self) -> &[TabEntry] {
        &self.tabs
    }

    /// Index of the tab whose archive was opened from `location`.
    pub fn position_of(&self, location: &Path) -> Option<usize> {
        self.tabs
            .iter()
            .position(|tab| tab.reader.location() == Some(location))
    }

    /// Appends a tab and makes it active.
    pub fn with_new_tab(self, entry: TabEntry) -> Self {
        let mut tabs = self.tabs;
        tabs.push(entry);
        let active_tab = tabs.len() - 1;
        Self { tabs, active_tab }
    }

    /// Close a tab by index. Closing the last tab leaves the group empty.
    pub fn with_closed_tab(self, index: usize) -> Self {
        if index >= self.tabs.len() {
            return self;
        }
        let mut tabs = self.tabs;
        tabs.remove(index);
        let new_active = if tabs.is_empty() {
            0
        } else if self.active_tab >= tabs.len() {
            tabs.len() - 1
        } else if self.active_tab > index {
            self.active_tab - 1
        } else {
            self.active_tab
        };
        Self {
            tabs,
            active_tab: new_active,
        }
    }

    /// Switch to a specific tab by index.
    pub fn with_active_tab(self, index: usize) -> Self {
        if index >= self.tabs.len() {
            return self;
        }
        Self {
            active_tab: index,
            ..self
        }
    }

    /// Switch to the next tab (wrapping).
    pub fn with_next_tab(self) -> Self {
        if self.tabs.is_empty() {
            return self;
        }
        let next = (self.active_tab + 1) % self.tabs.len();
        Self {
            active_tab: next,
            ..self
        }
    }

    /// Switch to the previous tab (wrapping).
    pub fn with_prev_tab(self) -> Self {
        if self.tabs.is_empty() {
            return self;
        }
        let prev = if self.active_tab == 0 {
            self.tabs.len() - 1
        } else {
            self.active_tab - 1
        };
        Self {
            active_tab: prev,
            ..self
        }
    }

    /// Replace the active tab's entry.
    pub fn with_updated_active(self, entry: TabEntry) -> Self {
        if self.tabs.is_empty() {
            return self;
        }
        let mut tabs = self.tabs;
        tabs[self.active_tab] = entry;
        Self { tabs, ..self }
    }
}

/// Opens `path` as an archive: a directory of loose files, or a text
/// listing for anything else.
///
/// # Errors
///
/// Returns the reader's error if `path` cannot be opened.
pub fn reader_for_path(path: &Path) -> CoreResult<Rc<dyn ArchiveReader>> {
    let path = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if path.is_dir() {
        Ok(Rc::new(DirectoryArchive::open(&path)?))
    } else {
        Ok(Rc::new(ListfileArchive::open(&path)?))
    }
}

/// Top-level application state. Immutable transitions via `with_*` methods.
#[derive(Debug)]
pub struct App {
    mode: AppMode,
    tabs: TabGroup,
    config: Config,
    graph: Arc<ClassificationGraph>,
    keymap: Keymap,
    action_registry: ActionRegistry,
    status_message: Option<String>,
    should_quit: bool,
}

impl App {
    /// Creates an app with no open archives.
    pub fn new(config: Config, keymap: Keymap) -> Self {
        let graph = Arc::new(config.classification_graph());
        Self {
            mode: AppMode::Normal,
            tabs: TabGroup::new(),
            config,
            graph,
            keymap,
            action_registry: ActionRegistry::new(),
            status_message: None,
            should_quit: false,
        }
    }

    // --- accessors ---

    pub fn mode(&self) -> &AppMode {
        &self.mode
    }

    pub fn tabs(&self) -> &TabGroup {
        &self.tabs
    }

    pub fn active_tab(&self) -> Option<&TabEntry> {
        self.tabs.active_tab()
    }

    pub fn panel(&self) -> Option<&Panel> {
        self.active_tab().map(|tab| &tab.panel)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn action_registry(&self) -> &ActionRegistry {
        &self.action_registry
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    // --- transitions ---

    pub fn with_mode(self, mode: AppMode) -> Self {
        Self { mode, ..self }
    }

    /// Mark the app for quitting.
    pub fn with_quit(self) -> Self {
        Self {
            should_quit: true,
            ..self
        }
    }

    /// Set a status message.
    pub fn with_status(self, msg: String) -> Self {
        Self {
            status_message: Some(msg),
            ..self
        }
    }

    /// Clear the status message.
    pub fn with_clear_status(self) -> Self {
        Self {
            status_message: None,
            ..self
        }
    }

    /// Replace the active tab's panel.
    pub fn with_panel(self, panel: Panel) -> Self {
        let Some(tab) = self.tabs.active_tab().cloned() else {
            return self;
        };
        let tabs = self.tabs.with_updated_active(tab.with_panel(panel));
        Self { tabs, ..self }
    }

    fn map_panel(self, f: impl FnOnce(Panel) -> Panel) -> Self {
        match self.panel().cloned() {
            Some(panel) => self.with_panel(f(panel)),
            None => self,
        }
    }

    // --- tabs ---

    /// Opens the archive at `path` in a new tab, or focuses the tab that
    /// already shows it.
    pub fn open_path(self, path: &Path) -> Self {
        match reader_for_path(path) {
            Ok(reader) => self.open_reader(reader),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not open archive");
                self.with_status(format!("Could not open {}: {e}", path.display()))
            }
        }
    }

    /// Opens an already constructed reader in a new tab.
    pub fn open_reader(self, reader: Rc<dyn ArchiveReader>) -> Self {
        if let Some(index) = reader.location().and_then(|loc| self.tabs.position_of(loc)) {
            let tabs = self.tabs.with_active_tab(index);
            return Self { tabs, ..self };
        }

        let entries = match reader.list_entries() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(archive = reader.name(), error = %e, "could not list archive");
                let msg = format!("Could not open {}: {e}", reader.name());
                return self.with_status(msg);
            }
        };

        let namespace = Namespace::build(reader.name(), entries, Arc::clone(&self.graph));
        let status = format!(
            "Opened {} ({} files)",
            reader.name(),
            namespace.file_count()
        );
        let panel = Panel::new(Rc::new(namespace), self.config.sort_settings());
        let entry = TabEntry {
            label: reader.name().to_owned(),
            reader,
            panel,
        };
        let tabs = self.tabs.with_new_tab(entry);
        Self { tabs, ..self }.with_status(status)
    }

    pub fn with_next_tab(self) -> Self {
        let tabs = self.tabs.with_next_tab();
        Self { tabs, ..self }
    }

    pub fn with_prev_tab(self) -> Self {
        let tabs = self.tabs.with_prev_tab();
        Self { tabs, ..self }
    }

    /// Closes the active tab, or quits when no tab is open.
    pub fn with_close_tab(self) -> Self {
        if self.tabs.is_empty() {
            return self.with_quit();
        }
        let index = self.tabs.active_tab_index();
        let tabs = self.tabs.with_closed_tab(index);
        Self { tabs, ..self }
    }

    // --- panel operations outside the command set ---

    pub fn with_cursor_top(self) -> Self {
        self.map_panel(Panel::go_to_first)
    }

    pub fn with_cursor_bottom(self) -> Self {
        self.map_panel(Panel::go_to_last)
    }

    pub fn with_toggled_mark(self) -> Self {
        self.map_panel(Panel::toggle_mark)
    }

    pub fn with_next_sort(self) -> Self {
        self.map_panel(Panel::with_next_sort)
    }

    pub fn with_sort_key(self, key: SortKey) -> Self {
        self.map_panel(|panel| panel.with_sort_key(key))
    }

    pub fn with_toggled_direction(self) -> Self {
        self.map_panel(Panel::with_toggled_direction)
    }

    /// Extracts the marked entries, or the selected one, into the
    /// configured destination.
    pub fn extract_selection(self) -> Self {
        let Some(tab) = self.active_tab().cloned() else {
            return self;
        };
        let selection = tab.panel.target_entries();
        if selection.is_empty() {
            return self.with_status("Nothing to extract".to_string());
        }
        let destination = self.config.extract.destination_for(tab.reader.name());
        self.extract_into(&tab, &selection, &destination)
    }

    // --- search ---

    /// Enters search mode with an empty query.
    pub fn start_search(self) -> Self {
        self.map_panel(|panel| panel.with_filter(""))
            .with_mode(AppMode::Search(String::new()))
    }

    /// Append a character to the search query and re-filter.
    pub fn search_push_char(self, c: char) -> Self {
        let query = match &self.mode {
            AppMode::Search(q) => format!("{q}{c}"),
            _ => return self,
        };
        self.with_search_query(query)
    }

    /// Remove the last character from the search query and re-filter.
    pub fn search_pop_char(self) -> Self {
        let query = match &self.mode {
            AppMode::Search(q) => {
                let mut q = q.clone();
                q.pop();
                q
            }
            _ => return self,
        };
        self.with_search_query(query)
    }

    fn with_search_query(self, query: String) -> Self {
        self.map_panel(|panel| panel.with_filter(&query))
            .with_mode(AppMode::Search(query))
    }

    /// Leaves search mode keeping the filtered listing.
    pub fn search_confirm(self) -> Self {
        self.with_mode(AppMode::Normal)
    }

    /// Leaves search mode and shows the full listing again.
    pub fn search_cancel(self) -> Self {
        self.map_panel(|panel| panel.with_filter(""))
            .with_mode(AppMode::Normal)
    }

    // --- location bar ---

    /// Enters location mode, pre-filled with the current path.
    pub fn start_location(self) -> Self {
        let Some(panel) = self.panel() else {
            return self;
        };
        let text = path::to_location(panel.current_path());
        self.with_mode(AppMode::Location(text))
    }

    pub fn location_push_char(self, c: char) -> Self {
        match &self.mode {
            AppMode::Location(text) => {
                let text = format!("{text}{c}");
                self.with_mode(AppMode::Location(text))
            }
            _ => self,
        }
    }

    pub fn location_pop_char(self) -> Self {
        match &self.mode {
            AppMode::Location(text) => {
                let mut text = text.clone();
                text.pop();
                self.with_mode(AppMode::Location(text))
            }
            _ => self,
        }
    }

    /// Navigates to the typed location and leaves location mode.
    pub fn location_confirm(self) -> Self {
        let target = match &self.mode {
            AppMode::Location(text) => path::from_location(text),
            _ => return self,
        };
        self.with_mode(AppMode::Normal)
            .handle_command(Command::SetPath(target))
    }

    // --- commands ---

    /// Handle a core Command by producing a new App state.
    pub fn handle_command(self, cmd: Command) -> Self {
        let Some(panel) = self.panel().cloned() else {
            return self;
        };
        match cmd {
            Command::CursorDown => self.with_panel(panel.move_down()),
            Command::CursorUp => self.with_panel(panel.move_up()),
            Command::SetPath(target) => match panel.navigate_to(&target) {
                Ok((panel, _)) => self.with_panel(panel),
                Err(e) => self.with_status(e.to_string()),
            },
            Command::GoUp => self.with_moved(panel.go_up()),
            Command::GoRoot => self.with_moved(panel.go_root()),
            Command::GoBack => self.with_moved(panel.go_back()),
            Command::GoForward => self.with_moved(panel.go_forward()),
            Command::Activate => match panel.activate_selected() {
                Ok(Some((panel, event @ Event::FileActivated { .. }))) => {
                    self.with_panel(panel).with_status(event.status_text())
                }
                Ok(Some((panel, _))) => self.with_panel(panel),
                Ok(None) => self,
                Err(e) => self.with_status(e.to_string()),
            },
            Command::SetSort(key, direction) => {
                let sort = SortSettings {
                    key,
                    direction,
                    ..panel.sort()
                };
                self.with_panel(panel.with_sort(sort))
            }
            Command::Extract(paths, destination) => self.run_extraction(&paths, &destination),
        }
    }

    fn with_moved(self, moved: Option<(Panel, Event)>) -> Self {
        match moved {
            Some((panel, _)) => self.with_panel(panel),
            None => self,
        }
    }

    fn run_extraction(self, paths: &[String], destination: &Path) -> Self {
        let Some(tab) = self.active_tab().cloned() else {
            return self;
        };
        let namespace = tab.panel.namespace();
        let mut selection: Vec<&Entry> = Vec::with_capacity(paths.len());
        let mut missing = Vec::new();
        for p in paths {
            match namespace.find(p) {
                Some(entry) => selection.push(entry),
                None => missing.push(p.as_str()),
            }
        }
        if let Some(first) = missing.first() {
            tracing::warn!(path = %first, missing = missing.len(), "extract target not found");
        }
        if selection.is_empty() {
            return self.with_status("Nothing to extract".to_string());
        }
        self.extract_into(&tab, &selection, destination)
    }

    fn extract_into(self, tab: &TabEntry, selection: &[&Entry], destination: &Path) -> Self {
        let namespace = tab.panel.namespace();
        let summary = extract_entries(
            tab.reader.as_ref(),
            namespace,
            selection,
            destination,
            |event| tracing::debug!(status = %event.status_text(), "extract"),
        );

        let finished = Event::ExtractFinished {
            extracted: summary.extracted,
            total: summary.total,
        };
        let mut status = format!("{} to {}", finished.status_text(), destination.display());
        if let Some(first) = summary.failures.first() {
            let failed = summary.failures.len();
            status.push_str(&format!(" ({failed} failed, first: {})", first.error));
        }

        let panel = tab.panel.clone().clear_marks();
        self.with_panel(panel).with_status(status)
    }
}

/// Default location of a config file under `~/.config/mpqt`.
pub fn config_path(file_name: &str) -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
        .join(".config")
        .join("mpqt")
        .join(file_name)
}
