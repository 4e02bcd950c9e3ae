//! Unified action system.
//!
//! Every user-triggerable action is represented by the [`Action`] enum.
//! [`ActionRegistry`] provides the metadata the keymap and the help popup
//! need: a stable id, a display name, a description and a category.

/// Every user-triggerable action.
///
/// Variants carry no parameters; context is determined at dispatch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Navigation
    CursorUp,
    CursorDown,
    CursorTop,
    CursorBottom,
    Open,
    GoParent,
    GoRoot,
    GoBack,
    GoForward,
    Location,
    // Archive
    Mark,
    Extract,
    // View
    Search,
    SortCycle,
    SortName,
    SortSize,
    SortType,
    ToggleDirection,
    // Tabs
    TabNext,
    TabPrev,
    TabClose,
    // System
    Help,
    Quit,
}

/// Broad category for grouping actions in the help popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    Navigation,
    Archive,
    View,
    Tab,
    System,
}

impl ActionCategory {
    pub const ALL: [ActionCategory; 5] = [
        Self::Navigation,
        Self::Archive,
        Self::View,
        Self::Tab,
        Self::System,
    ];

    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Navigation => "Navigation",
            Self::Archive => "Archive",
            Self::View => "View",
            Self::Tab => "Tab",
            Self::System => "System",
        }
    }
}

/// Metadata for a single action.
#[derive(Debug, Clone)]
pub struct ActionDescriptor {
    pub action: Action,
    /// Snake-case identifier used in `keymap.toml` (e.g. `"cursor_up"`).
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: ActionCategory,
}

const fn describe(
    action: Action,
    id: &'static str,
    name: &'static str,
    description: &'static str,
    category: ActionCategory,
) -> ActionDescriptor {
    ActionDescriptor {
        action,
        id,
        name,
        description,
        category,
    }
}

/// Registry of all available actions.
#[derive(Debug, Clone)]
pub struct ActionRegistry {
    descriptors: Vec<ActionDescriptor>,
}

impl ActionRegistry {
    /// Builds the registry containing every known action.
    pub fn new() -> Self {
        use ActionCategory::*;

        let descriptors = vec![
            describe(Action::CursorUp, "cursor_up", "Cursor Up", "Move cursor up one entry", Navigation),
            describe(Action::CursorDown, "cursor_down", "Cursor Down", "Move cursor down one entry", Navigation),
            describe(Action::CursorTop, "go_first", "Go to First", "Jump to the first entry", Navigation),
            describe(Action::CursorBottom, "go_last", "Go to Last", "Jump to the last entry", Navigation),
            describe(Action::Open, "open", "Open", "Enter the selected directory or select the file", Navigation),
            describe(Action::GoParent, "go_parent", "Up", "Go to the parent directory", Navigation),
            describe(Action::GoRoot, "go_root", "Root", "Go to the archive root", Navigation),
            describe(Action::GoBack, "go_back", "Back", "Navigate back in history", Navigation),
            describe(Action::GoForward, "go_forward", "Forward", "Navigate forward in history", Navigation),
            describe(Action::Location, "location", "Go to Location", "Type a path to open", Navigation),
            describe(Action::Mark, "mark", "Mark", "Mark or unmark the selected entry", Archive),
            describe(Action::Extract, "extract", "Extract", "Extract the marked or selected entries", Archive),
            describe(Action::Search, "search", "Filter", "Fuzzy filter the listing", View),
            describe(Action::SortCycle, "sort_cycle", "Sort", "Cycle the sort column", View),
            describe(Action::SortName, "sort_name", "Sort by Name", "Sort by name, again to reverse", View),
            describe(Action::SortSize, "sort_size", "Sort by Size", "Sort by size, again to reverse", View),
            describe(Action::SortType, "sort_type", "Sort by Type", "Sort by type, again to reverse", View),
            describe(Action::ToggleDirection, "toggle_direction", "Reverse Sort", "Flip the sort direction", View),
            describe(Action::TabNext, "tab_next", "Next Tab", "Switch to the next archive", Tab),
            describe(Action::TabPrev, "tab_prev", "Previous Tab", "Switch to the previous archive", Tab),
            describe(Action::TabClose, "tab_close", "Close Tab", "Close the current archive", Tab),
            describe(Action::Help, "help", "Help", "Show keyboard shortcuts", System),
            describe(Action::Quit, "quit", "Quit", "Exit MPQt", System),
        ];
        Self { descriptors }
    }

    /// Returns all descriptors.
    pub fn all(&self) -> &[ActionDescriptor] {
        &self.descriptors
    }

    /// Descriptors of one category, in registry order.
    pub fn in_category(&self, category: ActionCategory) -> impl Iterator<Item = &ActionDescriptor> {
        self.descriptors
            .iter()
            .filter(move |d| d.category == category)
    }

    /// Finds an action by its string id (for keymap.toml parsing).
    pub fn find_by_id(&self, id: &str) -> Option<Action> {
        self.descriptors
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.action)
    }

    /// Returns the descriptor for a given action.
    pub fn descriptor_for(&self, action: Action) -> Option<&ActionDescriptor> {
        self.descriptors.iter().find(|d| d.action == action)
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_contains_all_actions() {
        let registry = ActionRegistry::new();
        assert_eq!(registry.all().len(), 23);
    }

    #[test]
    fn ids_are_unique() {
        let registry = ActionRegistry::new();
        let all = registry.all();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.id, b.id);
                assert_ne!(a.action, b.action);
            }
        }
    }

    #[test]
    fn find_by_id_returns_correct_action() {
        let registry = ActionRegistry::new();
        assert_eq!(registry.find_by_id("cursor_up"), Some(Action::CursorUp));
        assert_eq!(registry.find_by_id("extract"), Some(Action::Extract));
        assert_eq!(registry.find_by_id("quit"), Some(Action::Quit));
    }

    #[test]
    fn find_by_id_unknown_returns_none() {
        let registry = ActionRegistry::new();
        assert_eq!(registry.find_by_id("nonexistent"), None);
    }

    #[test]
    fn descriptor_for_returns_metadata() {
        let registry = ActionRegistry::new();
        let desc = registry.descriptor_for(Action::Help).unwrap();
        assert_eq!(desc.id, "help");
        assert_eq!(desc.name, "Help");
        assert_eq!(desc.category, ActionCategory::System);
    }

    #[test]
    fn every_category_has_actions() {
        let registry = ActionRegistry::new();
        for category in ActionCategory::ALL {
            assert!(registry.in_category(category).next().is_some());
        }
        let archive: Vec<Action> = registry
            .in_category(ActionCategory::Archive)
            .map(|d| d.action)
            .collect();
        assert_eq!(archive, vec![Action::Mark, Action::Extract]);
    }

    #[test]
    fn action_category_labels() {
        assert_eq!(ActionCategory::Navigation.label(), "Navigation");
        assert_eq!(ActionCategory::Archive.label(), "Archive");
        assert_eq!(ActionCategory::System.label(), "System");
    }
}
