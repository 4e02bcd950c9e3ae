//! Key binding configuration.
//!
//! Key bindings map key names (e.g. `"j"`, `"gg"`, `"Enter"`) to [`Action`]
//! values. The defaults follow vim conventions, with the browser-style
//! `Backspace` / `Alt+Left` / `Alt+Right` as alternatives.
//!
//! TOML files use string action identifiers (e.g. `"cursor_down"`); these
//! are resolved through [`ActionRegistry::find_by_id`] at load time.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::action::{Action, ActionRegistry};
use crate::error::{CoreError, CoreResult};

/// Raw TOML representation, deserialized first and then resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawKeymap {
    #[serde(default)]
    bindings: HashMap<String, String>,
}

/// Complete set of key bindings.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<String, Action>,
    /// Action → keys, for the help popup.
    reverse: HashMap<Action, Vec<String>>,
}

const DEFAULT_BINDINGS: &[(&str, Action)] = &[
    // Navigation
    ("j", Action::CursorDown),
    ("Down", Action::CursorDown),
    ("k", Action::CursorUp),
    ("Up", Action::CursorUp),
    ("gg", Action::CursorTop),
    ("Home", Action::CursorTop),
    ("G", Action::CursorBottom),
    ("End", Action::CursorBottom),
    ("l", Action::Open),
    ("Enter", Action::Open),
    ("h", Action::GoParent),
    ("Backspace", Action::GoParent),
    ("~", Action::GoRoot),
    ("H", Action::GoBack),
    ("Alt+Left", Action::GoBack),
    ("L", Action::GoForward),
    ("Alt+Right", Action::GoForward),
    ("Ctrl+l", Action::Location),
    // Archive
    ("Space", Action::Mark),
    ("x", Action::Extract),
    // View
    ("/", Action::Search),
    ("s", Action::SortCycle),
    ("1", Action::SortName),
    ("2", Action::SortSize),
    ("3", Action::SortType),
    ("r", Action::ToggleDirection),
    // Tabs
    ("]", Action::TabNext),
    ("[", Action::TabPrev),
    ("w", Action::TabClose),
    // System
    ("?", Action::Help),
    ("q", Action::Quit),
];

impl Default for Keymap {
    fn default() -> Self {
        let bindings: HashMap<String, Action> = DEFAULT_BINDINGS
            .iter()
            .map(|(key, action)| ((*key).to_string(), *action))
            .collect();
        let reverse = build_reverse(&bindings);
        Self { bindings, reverse }
    }
}

fn build_reverse(bindings: &HashMap<String, Action>) -> HashMap<Action, Vec<String>> {
    let mut reverse: HashMap<Action, Vec<String>> = HashMap::new();
    for (key, action) in bindings {
        reverse.entry(*action).or_default().push(key.clone());
    }
    for keys in reverse.values_mut() {
        keys.sort();
    }
    reverse
}

impl Keymap {
    /// Loads key bindings from a TOML file at `path`.
    ///
    /// The file replaces the defaults entirely. Unknown action ids are
    /// skipped with a warning.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::from_io(path, e))?;
        let raw: RawKeymap =
            toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawKeymap) -> Self {
        let registry = ActionRegistry::new();
        let bindings: HashMap<String, Action> = raw
            .bindings
            .into_iter()
            .filter_map(|(key, action_id)| match registry.find_by_id(&action_id) {
                Some(action) => Some((key, action)),
                None => {
                    tracing::warn!(key = %key, action = %action_id, "unknown action in keymap");
                    None
                }
            })
            .collect();
        let reverse = build_reverse(&bindings);
        Self { bindings, reverse }
    }

    /// Returns the action mapped to `key`, or `None` if unbound.
    pub fn action_for_key(&self, key: &str) -> Option<Action> {
        self.bindings.get(key).copied()
    }

    /// Returns the key(s) bound to `action`, sorted.
    pub fn keys_for_action(&self, action: Action) -> Option<&[String]> {
        self.reverse.get(&action).map(Vec::as_slice)
    }

    /// Returns `true` if some binding is longer than `prefix` and starts
    /// with it, so the input layer should wait for another key.
    pub fn is_prefix(&self, prefix: &str) -> bool {
        self.bindings
            .keys()
            .any(|key| key.len() > prefix.len() && key.starts_with(prefix))
    }

    pub fn bindings(&self) -> &HashMap<String, Action> {
        &self.bindings
    }
}
