use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use mpqt_core::action::Action;
use mpqt_core::config::keymap::Keymap;
use mpqt_core::event::Command;
use mpqt_core::nav::sort::SortKey;

use crate::app::AppMode;

/// Actions that can result from a key press.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    /// Dispatch a core Command.
    Command(Command),
    /// Enter a new AppMode.
    EnterMode(AppMode),
    /// Quit the application.
    Quit,
    /// Jump cursor to top (gg).
    CursorTop,
    /// Jump cursor to bottom (G).
    CursorBottom,
    /// Mark or unmark the selected entry.
    ToggleMark,
    /// Extract the marked or selected entries.
    Extract,
    /// Enter search mode.
    StartSearch,
    /// Append a character to the search query.
    SearchChar(char),
    /// Remove the last character from the search query.
    SearchBackspace,
    /// Keep the filtered listing and return to Normal.
    SearchConfirm,
    /// Drop the filter and return to Normal.
    SearchCancel,
    /// Enter location mode with the current path.
    StartLocation,
    /// Append a character to the location text.
    LocationChar(char),
    /// Remove the last character from the location text.
    LocationBackspace,
    /// Navigate to the typed location.
    LocationConfirm,
    /// Cycle to the next sort key.
    SortCycle,
    /// Sort by a key, flipping direction if it is already active.
    SortBy(SortKey),
    /// Flip the sort direction.
    ToggleDirection,
    /// Switch to the next tab.
    TabNext,
    /// Switch to the previous tab.
    TabPrev,
    /// Close the current tab, or quit when none is open.
    TabClose,
    /// No action for this key.
    None,
}

/// Tracks keys typed so far of a multi-key binding like "gg".
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InputState {
    pending: String,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys typed so far of an unfinished binding.
    pub fn pending(&self) -> &str {
        &self.pending
    }
}

/// Maps a key event to an InputAction based on the current mode.
/// Returns the action and a new InputState (immutable pattern).
///
/// In Normal mode keys are resolved through the `Keymap`; Ctrl+C and
/// the plain arrow keys are hardcoded. Modal modes are hardcoded.
pub fn handle_key(
    key: KeyEvent,
    mode: &AppMode,
    state: &InputState,
    keymap: &Keymap,
) -> (InputAction, InputState) {
    match mode {
        AppMode::Normal => handle_normal_key(key, state, keymap),
        AppMode::Search(_) => handle_search_key(key),
        AppMode::Location(_) => handle_location_key(key),
        AppMode::Help => handle_help_key(key),
    }
}

/// The keymap name of a key event: `"j"`, `"G"`, `"Space"`, `"Ctrl+l"`,
/// `"Alt+Left"`. Shift is folded into the character.
pub fn key_name(key: &KeyEvent) -> Option<String> {
    let base = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        _ => return None,
    };

    let mut name = String::new();
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        name.push_str("Ctrl+");
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        name.push_str("Alt+");
    }
    name.push_str(&base);
    Some(name)
}

/// Converts an `Action` enum variant to the corresponding `InputAction`.
fn action_to_input_action(action: Action) -> InputAction {
    match action {
        Action::CursorDown => InputAction::Command(Command::CursorDown),
        Action::CursorUp => InputAction::Command(Command::CursorUp),
        Action::CursorTop => InputAction::CursorTop,
        Action::CursorBottom => InputAction::CursorBottom,
        Action::Open => InputAction::Command(Command::Activate),
        Action::GoParent => InputAction::Command(Command::GoUp),
        Action::GoRoot => InputAction::Command(Command::GoRoot),
        Action::GoBack => InputAction::Command(Command::GoBack),
        Action::GoForward => InputAction::Command(Command::GoForward),
        Action::Location => InputAction::StartLocation,
        Action::Mark => InputAction::ToggleMark,
        Action::Extract => InputAction::Extract,
        Action::Search => InputAction::StartSearch,
        Action::SortCycle => InputAction::SortCycle,
        Action::SortName => InputAction::SortBy(SortKey::Name),
        Action::SortSize => InputAction::SortBy(SortKey::Size),
        Action::SortType => InputAction::SortBy(SortKey::Type),
        Action::ToggleDirection => InputAction::ToggleDirection,
        Action::TabNext => InputAction::TabNext,
        Action::TabPrev => InputAction::TabPrev,
        Action::TabClose => InputAction::TabClose,
        Action::Help => InputAction::EnterMode(AppMode::Help),
        Action::Quit => InputAction::Quit,
    }
}

fn handle_normal_key(
    key: KeyEvent,
    state: &InputState,
    keymap: &Keymap,
) -> (InputAction, InputState) {
    // Hardcoded keys (not remappable)
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return (InputAction::Quit, InputState::new());
    }
    if key.modifiers.is_empty() && state.pending.is_empty() {
        match key.code {
            KeyCode::Left => return (InputAction::Command(Command::GoUp), InputState::new()),
            KeyCode::Right => return (InputAction::Command(Command::Activate), InputState::new()),
            _ => {}
        }
    }

    let Some(name) = key_name(&key) else {
        return (InputAction::None, InputState::new());
    };

    // Continue a multi-key sequence; an unbound continuation cancels it.
    let sequence = format!("{}{name}", state.pending);
    if let Some(action) = keymap.action_for_key(&sequence) {
        return (action_to_input_action(action), InputState::new());
    }
    if keymap.is_prefix(&sequence) {
        return (InputAction::None, InputState { pending: sequence });
    }

    (InputAction::None, InputState::new())
}

fn handle_search_key(key: KeyEvent) -> (InputAction, InputState) {
    let new_state = InputState::new();
    let action = match key.code {
        KeyCode::Esc => InputAction::SearchCancel,
        KeyCode::Enter => InputAction::SearchConfirm,
        KeyCode::Backspace => InputAction::SearchBackspace,
        KeyCode::Down => InputAction::Command(Command::CursorDown),
        KeyCode::Up => InputAction::Command(Command::CursorUp),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            InputAction::SearchCancel
        }
        KeyCode::Char(c) => InputAction::SearchChar(c),
        _ => InputAction::None,
    };
    (action, new_state)
}

fn handle_location_key(key: KeyEvent) -> (InputAction, InputState) {
    let new_state = InputState::new();
    let action = match key.code {
        KeyCode::Esc => InputAction::EnterMode(AppMode::Normal),
        KeyCode::Enter => InputAction::LocationConfirm,
        KeyCode::Backspace => InputAction::LocationBackspace,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            InputAction::EnterMode(AppMode::Normal)
        }
        KeyCode::Char(c) => InputAction::LocationChar(c),
        _ => InputAction::None,
    };
    (action, new_state)
}

fn handle_help_key(key: KeyEvent) -> (InputAction, InputState) {
    let new_state = InputState::new();
    let action = match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Enter => {
            InputAction::EnterMode(AppMode::Normal)
        }
        _ => InputAction::None,
    };
    (action, new_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
    use std::fs;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn key_with_mod(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn default_keymap() -> Keymap {
        Keymap::default()
    }

    fn normal(code: KeyCode) -> InputAction {
        let state = InputState::new();
        let (action, _) = handle_key(key(code), &AppMode::Normal, &state, &default_keymap());
        action
    }

    // --- key names ---

    #[test]
    fn key_names() {
        assert_eq!(key_name(&key(KeyCode::Char('j'))).as_deref(), Some("j"));
        assert_eq!(key_name(&key(KeyCode::Char(' '))).as_deref(), Some("Space"));
        assert_eq!(key_name(&key(KeyCode::Enter)).as_deref(), Some("Enter"));
        assert_eq!(
            key_name(&key_with_mod(KeyCode::Char('l'), KeyModifiers::CONTROL)).as_deref(),
            Some("Ctrl+l")
        );
        assert_eq!(
            key_name(&key_with_mod(KeyCode::Left, KeyModifiers::ALT)).as_deref(),
            Some("Alt+Left")
        );
        assert_eq!(key_name(&key(KeyCode::Null)), None);
    }

    #[test]
    fn shifted_char_is_uppercase_name() {
        let k = key_with_mod(KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert_eq!(key_name(&k).as_deref(), Some("G"));
    }

    // --- Normal mode navigation ---

    #[test]
    fn normal_j_cursor_down() {
        assert_eq!(normal(KeyCode::Char('j')), InputAction::Command(Command::CursorDown));
    }

    #[test]
    fn normal_k_cursor_up() {
        assert_eq!(normal(KeyCode::Char('k')), InputAction::Command(Command::CursorUp));
    }

    #[test]
    fn normal_h_and_backspace_go_up() {
        assert_eq!(normal(KeyCode::Char('h')), InputAction::Command(Command::GoUp));
        assert_eq!(normal(KeyCode::Backspace), InputAction::Command(Command::GoUp));
    }

    #[test]
    fn normal_l_and_enter_activate() {
        assert_eq!(normal(KeyCode::Char('l')), InputAction::Command(Command::Activate));
        assert_eq!(normal(KeyCode::Enter), InputAction::Command(Command::Activate));
    }

    #[test]
    fn normal_arrows() {
        assert_eq!(normal(KeyCode::Down), InputAction::Command(Command::CursorDown));
        assert_eq!(normal(KeyCode::Up), InputAction::Command(Command::CursorUp));
        assert_eq!(normal(KeyCode::Left), InputAction::Command(Command::GoUp));
        assert_eq!(normal(KeyCode::Right), InputAction::Command(Command::Activate));
    }

    #[test]
    fn normal_alt_arrows_walk_history() {
        let km = default_keymap();
        let state = InputState::new();
        let (action, _) = handle_key(
            key_with_mod(KeyCode::Left, KeyModifiers::ALT),
            &AppMode::Normal,
            &state,
            &km,
        );
        assert_eq!(action, InputAction::Command(Command::GoBack));
        let (action, _) = handle_key(
            key_with_mod(KeyCode::Right, KeyModifiers::ALT),
            &AppMode::Normal,
            &state,
            &km,
        );
        assert_eq!(action, InputAction::Command(Command::GoForward));
    }

    #[test]
    fn normal_tilde_goes_root() {
        assert_eq!(normal(KeyCode::Char('~')), InputAction::Command(Command::GoRoot));
    }

    // --- multi-key sequences ---

    #[test]
    fn normal_g_sets_pending() {
        let km = default_keymap();
        let (action, new_state) =
            handle_key(key(KeyCode::Char('g')), &AppMode::Normal, &InputState::new(), &km);
        assert_eq!(action, InputAction::None);
        assert_eq!(new_state.pending(), "g");
    }

    #[test]
    fn normal_gg_cursor_top() {
        let km = default_keymap();
        let state = InputState::new();
        let (_, state) = handle_key(key(KeyCode::Char('g')), &AppMode::Normal, &state, &km);
        let (action, state) = handle_key(key(KeyCode::Char('g')), &AppMode::Normal, &state, &km);
        assert_eq!(action, InputAction::CursorTop);
        assert_eq!(state.pending(), "");
    }

    #[test]
    fn normal_g_then_other_key_cancels() {
        let km = default_keymap();
        let state = InputState::new();
        let (_, state) = handle_key(key(KeyCode::Char('g')), &AppMode::Normal, &state, &km);
        let (action, state) = handle_key(key(KeyCode::Char('j')), &AppMode::Normal, &state, &km);
        assert_eq!(action, InputAction::None);
        assert_eq!(state.pending(), "");
    }

    #[test]
    fn normal_capital_g_cursor_bottom() {
        assert_eq!(normal(KeyCode::Char('G')), InputAction::CursorBottom);
        assert_eq!(normal(KeyCode::End), InputAction::CursorBottom);
        assert_eq!(normal(KeyCode::Home), InputAction::CursorTop);
    }

    // --- Normal mode actions ---

    #[test]
    fn normal_archive_and_view_keys() {
        assert_eq!(normal(KeyCode::Char(' ')), InputAction::ToggleMark);
        assert_eq!(normal(KeyCode::Char('x')), InputAction::Extract);
        assert_eq!(normal(KeyCode::Char('/')), InputAction::StartSearch);
        assert_eq!(normal(KeyCode::Char('s')), InputAction::SortCycle);
        assert_eq!(normal(KeyCode::Char('1')), InputAction::SortBy(SortKey::Name));
        assert_eq!(normal(KeyCode::Char('2')), InputAction::SortBy(SortKey::Size));
        assert_eq!(normal(KeyCode::Char('3')), InputAction::SortBy(SortKey::Type));
        assert_eq!(normal(KeyCode::Char('r')), InputAction::ToggleDirection);
    }

    #[test]
    fn normal_tab_keys() {
        assert_eq!(normal(KeyCode::Char(']')), InputAction::TabNext);
        assert_eq!(normal(KeyCode::Char('[')), InputAction::TabPrev);
        assert_eq!(normal(KeyCode::Char('w')), InputAction::TabClose);
    }

    #[test]
    fn normal_ctrl_l_starts_location() {
        let (action, _) = handle_key(
            key_with_mod(KeyCode::Char('l'), KeyModifiers::CONTROL),
            &AppMode::Normal,
            &InputState::new(),
            &default_keymap(),
        );
        assert_eq!(action, InputAction::StartLocation);
    }

    #[test]
    fn normal_question_enters_help() {
        assert_eq!(normal(KeyCode::Char('?')), InputAction::EnterMode(AppMode::Help));
    }

    #[test]
    fn normal_q_quits() {
        assert_eq!(normal(KeyCode::Char('q')), InputAction::Quit);
    }

    #[test]
    fn normal_ctrl_c_quits() {
        let (action, _) = handle_key(
            key_with_mod(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &AppMode::Normal,
            &InputState::new(),
            &default_keymap(),
        );
        assert_eq!(action, InputAction::Quit);
    }

    #[test]
    fn normal_unknown_key_none() {
        assert_eq!(normal(KeyCode::Char('z')), InputAction::None);
        assert_eq!(normal(KeyCode::F(5)), InputAction::None);
    }

    #[test]
    fn custom_keymap_remaps_keys() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("keymap.toml");
        fs::write(
            &path,
            r#"
[bindings]
j = "cursor_up"
e = "extract"
zz = "quit"
"#,
        )
        .unwrap();
        let km = Keymap::load(&path).unwrap();
        let state = InputState::new();

        let (action, _) = handle_key(key(KeyCode::Char('j')), &AppMode::Normal, &state, &km);
        assert_eq!(action, InputAction::Command(Command::CursorUp));
        let (action, _) = handle_key(key(KeyCode::Char('e')), &AppMode::Normal, &state, &km);
        assert_eq!(action, InputAction::Extract);
        let (action, _) = handle_key(key(KeyCode::Char('x')), &AppMode::Normal, &state, &km);
        assert_eq!(action, InputAction::None);

        let (_, state) = handle_key(key(KeyCode::Char('z')), &AppMode::Normal, &state, &km);
        let (action, _) = handle_key(key(KeyCode::Char('z')), &AppMode::Normal, &state, &km);
        assert_eq!(action, InputAction::Quit);
    }

    // --- Search mode ---

    #[test]
    fn search_keys() {
        let km = default_keymap();
        let mode = AppMode::Search(String::new());
        let state = InputState::new();
        let run = |k| handle_key(k, &mode, &state, &km).0;

        assert_eq!(run(key(KeyCode::Char('q'))), InputAction::SearchChar('q'));
        assert_eq!(run(key(KeyCode::Backspace)), InputAction::SearchBackspace);
        assert_eq!(run(key(KeyCode::Enter)), InputAction::SearchConfirm);
        assert_eq!(run(key(KeyCode::Esc)), InputAction::SearchCancel);
        assert_eq!(run(key(KeyCode::Down)), InputAction::Command(Command::CursorDown));
        assert_eq!(run(key(KeyCode::Up)), InputAction::Command(Command::CursorUp));
    }

    // --- Location mode ---

    #[test]
    fn location_keys() {
        let km = default_keymap();
        let mode = AppMode::Location("/World".to_string());
        let state = InputState::new();
        let run = |k| handle_key(k, &mode, &state, &km).0;

        assert_eq!(run(key(KeyCode::Char('/'))), InputAction::LocationChar('/'));
        assert_eq!(run(key(KeyCode::Backspace)), InputAction::LocationBackspace);
        assert_eq!(run(key(KeyCode::Enter)), InputAction::LocationConfirm);
        assert_eq!(run(key(KeyCode::Esc)), InputAction::EnterMode(AppMode::Normal));
    }

    // --- Help mode ---

    #[test]
    fn help_closing_keys() {
        let km = default_keymap();
        let state = InputState::new();
        for code in [KeyCode::Esc, KeyCode::Char('q'), KeyCode::Char('?')] {
            let (action, _) = handle_key(key(code), &AppMode::Help, &state, &km);
            assert_eq!(action, InputAction::EnterMode(AppMode::Normal));
        }
        let (action, _) = handle_key(key(KeyCode::Char('j')), &AppMode::Help, &state, &km);
        assert_eq!(action, InputAction::None);
    }

    #[test]
    fn every_default_binding_resolves() {
        let km = default_keymap();
        for action in km.bindings().values() {
            assert_ne!(action_to_input_action(*action), InputAction::None);
        }
    }
}
