use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use mpqt_core::action::{ActionCategory, ActionRegistry};
use mpqt_core::config::keymap::Keymap;

use crate::app::{App, AppMode};
use crate::ui::location::render_location;
use crate::ui::panel::render_panel;
use crate::ui::popup::render_popup;
use crate::ui::statusbar::{render_statusbar, StatusBarProps};
use crate::ui::tab_bar::render_tab_bar;

/// Main render function: composes the full UI layout each frame.
pub fn render(f: &mut Frame, app: &App) {
    let [tabs_area, location_area, panel_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(f.area());

    render_tab_bar(f, tabs_area, app.tabs());

    match app.active_tab() {
        Some(tab) => {
            let editing = match app.mode() {
                AppMode::Location(text) => Some(text.as_str()),
                _ => None,
            };
            render_location(
                f,
                location_area,
                &tab.label,
                tab.panel.current_path(),
                editing,
            );

            let title = panel_title(app.mode(), &tab.label);
            let ui = &app.config().ui;
            render_panel(
                f,
                panel_area,
                &tab.panel,
                &title,
                ui.show_icons,
                ui.show_type_column,
            );

            let props = StatusBarProps::from_panel(&tab.panel, app.status_message());
            render_statusbar(f, status_area, &props);
        }
        None => {
            render_empty(f, panel_area);
            let props = StatusBarProps {
                status_message: app.status_message(),
                ..StatusBarProps::default()
            };
            render_statusbar(f, status_area, &props);
        }
    }

    if matches!(app.mode(), AppMode::Help) {
        let lines = help_lines(app.action_registry(), app.keymap());
        render_popup(f, "Help", &lines);
    }
}

fn panel_title(mode: &AppMode, label: &str) -> String {
    match mode {
        AppMode::Search(query) => format!(" Filter: {query}_ "),
        _ => format!(" {label} "),
    }
}

fn render_empty(f: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            "No archive open",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Pass archives on the command line: mpqt <ARCHIVE>...",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )),
    ]);
    f.render_widget(text, inner);
}

/// Help text built from the registry, grouped by category, with the keys
/// currently bound to each action.
fn help_lines(registry: &ActionRegistry, keymap: &Keymap) -> Vec<String> {
    let mut lines = Vec::new();
    for category in ActionCategory::ALL {
        let mut actions = registry.in_category(category).peekable();
        if actions.peek().is_none() {
            continue;
        }
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(format!("[{}]", category.label()));
        for descriptor in actions {
            let keys = keymap
                .keys_for_action(descriptor.action)
                .map(|keys| keys.join(" "))
                .unwrap_or_else(|| "-".to_string());
            lines.push(format!("{keys:<16} {}", descriptor.description));
        }
    }
    lines.push(String::new());
    lines.push("Press Esc or ? to close".to_owned());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_lists_every_category_and_binding() {
        let lines = help_lines(&ActionRegistry::new(), &Keymap::default());
        for category in ActionCategory::ALL {
            assert!(lines.contains(&format!("[{}]", category.label())));
        }
        assert!(lines
            .iter()
            .any(|l| l.starts_with("Alt+Left H") && l.ends_with("Navigate back in history")));
        assert_eq!(lines.last().map(String::as_str), Some("Press Esc or ? to close"));
    }

    #[test]
    fn help_shows_dash_for_unbound_actions() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("keymap.toml");
        std::fs::write(&path, "[bindings]\nq = \"quit\"\n").unwrap();
        let keymap = Keymap::load(&path).unwrap();

        let lines = help_lines(&ActionRegistry::new(), &keymap);
        assert!(lines.iter().any(|l| l.starts_with("q ") && l.ends_with("Exit MPQt")));
        assert!(lines.iter().any(|l| l.starts_with("- ") && l.ends_with("Extract the marked or selected entries")));
    }

    #[test]
    fn search_mode_title_shows_query() {
        assert_eq!(panel_title(&AppMode::Search("wdt".to_string()), "a.mpq"), " Filter: wdt_ ");
        assert_eq!(panel_title(&AppMode::Normal, "a.mpq"), " a.mpq ");
    }
}
