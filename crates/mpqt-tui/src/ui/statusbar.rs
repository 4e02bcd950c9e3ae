//! Status bar rendering.
//!
//! The status bar occupies a single row at the bottom of the terminal and
//! shows the cursor position, the selected entry, mark and filter
//! indicators, archive totals and an optional status message.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use mpqt_core::format::human_size;
use mpqt_core::nav::panel::{Column, Panel};

const BG: Color = Color::DarkGray;
const POSITION_FG: Color = Color::White;
const INDICATOR_FG: Color = Color::Yellow;
const TOTALS_FG: Color = Color::Gray;
const MESSAGE_FG: Color = Color::Green;

/// Data needed to render the status bar.
#[derive(Debug, Default)]
pub struct StatusBarProps<'a> {
    pub entry_count: usize,
    pub selected_index: usize,
    /// Name and size label of the selected row.
    pub selected: Option<(String, String)>,
    pub marked_count: usize,
    pub filter: Option<&'a str>,
    /// Files in the archive and their total size.
    pub totals: Option<(usize, u64)>,
    pub status_message: Option<&'a str>,
}

impl<'a> StatusBarProps<'a> {
    pub fn from_panel(panel: &'a Panel, status_message: Option<&'a str>) -> Self {
        let selected_index = panel.selected_index();
        let selected = panel.selected_entry().map(|e| {
            let size = panel.cell(selected_index, Column::Size).unwrap_or_default();
            (e.name().to_owned(), size)
        });
        let namespace = panel.namespace();
        Self {
            entry_count: panel.row_count(),
            selected_index,
            selected,
            marked_count: panel.marked_count(),
            filter: Some(panel.filter()).filter(|f| !f.is_empty()),
            totals: Some((namespace.file_count(), namespace.total_size())),
            status_message,
        }
    }
}

/// Renders the bottom status bar.
pub fn render_statusbar(f: &mut Frame, area: Rect, props: &StatusBarProps<'_>) {
    let bar = Paragraph::new(status_line(props)).style(Style::default().bg(BG));
    f.render_widget(bar, area);
}

fn status_line(props: &StatusBarProps<'_>) -> Line<'static> {
    let position = if props.entry_count > 0 {
        format!(" {}/{}", props.selected_index + 1, props.entry_count)
    } else {
        " 0/0".to_owned()
    };

    let file_info = props
        .selected
        .as_ref()
        .map(|(name, size)| format!("  {name} ({size})"))
        .unwrap_or_default();

    let mut indicators = String::new();
    if props.marked_count > 0 {
        indicators.push_str(&format!("  [{} marked]", props.marked_count));
    }
    if let Some(filter) = props.filter {
        indicators.push_str(&format!("  [filter: {filter}]"));
    }

    let totals = props
        .totals
        .map(|(files, bytes)| format!("  {} files, {}", files, human_size(bytes)))
        .unwrap_or_default();

    let status_span = props
        .status_message
        .map(|msg| {
            Span::styled(
                format!("  {msg}"),
                Style::default()
                    .fg(MESSAGE_FG)
                    .bg(BG)
                    .add_modifier(Modifier::ITALIC),
            )
        })
        .unwrap_or_default();

    Line::from(vec![
        Span::styled(
            position,
            Style::default()
                .fg(POSITION_FG)
                .bg(BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(file_info, Style::default().fg(POSITION_FG).bg(BG)),
        Span::styled(
            indicators,
            Style::default()
                .fg(INDICATOR_FG)
                .bg(BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(totals, Style::default().fg(TOTALS_FG).bg(BG)),
        status_span,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use std::sync::Arc;

    use mpqt_core::nav::panel::SortSettings;
    use mpqt_core::{ClassificationGraph, Namespace, RawEntry};

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn sample_panel() -> Panel {
        let ns = Namespace::build(
            "patch.mpq",
            vec![
                RawEntry::new("World\\Maps\\Azeroth.wdt", 4096),
                RawEntry::new("readme.txt", 10),
            ],
            Arc::new(ClassificationGraph::builtin()),
        );
        Panel::new(Rc::new(ns), SortSettings::default())
    }

    #[test]
    fn empty_props_show_zero_position() {
        let props = StatusBarProps::default();
        assert_eq!(text(&status_line(&props)), " 0/0");
    }

    #[test]
    fn props_from_panel() {
        let panel = sample_panel();
        let props = StatusBarProps::from_panel(&panel, Some("Opened"));
        assert_eq!(props.entry_count, 2);
        assert_eq!(props.selected, Some(("World".to_string(), "1 item".to_string())));
        assert_eq!(props.totals, Some((2, 4106)));
        assert!(props.filter.is_none());

        let line = text(&status_line(&props));
        assert_eq!(line, " 1/2  World (1 item)  2 files, 4.0 KiB  Opened");
    }

    #[test]
    fn marks_and_filter_are_indicated() {
        let panel = sample_panel().toggle_mark().with_filter("read");
        let props = StatusBarProps::from_panel(&panel, None);
        let line = text(&status_line(&props));
        assert!(line.contains("[1 marked]"));
        assert!(line.contains("[filter: read]"));
        assert!(line.contains("readme.txt (10 B)"));
    }

    #[test]
    fn status_message_is_italic() {
        let props = StatusBarProps {
            status_message: Some("Extracted 3 files"),
            ..StatusBarProps::default()
        };
        let line = status_line(&props);
        let last = line.spans.last().unwrap();
        assert_eq!(last.content.as_ref(), "  Extracted 3 files");
        assert!(last.style.add_modifier.contains(Modifier::ITALIC));
    }
}
