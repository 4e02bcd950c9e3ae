//! Tab bar widget: one label per open archive above the location bar.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::TabGroup;

const ACTIVE_FG: Color = Color::Black;
const ACTIVE_BG: Color = Color::Cyan;
const INACTIVE_FG: Color = Color::Gray;
const INACTIVE_BG: Color = Color::DarkGray;

/// Renders a tab bar showing all tabs in the group.
pub fn render_tab_bar(f: &mut Frame, area: Rect, tab_group: &TabGroup) {
    let paragraph = Paragraph::new(tab_line(tab_group));
    f.render_widget(paragraph, area);
}

fn tab_line(tab_group: &TabGroup) -> Line<'static> {
    let active_idx = tab_group.active_tab_index();

    let mut spans: Vec<Span> = Vec::new();
    for (i, tab) in tab_group.tabs().iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let label = format!(" {}:{} ", i + 1, tab.label);
        if i == active_idx {
            spans.push(Span::styled(
                label,
                Style::default()
                    .fg(ACTIVE_FG)
                    .bg(ACTIVE_BG)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(
                label,
                Style::default().fg(INACTIVE_FG).bg(INACTIVE_BG),
            ));
        }
    }
    Line::from(spans)
}
