use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use mpqt_core::path::SEPARATOR;

const BG: Color = Color::Reset;
const ROOT_FG: Color = Color::Cyan;
const SEPARATOR_FG: Color = Color::DarkGray;
const COMPONENT_FG: Color = Color::White;
const EDIT_FG: Color = Color::Yellow;

/// Renders a breadcrumb trail for the archive path `current_path`, or the
/// text being typed when the location bar is being edited.
/// Example: " patch.mpq / World / Maps"
pub fn render_location(
    f: &mut Frame,
    area: Rect,
    archive_name: &str,
    current_path: &str,
    editing: Option<&str>,
) {
    let line = match editing {
        Some(text) => edit_line(text),
        None => breadcrumb_line(archive_name, current_path),
    };
    let paragraph = Paragraph::new(line).style(Style::default().bg(BG));
    f.render_widget(paragraph, area);
}

fn breadcrumb_line(archive_name: &str, current_path: &str) -> Line<'static> {
    let mut parts: Vec<Span> = vec![Span::styled(
        format!(" {archive_name}"),
        Style::default().fg(ROOT_FG).add_modifier(Modifier::BOLD),
    )];

    for component in current_path.split(SEPARATOR).filter(|c| !c.is_empty()) {
        parts.push(Span::styled(" / ", Style::default().fg(SEPARATOR_FG)));
        parts.push(Span::styled(
            component.to_owned(),
            Style::default().fg(COMPONENT_FG),
        ));
    }

    Line::from(parts)
}

fn edit_line(text: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            " Go to: ",
            Style::default().fg(ROOT_FG).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{text}_"), Style::default().fg(EDIT_FG)),
    ])
}
