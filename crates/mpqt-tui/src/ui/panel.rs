//! Archive listing rendered as a three-column table.
//!
//! Rows, cells and icon names all come from the [`Panel`]; this module
//! only styles them. The sorted column's header carries the direction
//! arrow and marked rows carry a `*` gutter.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};
use mpqt_core::nav::panel::{Column, Panel, SortSettings};
use mpqt_core::Entry;

use crate::icons::{glyph_for, plain_marker, GlyphTheme};

const SELECTED_FG: Color = Color::Cyan;
const DIR_FG: Color = Color::Blue;
const MARK_FG: Color = Color::Yellow;
const TYPE_FG: Color = Color::DarkGray;

/// Renders the listing of `panel`.
pub fn render_panel(
    f: &mut Frame,
    area: Rect,
    panel: &Panel,
    title: &str,
    show_icons: bool,
    show_type_column: bool,
) {
    let columns: Vec<Column> = Column::ALL
        .into_iter()
        .filter(|c| show_type_column || *c != Column::Type)
        .collect();

    let header = Row::new(
        columns
            .iter()
            .map(|c| Cell::from(header_title(*c, panel.sort()))),
    )
    .style(Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED));

    let rows: Vec<Row> = (0..panel.row_count())
        .filter_map(|row| {
            let entry = panel.entry(row)?;
            let cells = columns.iter().map(|column| match column {
                Column::Name => Cell::from(name_line(panel, row, entry, show_icons)),
                Column::Size => Cell::from(
                    Line::from(panel.cell(row, Column::Size).unwrap_or_default()).right_aligned(),
                ),
                Column::Type => Cell::from(Span::styled(
                    panel.cell(row, Column::Type).unwrap_or_default(),
                    Style::default().fg(TYPE_FG),
                )),
            });
            Some(Row::new(cells))
        })
        .collect();

    let widths: Vec<Constraint> = columns
        .iter()
        .map(|c| match c {
            Column::Name => Constraint::Fill(3),
            Column::Size => Constraint::Length(11),
            Column::Type => Constraint::Fill(2),
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_owned())
                .border_style(Style::default().fg(SELECTED_FG)),
        )
        .row_highlight_style(
            Style::default()
                .add_modifier(Modifier::REVERSED)
                .fg(SELECTED_FG),
        )
        .highlight_symbol("> ");

    let mut state = TableState::default();
    if panel.row_count() > 0 {
        state.select(Some(panel.selected_index()));
    }

    f.render_stateful_widget(table, area, &mut state);
}

/// Column title, with the direction arrow on the sorted column.
fn header_title(column: Column, sort: SortSettings) -> String {
    if column.sort_key() == sort.key {
        format!("{} {}", column.title(), sort.direction.arrow())
    } else {
        column.title().to_owned()
    }
}

fn name_line(panel: &Panel, row: usize, entry: &Entry, show_icons: bool) -> Line<'static> {
    let mark = if panel.is_marked(entry) {
        Span::styled("*", Style::default().fg(MARK_FG).add_modifier(Modifier::BOLD))
    } else {
        Span::raw(" ")
    };
    let icon = if show_icons {
        panel
            .icon(row, &GlyphTheme)
            .map(|name| glyph_for(&name))
            .unwrap_or_default()
    } else {
        plain_marker(entry.is_dir())
    };
    Line::from(vec![
        mark,
        Span::raw(icon),
        Span::styled(entry.name().to_owned(), entry_style(entry)),
    ])
}

fn entry_style(entry: &Entry) -> Style {
    if entry.is_dir() {
        Style::default().fg(DIR_FG).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}
