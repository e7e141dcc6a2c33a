//! Scrollable aligned-row table

use super::{label_style, pane_block};
use crate::app::{App, Focus};
use crate::text::{display_width, single_line, truncate_text, MAX_CELL_WIDTH};
use ratatui::{
    layout::{Constraint, Margin, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Cell, Paragraph, Row, Scrollbar, ScrollbarOrientation, ScrollbarState, Table},
    Frame,
};

pub fn render_result_table(frame: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.focus == Focus::Result;
    let Some(comparison) = &app.comparison else {
        let block = pane_block(" Comparison Result ".to_string(), focused);
        let hint = Paragraph::new(Line::styled(
            "No comparison yet",
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        frame.render_widget(hint, area);
        return;
    };

    let columns = comparison.result.columns();
    let rows = app.visible_rows();
    let title = format!(
        " Comparison Result ({} of {} rows) ",
        rows.len(),
        comparison.result.len()
    );

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            row.cells()
                .map(|c| truncate_text(&single_line(c), MAX_CELL_WIDTH))
                .collect()
        })
        .collect();
    let widths = column_widths(&columns, &cells);

    let header = Row::new(columns.iter().map(|c| Cell::from(c.as_str())))
        .style(Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED));
    let body: Vec<Row> = rows
        .iter()
        .zip(&cells)
        .map(|(row, cells)| {
            Row::new(cells.iter().map(|c| Cell::from(c.as_str()))).style(label_style(row.label))
        })
        .collect();
    let total = body.len();

    let table = Table::new(body, widths.iter().map(|&w| Constraint::Length(w)))
        .header(header)
        .column_spacing(2)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .block(pane_block(title, focused));
    frame.render_stateful_widget(table, area, &mut app.table_state);

    let visible = area.height.saturating_sub(3) as usize;
    if total > visible {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"));
        let mut scrollbar_state =
            ScrollbarState::new(total).position(app.table_state.selected().unwrap_or(0));
        frame.render_stateful_widget(
            scrollbar,
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }
}

fn column_widths(columns: &[String], cells: &[Vec<String>]) -> Vec<u16> {
    let mut widths: Vec<usize> = columns
        .iter()
        .map(|c| display_width(c).min(MAX_CELL_WIDTH))
        .collect();
    for row in cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(display_width(cell));
        }
    }
    widths.into_iter().map(|w| w as u16).collect()
}
