//! Side-by-side paste areas for data sets A and B

use super::pane_block;
use crate::app::{App, Focus};
use crate::session::Side;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    Frame,
};

pub fn render_input_panes(frame: &mut Frame, app: &mut App, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let focus = app.focus;
    for (side, rect) in [(Side::A, halves[0]), (Side::B, halves[1])] {
        let focused = matches!(
            (side, focus),
            (Side::A, Focus::InputA) | (Side::B, Focus::InputB)
        );
        let lines = match side {
            Side::A => app.input_a.lines().len(),
            Side::B => app.input_b.lines().len(),
        };
        let title = format!(" Data Set {} ({} lines) ", side, lines);
        let textarea = match side {
            Side::A => &mut app.input_a,
            Side::B => &mut app.input_b,
        };
        textarea.set_block(pane_block(title, focused));
        // Hide the cursor in panes without focus.
        let cursor = if focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        textarea.set_cursor_style(cursor);
        textarea.set_cursor_line_style(Style::default());
        frame.render_widget(&*textarea, rect);
    }
}
