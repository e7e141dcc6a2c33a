//! View rendering modules

mod input_panes;
mod result_table;

pub use input_panes::render_input_panes;
pub use result_table::render_result_table;

use crate::app::{App, Status};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use tabalign_core::DiffLabel;

const HELP: &[(&str, &str)] = &[
    ("Tab", "focus"),
    ("F5", "compare"),
    ("F2", "header"),
    ("F3", "only diffs"),
    ("F4", "export"),
    ("n", "next diff"),
    ("Ctrl-Q", "quit"),
];

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_input_panes(frame, app, chunks[0]);
    render_result_table(frame, app, chunks[1]);
    render_status(frame, &app.status, chunks[2]);
    render_help(frame, app, chunks[3]);
}

/// Bordered block, highlighted when it has focus
fn pane_block(title: String, focused: bool) -> Block<'static> {
    let (border_style, border_type) = if focused {
        (Style::default().fg(Color::Cyan), BorderType::Thick)
    } else {
        (Style::default().fg(Color::DarkGray), BorderType::Rounded)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style)
        .title(Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        ))
}

pub(crate) fn label_style(label: DiffLabel) -> Style {
    match label {
        DiffLabel::Match => Style::default(),
        DiffLabel::Mismatch => Style::default().fg(Color::Yellow),
        DiffLabel::OnlyInA => Style::default().fg(Color::Red),
        DiffLabel::OnlyInB => Style::default().fg(Color::Green),
    }
}

fn render_status(frame: &mut Frame, status: &Status, area: Rect) {
    let style = match status {
        Status::Info(_) => Style::default().fg(Color::Gray),
        Status::Success(_) => Style::default().fg(Color::Green),
        Status::Warning(_) => Style::default().fg(Color::Yellow),
        Status::Error(_) => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    };
    frame.render_widget(Paragraph::new(Span::styled(status.text(), style)), area);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(Color::DarkGray);

    let mut spans = Vec::new();
    for (key, action) in HELP {
        spans.push(Span::styled(*key, key_style));
        spans.push(Span::styled(format!(" {}  ", action), dim));
    }
    let flag = |on: bool| if on { "on" } else { "off" };
    spans.push(Span::styled(
        format!(
            "header:{} only-diffs:{}",
            flag(app.settings.paste.has_header),
            flag(app.settings.only_diff)
        ),
        dim,
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
