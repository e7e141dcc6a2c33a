//! Interactive session state

use crate::cli::ExportFormat;
use crate::export::export_result;
use crate::session::{Comparison, InputError, Settings, Side};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::TableState;
use std::path::PathBuf;
use tabalign_core::AlignedRow;
use tui_textarea::TextArea;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    InputA,
    InputB,
    Result,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::InputA => Focus::InputB,
            Focus::InputB => Focus::Result,
            Focus::Result => Focus::InputA,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::InputA => Focus::Result,
            Focus::InputB => Focus::InputA,
            Focus::Result => Focus::InputB,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Success(String),
    Warning(String),
    Error(String),
}

impl Status {
    pub fn text(&self) -> &str {
        match self {
            Status::Info(s) | Status::Success(s) | Status::Warning(s) | Status::Error(s) => s,
        }
    }
}

pub struct App<'a> {
    pub input_a: TextArea<'a>,
    pub input_b: TextArea<'a>,
    pub focus: Focus,
    pub settings: Settings,
    pub comparison: Option<Comparison>,
    pub table_state: TableState,
    pub status: Status,
    pub export_path: PathBuf,
    pub should_quit: bool,
}

impl<'a> App<'a> {
    pub fn new(settings: Settings, export_path: PathBuf) -> Self {
        let mut input_a = TextArea::default();
        input_a.set_placeholder_text("Paste Excel data for A here");
        input_a.set_hard_tab_indent(true);
        let mut input_b = TextArea::default();
        input_b.set_placeholder_text("Paste Excel data for B here");
        input_b.set_hard_tab_indent(true);

        Self {
            input_a,
            input_b,
            focus: Focus::InputA,
            settings,
            comparison: None,
            table_state: TableState::default(),
            status: Status::Info("Paste data into A and B, then press F5 to compare".into()),
            export_path,
            should_quit: false,
        }
    }

    pub fn with_inputs(mut self, text_a: &str, text_b: &str) -> Self {
        if !text_a.is_empty() {
            self.input_a.insert_str(text_a);
        }
        if !text_b.is_empty() {
            self.input_b.insert_str(text_b);
        }
        self
    }

    pub fn text(&self, side: Side) -> String {
        let area = match side {
            Side::A => &self.input_a,
            Side::B => &self.input_b,
        };
        area.lines().join("\n")
    }

    /// Rows shown in the result view
    pub fn visible_rows(&self) -> Vec<&AlignedRow> {
        let only_diff = self.settings.only_diff;
        self.comparison
            .as_ref()
            .map(|c| {
                c.result
                    .rows()
                    .iter()
                    .filter(|r| !only_diff || r.label.is_difference())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn compare(&mut self) {
        let text_a = self.text(Side::A);
        let text_b = self.text(Side::B);
        match Comparison::run(&text_a, &text_b, &self.settings) {
            Ok(comparison) => {
                self.status = Status::Success(format!(
                    "{} | {} | {}",
                    comparison.shape(Side::A),
                    comparison.shape(Side::B),
                    comparison.result.summary()
                ));
                self.comparison = Some(comparison);
                self.table_state = TableState::default().with_selected(Some(0));
                self.focus = Focus::Result;
            }
            Err(err @ InputError::Missing) => {
                self.status = Status::Warning(err.to_string());
            }
            Err(err) => {
                self.status = Status::Error(err.to_string());
            }
        }
    }

    pub fn toggle_header(&mut self) {
        self.settings.paste.has_header = !self.settings.paste.has_header;
        let state = if self.settings.paste.has_header {
            "on"
        } else {
            "off"
        };
        self.status = Status::Info(format!("Header row {}", state));
        if self.comparison.is_some() {
            self.compare();
        }
    }

    pub fn toggle_only_diff(&mut self) {
        self.settings.only_diff = !self.settings.only_diff;
        self.table_state.select(Some(0));
    }

    pub fn export(&mut self) {
        let Some(comparison) = &self.comparison else {
            self.status = Status::Warning("Nothing to export yet; press F5 to compare".into());
            return;
        };
        let format = ExportFormat::from_path(&self.export_path).unwrap_or(ExportFormat::Xlsx);
        self.status = match export_result(
            &comparison.result,
            &comparison.operations,
            &self.export_path,
            format,
        ) {
            Ok(()) => Status::Success(format!("Saved {}", self.export_path.display())),
            Err(err) => Status::Error(format!("Export failed: {}", err)),
        };
    }

    pub fn handle_paste(&mut self, text: &str) {
        // Clipboard text from spreadsheets uses CRLF line endings.
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        match self.focus {
            Focus::InputA => {
                self.input_a.insert_str(text);
            }
            Focus::InputB => {
                self.input_b.insert_str(text);
            }
            Focus::Result => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => self.should_quit = true,
            KeyCode::Esc if self.focus == Focus::Result => self.should_quit = true,
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            KeyCode::F(5) => self.compare(),
            KeyCode::Char('r') if ctrl => self.compare(),
            KeyCode::F(2) => self.toggle_header(),
            KeyCode::F(3) => self.toggle_only_diff(),
            KeyCode::F(4) => self.export(),
            KeyCode::Char('s') if ctrl => self.export(),
            _ => match self.focus {
                Focus::InputA => {
                    self.input_a.input(key);
                }
                Focus::InputB => {
                    self.input_b.input(key);
                }
                Focus::Result => self.handle_result_key(key),
            },
        }
    }

    fn handle_result_key(&mut self, key: KeyEvent) {
        let len = self.visible_rows().len();
        if len == 0 {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        let next = match key.code {
            KeyCode::Down | KeyCode::Char('j') => (current + 1).min(len - 1),
            KeyCode::Up | KeyCode::Char('k') => current.saturating_sub(1),
            KeyCode::PageDown => (current + 10).min(len - 1),
            KeyCode::PageUp => current.saturating_sub(10),
            KeyCode::Home | KeyCode::Char('g') => 0,
            KeyCode::End | KeyCode::Char('G') => len - 1,
            KeyCode::Char('n') => self.next_difference(current).unwrap_or(current),
            _ => return,
        };
        self.table_state.select(Some(next));
    }

    /// Index of the first difference after `from`, in visible rows
    fn next_difference(&self, from: usize) -> Option<usize> {
        self.visible_rows()
            .iter()
            .enumerate()
            .skip(from + 1)
            .find(|(_, r)| r.label.is_difference())
            .map(|(i, _)| i)
    }
}
