//! Home view - draft input, counters and task list

mod operations;

use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;
use std::time::{Duration, Instant};
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use super::app::Action;
use super::components::{render_text_field, task_row, HelpOverlay};
use super::dialogs::ConfirmDialog;
use super::styles::Theme;
use crate::config::UiConfig;
use crate::task::{TaskId, TaskListStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    text: String,
    kind: StatusKind,
    expires_at: Instant,
}

pub struct HomeView {
    store: TaskListStore,
    ui: UiConfig,

    // UI state
    input: Input,
    focus: Focus,
    cursor: usize,
    status: Option<StatusMessage>,

    // Dialogs
    show_help: bool,
    confirm_dialog: Option<ConfirmDialog>,
}

impl HomeView {
    pub fn new(ui: UiConfig) -> Self {
        Self {
            store: TaskListStore::new(),
            ui,
            input: Input::default(),
            focus: Focus::Input,
            cursor: 0,
            status: None,
            show_help: false,
            confirm_dialog: None,
        }
    }

    pub fn has_dialog(&self) -> bool {
        self.show_help || self.confirm_dialog.is_some()
    }

    fn selected_id(&self) -> Option<TaskId> {
        self.store.tasks().get(self.cursor).map(|t| t.id)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        // Handle dialog input first
        if self.show_help {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::F(1)
            ) {
                self.show_help = false;
            }
            return None;
        }

        if let Some(dialog) = &mut self.confirm_dialog {
            match dialog.handle_key(key) {
                super::dialogs::DialogResult::Continue => {}
                super::dialogs::DialogResult::Cancel => self.resolve_delete(false),
                super::dialogs::DialogResult::Submit(()) => self.resolve_delete(true),
            }
            return None;
        }

        match key.code {
            KeyCode::F(1) => {
                self.show_help = true;
                return None;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.switch_focus();
                return None;
            }
            _ => {}
        }

        match self.focus {
            Focus::Input => self.handle_input_key(key),
            Focus::List => self.handle_list_key(key),
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Enter => self.submit_draft(),
            KeyCode::Esc => return Some(Action::Quit),
            KeyCode::Down if !self.store.is_empty() => self.focus = Focus::List,
            _ => {
                if self.input.handle_event(&Event::Key(key)).is_some() {
                    self.store.set_pending_name(self.input.value());
                }
            }
        }
        None
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('q') => return Some(Action::Quit),
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Esc | KeyCode::Char('a') | KeyCode::Char('i') => self.focus = Focus::Input,
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::PageUp => self.move_cursor(-10),
            KeyCode::PageDown => self.move_cursor(10),
            KeyCode::Home | KeyCode::Char('g') => self.cursor = 0,
            KeyCode::End | KeyCode::Char('G') => {
                self.cursor = self.store.total_count().saturating_sub(1);
            }
            KeyCode::Char(' ') | KeyCode::Char('x') | KeyCode::Enter => self.toggle_selected(),
            KeyCode::Char('d') | KeyCode::Delete => self.request_delete(),
            _ => {}
        }
        None
    }

    fn switch_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Input if !self.store.is_empty() => Focus::List,
            _ => Focus::Input,
        };
    }

    fn move_cursor(&mut self, delta: i32) {
        let items = self.store.total_count();
        if items == 0 {
            return;
        }

        self.cursor = if delta < 0 {
            self.cursor.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            (self.cursor + delta as usize).min(items - 1)
        };
    }

    fn clamp_cursor(&mut self) {
        let items = self.store.total_count();
        if items == 0 {
            self.cursor = 0;
            self.focus = Focus::Input;
        } else if self.cursor >= items {
            self.cursor = items - 1;
        }
    }

    pub(super) fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        let ttl = Duration::from_secs(self.ui.status_timeout_secs);
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
            expires_at: Instant::now() + ttl,
        });
    }

    /// Drop the status message once it has expired. Returns true if the
    /// screen needs a redraw.
    pub fn expire_status(&mut self, now: Instant) -> bool {
        match &self.status {
            Some(status) if now >= status.expires_at => {
                self.status = None;
                true
            }
            _ => false,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        frame.render_widget(
            Block::default().style(Style::default().bg(theme.background)),
            area,
        );

        let counters_height = if self.ui.show_counters { 1 } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(2)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(counters_height),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_title(frame, chunks[0], theme);
        self.render_form(frame, chunks[1], theme);
        if self.ui.show_counters {
            self.render_counters(frame, chunks[2], theme);
        }
        self.render_list(frame, chunks[3], theme);
        self.render_status_bar(frame, chunks[4], theme);

        // Render dialogs on top
        if self.show_help {
            HelpOverlay::render(frame, area, theme);
        }

        if let Some(dialog) = &self.confirm_dialog {
            dialog.render(frame, area, theme);
        }
    }

    fn render_title(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let title = Paragraph::new(self.ui.title.as_str())
            .style(Style::default().fg(theme.title).bold())
            .alignment(Alignment::Center);
        frame.render_widget(title, area);
    }

    fn render_form(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(6)])
            .split(area);

        let focused = self.focus == Focus::Input && !self.has_dialog();
        let border = if focused { theme.accent } else { theme.border };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(theme.surface));
        let inner = block.inner(chunks[0]);
        frame.render_widget(block, chunks[0]);
        render_text_field(
            frame,
            inner,
            &self.input,
            focused,
            &self.ui.placeholder,
            theme,
        );

        // The add button is disabled until the draft has visible text.
        let (button_bg, button_fg) = if self.store.can_submit() {
            (theme.accent, theme.text)
        } else {
            (theme.disabled, theme.dimmed)
        };
        let button = Paragraph::new(Line::from(" + ").bold())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(button_bg)),
            )
            .style(Style::default().fg(button_fg).bg(button_bg));
        frame.render_widget(button, chunks[1]);
    }

    fn render_counters(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let label = Style::default().fg(theme.dimmed);
        let number = Style::default().fg(theme.accent).bold();

        let created = Line::from(vec![
            Span::styled("Created ", label),
            Span::styled(self.store.total_count().to_string(), number),
        ]);
        let completed = Line::from(vec![
            Span::styled("Completed ", label),
            Span::styled(self.store.completed_count().to_string(), number),
        ]);

        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);
        frame.render_widget(Paragraph::new(created), halves[0]);
        frame.render_widget(
            Paragraph::new(completed).alignment(Alignment::Right),
            halves[1],
        );
    }

    fn render_list(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let border = if self.focus == Focus::List {
            theme.accent
        } else {
            theme.border
        };
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(border));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.store.is_empty() {
            let empty_text = vec![
                Line::from(""),
                Line::from("You don't have any tasks yet.").style(Style::default().fg(theme.dimmed)),
                Line::from(""),
                Line::from("Type a name and press Enter").style(Style::default().fg(theme.hint)),
            ];
            let para = Paragraph::new(empty_text).alignment(Alignment::Center);
            frame.render_widget(para, inner);
            return;
        }

        let items: Vec<ListItem> = self
            .store
            .tasks()
            .iter()
            .map(|task| task_row(task, inner.width, theme))
            .collect();

        let list = List::new(items).highlight_style(Style::default().bg(theme.selection));
        let mut state = ListState::default();
        if self.focus == Focus::List {
            state.select(Some(self.cursor));
        }
        frame.render_stateful_widget(list, inner, &mut state);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if let Some(status) = &self.status {
            let color = match status.kind {
                StatusKind::Info => theme.accent,
                StatusKind::Error => theme.error,
            };
            let para = Paragraph::new(format!(" {}", status.text))
                .style(Style::default().fg(color).bg(theme.selection));
            frame.render_widget(para, area);
            return;
        }

        let key_style = Style::default().fg(theme.accent).bold();
        let desc_style = Style::default().fg(theme.dimmed);
        let sep_style = Style::default().fg(theme.border);

        let hints: &[(&str, &str)] = match self.focus {
            Focus::Input => &[("Enter", "Add"), ("Tab", "List"), ("F1", "Help"), ("Esc", "Quit")],
            Focus::List => &[
                ("j/k", "Navigate"),
                ("Space", "Toggle"),
                ("d", "Delete"),
                ("Tab", "Input"),
                ("?", "Help"),
                ("q", "Quit"),
            ],
        };

        let mut spans = Vec::new();
        for (i, (key, desc)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("│", sep_style));
            }
            spans.push(Span::styled(format!(" {}", key), key_style));
            spans.push(Span::styled(format!(" {} ", desc), desc_style));
        }

        let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.selection));
        frame.render_widget(status, area);
    }
}
