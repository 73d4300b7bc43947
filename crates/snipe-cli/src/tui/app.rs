//! Application state and logic

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use tokio::sync::oneshot;

use snipe_core::sync::{ADD_BUSY_LABEL, ADD_IDLE_LABEL};
use snipe_core::{Row, TaskId, TaskRow};

use super::surface::UiEvent;

/// Input mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Table navigation
    Normal,
    /// Typing a course name
    Editing,
}

/// A yes/no question waiting for the user
#[derive(Debug)]
pub struct PendingConfirm {
    pub prompt: String,
    reply: oneshot::Sender<bool>,
}

/// Application state
pub struct App {
    /// Whether the app should exit
    pub should_quit: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Course name being typed
    pub course_input: String,
    /// Cursor position in course input, in characters
    pub input_cursor: usize,
    /// Current table contents
    pub rows: Vec<Row>,
    /// Task count of the last successful load
    pub total: Option<usize>,
    /// Currently selected row index
    pub selected: usize,
    /// Whether an add request is in flight
    pub add_busy: bool,
    /// Notifications waiting to be dismissed, oldest first
    pub alerts: VecDeque<String>,
    /// Questions waiting for an answer, oldest first
    pub confirms: VecDeque<PendingConfirm>,
    /// Whether help overlay is visible
    pub show_help: bool,
    /// Status message to display temporarily
    pub status_message: Option<String>,
    /// When the status message was set (for auto-dismiss)
    pub status_message_time: Option<Instant>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            input_mode: InputMode::Normal,
            course_input: String::new(),
            input_cursor: 0,
            rows: Vec::new(),
            total: None,
            selected: 0,
            add_busy: false,
            alerts: VecDeque::new(),
            confirms: VecDeque::new(),
            show_help: false,
            status_message: None,
            status_message_time: None,
        }
    }

    /// Apply an event coming from the sync client
    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::Tasks { rows, total } => {
                self.rows = rows;
                self.total = Some(total);
                self.clamp_selection();
            }
            UiEvent::LoadFailed(rows) => {
                self.rows = rows;
                self.total = None;
                self.selected = 0;
            }
            UiEvent::Alert(message) => self.alerts.push_back(message),
            UiEvent::Confirm { prompt, reply } => {
                self.confirms.push_back(PendingConfirm { prompt, reply })
            }
            UiEvent::AddBusy(busy) => self.add_busy = busy,
            UiEvent::ClearInput => {
                self.course_input.clear();
                self.input_cursor = 0;
            }
        }
    }

    /// Set a temporary status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_message_time = Some(Instant::now());
    }

    /// Check and clear expired status message
    pub fn check_status_timeout(&mut self) {
        if let Some(time) = self.status_message_time {
            if time.elapsed() > Duration::from_secs(3) {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// The selected row, if it is a task
    pub fn current_task(&self) -> Option<&TaskRow> {
        self.rows.get(self.selected).and_then(Row::as_task)
    }

    /// Course of the selected row (target of delete)
    pub fn current_course(&self) -> Option<String> {
        self.current_task().map(|t| t.course_display_name.clone())
    }

    /// Flip the selected task's enabled flag in place
    ///
    /// The table shows the new value right away; the refresh that follows
    /// the toggle request replaces it with the server's view.
    pub fn toggle_current(&mut self) -> Option<TaskId> {
        match self.rows.get_mut(self.selected) {
            Some(Row::Task(task)) => {
                task.enabled = !task.enabled;
                Some(task.id)
            }
            _ => None,
        }
    }

    /// Move selection up
    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    /// Move selection down
    pub fn move_down(&mut self) {
        if self.selected < self.rows.len().saturating_sub(1) {
            self.selected += 1;
        }
    }

    pub fn move_to_first(&mut self) {
        self.selected = 0;
    }

    pub fn move_to_last(&mut self) {
        self.selected = self.rows.len().saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.rows.len().saturating_sub(1));
    }

    /// Answer the oldest pending question
    pub fn answer_confirm(&mut self, answer: bool) {
        if let Some(pending) = self.confirms.pop_front() {
            // The asking task may already be gone
            let _ = pending.reply.send(answer);
        }
    }

    /// Dismiss the oldest notification
    pub fn dismiss_alert(&mut self) {
        self.alerts.pop_front();
    }

    /// Label of the add control
    pub fn add_button_label(&self) -> &'static str {
        if self.add_busy {
            ADD_BUSY_LABEL
        } else {
            ADD_IDLE_LABEL
        }
    }

    /// Course name to submit, or `None` while the add control is disabled
    ///
    /// The input is left as typed; it is cleared only once a search succeeds.
    pub fn submit_course(&self) -> Option<String> {
        if self.add_busy {
            return None;
        }
        Some(self.course_input.clone())
    }

    /// Focus the course input
    pub fn enter_editing(&mut self) {
        self.input_mode = InputMode::Editing;
        self.input_cursor = self.course_input.chars().count();
    }

    /// Return to table navigation
    pub fn exit_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Insert character at cursor position
    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index();
        self.course_input.insert(at, c);
        self.input_cursor += 1;
    }

    /// Delete character before cursor
    pub fn delete_char(&mut self) {
        if self.input_cursor > 0 {
            self.input_cursor -= 1;
            let at = self.byte_index();
            self.course_input.remove(at);
        }
    }

    /// Move cursor left
    pub fn cursor_left(&mut self) {
        self.input_cursor = self.input_cursor.saturating_sub(1);
    }

    /// Move cursor right
    pub fn cursor_right(&mut self) {
        if self.input_cursor < self.course_input.chars().count() {
            self.input_cursor += 1;
        }
    }

    fn byte_index(&self) -> usize {
        self.course_input
            .char_indices()
            .nth(self.input_cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.course_input.len())
    }
}
