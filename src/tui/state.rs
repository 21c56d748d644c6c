// File: ./src/tui/state.rs
// Everything the TUI draws. The dispatcher lives outside this struct so a
// confirmation modal can borrow the state while a command is running.
use crate::controller::{CommandResult, Signal, View};
use crate::help::HelpTab;
use crate::model::{Event, complete_keyword};
use ratatui::widgets::ListState;

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Typing,
    Help(HelpTab),
    Confirming { title: String, prompt: String },
}

pub struct AppState {
    pub events: Vec<Event>,
    pub list_state: ListState,
    pub mode: InputMode,
    pub message: String,

    pub input_buffer: String,
    /// Cursor position in characters, not bytes.
    pub cursor_position: usize,
}

impl AppState {
    pub fn new(events: Vec<Event>) -> Self {
        let mut state = Self {
            events: Vec::new(),
            list_state: ListState::default(),
            mode: InputMode::Typing,
            message: "Type a command to get started!".to_string(),
            input_buffer: String::new(),
            cursor_position: 0,
        };
        state.set_events(events);
        state
    }

    pub fn set_events(&mut self, events: Vec<Event>) {
        self.events = events;
        self.list_state
            .select(if self.events.is_empty() { None } else { Some(0) });
    }

    /// Apply a dispatcher answer. Returns true if the UI must ask about exiting.
    pub fn apply_result(&mut self, result: CommandResult) -> bool {
        self.message = result.status;
        if let View::Events(events) = result.view {
            self.set_events(events);
        }
        match result.signal {
            Signal::None => false,
            Signal::ShowHelp => {
                self.mode = InputMode::Help(HelpTab::default());
                false
            }
            Signal::ExitRequested => true,
        }
    }

    // --- List navigation ---

    pub fn next(&mut self) {
        if self.events.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < self.events.len() => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.events.is_empty() {
            return;
        }
        let i = self.list_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.list_state.select(Some(i));
    }

    // --- Input editing ---

    fn byte_index(&self) -> usize {
        self.input_buffer
            .char_indices()
            .nth(self.cursor_position)
            .map_or(self.input_buffer.len(), |(i, _)| i)
    }

    pub fn enter_char(&mut self, c: char) {
        let idx = self.byte_index();
        self.input_buffer.insert(idx, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        self.cursor_position -= 1;
        let idx = self.byte_index();
        self.input_buffer.remove(idx);
    }

    pub fn delete_char_forward(&mut self) {
        if self.cursor_position < self.input_buffer.chars().count() {
            let idx = self.byte_index();
            self.input_buffer.remove(idx);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        let len = self.input_buffer.chars().count();
        self.cursor_position = (self.cursor_position + 1).min(len);
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.input_buffer.chars().count();
    }

    pub fn clear_input(&mut self) {
        self.input_buffer.clear();
        self.cursor_position = 0;
    }

    /// Takes the current line out of the input field.
    pub fn take_input(&mut self) -> String {
        self.cursor_position = 0;
        std::mem::take(&mut self.input_buffer)
    }

    /// Replace a partial keyword with the first matching command.
    pub fn autocomplete(&mut self) {
        if let Some(completed) = complete_keyword(&self.input_buffer) {
            self.input_buffer = completed;
            self.move_cursor_end();
        }
    }
}
