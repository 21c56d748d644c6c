// File: ./src/tui/mod.rs
// Entry point and main loop for the TUI application.
pub mod state;
pub mod view;

use crate::cli::{EXIT_PROMPT, EXIT_TITLE};
use crate::controller::Dispatcher;
use crate::store::Confirm;
use crate::tui::state::{AppState, InputMode};
use crate::tui::view::draw;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Blocking yes/no modal drawn over the current screen.
struct ModalConfirm<'a> {
    terminal: &'a mut Tui,
    state: &'a mut AppState,
}

impl ModalConfirm<'_> {
    fn wait_for_answer(&mut self) -> io::Result<bool> {
        loop {
            self.terminal.draw(|f| draw(f, self.state))?;
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('y') | KeyCode::Char('Y') => return Ok(true),
                    KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => return Ok(false),
                    _ => {}
                }
            }
        }
    }
}

impl Confirm for ModalConfirm<'_> {
    fn confirm(&mut self, title: &str, prompt: &str) -> bool {
        let previous = std::mem::replace(
            &mut self.state.mode,
            InputMode::Confirming {
                title: title.to_string(),
                prompt: prompt.to_string(),
            },
        );
        let answer = self.wait_for_answer().unwrap_or_else(|e| {
            log::error!("Confirmation prompt failed, treating as 'no': {}", e);
            false
        });
        self.state.mode = previous;
        answer
    }
}

/// What the main loop should do after a key press.
enum Flow {
    Continue,
    Submit,
    AskExit,
}

fn handle_key_event(key: KeyEvent, state: &mut AppState) -> Flow {
    if let InputMode::Help(tab) = state.mode {
        match key.code {
            KeyCode::Tab | KeyCode::Left | KeyCode::Right => {
                state.mode = InputMode::Help(tab.toggle())
            }
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => state.mode = InputMode::Typing,
            _ => {}
        }
        return Flow::Continue;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Flow::AskExit;
    }

    match key.code {
        KeyCode::Enter => return Flow::Submit,
        KeyCode::Tab => state.autocomplete(),
        KeyCode::Char(c) => state.enter_char(c),
        KeyCode::Backspace => state.delete_char(),
        KeyCode::Delete => state.delete_char_forward(),
        KeyCode::Left => state.move_cursor_left(),
        KeyCode::Right => state.move_cursor_right(),
        KeyCode::Home => state.move_cursor_home(),
        KeyCode::End => state.move_cursor_end(),
        KeyCode::Esc => state.clear_input(),
        KeyCode::Down | KeyCode::PageDown => state.next(),
        KeyCode::Up | KeyCode::PageUp => state.previous(),
        _ => {}
    }
    Flow::Continue
}

fn confirm_exit(terminal: &mut Tui, state: &mut AppState) -> bool {
    ModalConfirm { terminal, state }.confirm(EXIT_TITLE, EXIT_PROMPT)
}

fn event_loop(terminal: &mut Tui, dispatcher: &mut Dispatcher) -> Result<()> {
    let mut state = AppState::new(dispatcher.store().list_all().to_vec());

    loop {
        terminal.draw(|f| draw(f, &mut state))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        // Filter out KeyRelease events to prevent double input on Windows
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let wants_exit = match handle_key_event(key, &mut state) {
            Flow::Continue => false,
            Flow::AskExit => true,
            Flow::Submit => {
                let line = state.take_input();
                if line.trim().is_empty() {
                    continue;
                }
                let result = {
                    let mut gate = ModalConfirm {
                        terminal: &mut *terminal,
                        state: &mut state,
                    };
                    dispatcher.execute(&line, &mut gate)
                };
                state.apply_result(result)
            }
        };

        if wants_exit && confirm_exit(terminal, &mut state) {
            return Ok(());
        }
    }
}

pub fn run(mut dispatcher: Dispatcher) -> Result<()> {
    // Leave the terminal usable if something panics mid-draw.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut dispatcher);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    log::info!("TaskFlow exiting");
    result
}
