use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::Result;

pub enum AppEvent {
    Key(KeyEvent),
    Resize,
}

/// Blocking terminal input.
pub struct EventHandler;

impl EventHandler {
    pub fn new() -> Self {
        Self
    }

    /// Wait for the next key press or resize.
    pub fn next(&self) -> Result<AppEvent> {
        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(AppEvent::Key(key)),
                Event::Resize(_, _) => return Ok(AppEvent::Resize),
                _ => {}
            }
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Interrupt,
    MoveUp,
    MoveDown,
    NextPage,
    PrevPage,
    Select,
    None,
}

/// Interpret a key at a yes/no prompt. `None` means keep waiting.
pub fn confirm_answer(key: &KeyEvent) -> Option<bool> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(false);
    }
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => Some(true),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Char('q') | KeyCode::Esc => {
            Some(false)
        }
        _ => None,
    }
}
