pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::api::Gateway;
use crate::app::Result;
use crate::config::{ColorConfig, Config, KeybindingConfig};
use crate::domain::{Credential, Entry, ReadingList};
use crate::render::EntryView;
use crate::session::{ReadingSession, Selection, SessionUi};

use self::app::{MenuState, ViewerState};
use self::event::{confirm_answer, Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Run a reading session over `list` in the alternate screen.
pub async fn run(
    gateway: &dyn Gateway,
    credential: &Credential,
    list: ReadingList,
    config: &Config,
) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = {
        let mut ui = TerminalUi::new(&mut terminal, config);
        let mut session = ReadingSession::new(gateway, credential, list, &mut ui);
        session.run().await
    };
    let restored = restore_terminal(&mut terminal);
    session_outcome(result, restored)
}

/// The session's own error wins over a failure to restore the terminal.
fn session_outcome(session: Result<()>, restored: Result<()>) -> Result<()> {
    session.and(restored)
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    undo_on_error(enter_alternate_screen(), || {
        let _ = disable_raw_mode();
    })
}

fn enter_alternate_screen() -> Result<Tui> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn undo_on_error<T>(result: Result<T>, undo: impl FnOnce()) -> Result<T> {
    if result.is_err() {
        undo();
    }
    result
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// [`SessionUi`] drawn with ratatui.
pub struct TerminalUi<'a> {
    terminal: &'a mut Tui,
    colors: &'a ColorConfig,
    keybindings: &'a KeybindingConfig,
    events: EventHandler,
    menu: MenuState,
    status: Option<String>,
    current: Option<(EntryView, u16)>,
}

impl<'a> TerminalUi<'a> {
    pub fn new(terminal: &'a mut Tui, config: &'a Config) -> Self {
        Self {
            terminal,
            colors: &config.colors,
            keybindings: &config.keybindings,
            events: EventHandler::new(),
            menu: MenuState::new(),
            status: None,
            current: None,
        }
    }

    /// Rows available for entry text inside the border, above the status bar.
    fn viewport(&self) -> Result<(u16, u16)> {
        let size = self.terminal.size()?;
        Ok((size.width.saturating_sub(2), size.height.saturating_sub(3)))
    }
}

impl SessionUi for TerminalUi<'_> {
    fn select(&mut self, entries: &[Entry]) -> Result<Selection> {
        self.current = None;
        self.menu.reset(entries.len());

        loop {
            let status = self.status.as_deref();
            let (menu, colors) = (&mut self.menu, self.colors);
            self.terminal
                .draw(|frame| layout::render_menu(frame, entries, menu, colors, status))?;

            let key = match self.events.next()? {
                AppEvent::Key(key) => key,
                AppEvent::Resize => continue,
            };

            match self.keybindings.get_action(&key) {
                Action::Interrupt => return Ok(Selection::Interrupted),
                Action::Quit => return Ok(Selection::Exit),
                Action::MoveUp => self.menu.move_up(),
                Action::MoveDown => self.menu.move_down(),
                Action::NextPage => self.menu.next_page(),
                Action::PrevPage => self.menu.prev_page(),
                Action::Select => {
                    self.status = None;
                    return Ok(self.menu.selection());
                }
                Action::None => {}
            }
        }
    }

    fn clear(&mut self) -> Result<()> {
        self.terminal.clear()?;
        Ok(())
    }

    fn show(&mut self, view: &EntryView) -> Result<()> {
        let text = view.to_string();
        let (width, height) = self.viewport()?;
        let mut viewer = ViewerState::new(layout::wrapped_height(&text, width), height);

        loop {
            let colors = self.colors;
            let scroll = viewer.scroll;
            self.terminal
                .draw(|frame| layout::render_entry(frame, view, scroll, colors))?;

            match self.events.next()? {
                AppEvent::Resize => {
                    let (width, height) = self.viewport()?;
                    viewer.resize(layout::wrapped_height(&text, width), height);
                }
                AppEvent::Key(key) => {
                    if viewer.handle_key(&key) {
                        break;
                    }
                }
            }
        }

        self.current = Some((view.clone(), viewer.scroll));
        Ok(())
    }

    fn confirm(&mut self, question: &str) -> Result<bool> {
        loop {
            let colors = self.colors;
            let current = self.current.as_ref();
            self.terminal.draw(|frame| {
                if let Some((view, scroll)) = current {
                    layout::render_entry(frame, view, *scroll, colors);
                }
                layout::render_confirm(frame, question, colors);
            })?;

            if let AppEvent::Key(key) = self.events.next()? {
                if let Some(answer) = confirm_answer(&key) {
                    return Ok(answer);
                }
            }
        }
    }

    fn notify(&mut self, message: &str) -> Result<()> {
        self.status = Some(message.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::BrookError;

    fn config_error(message: &str) -> BrookError {
        BrookError::Config(message.to_string())
    }

    #[test]
    fn test_session_error_wins_over_restore_error() {
        let err = session_outcome(Err(config_error("session")), Err(config_error("restore")))
            .unwrap_err();
        assert!(matches!(err, BrookError::Config(ref m) if m == "session"));

        let err = session_outcome(Ok(()), Err(config_error("restore"))).unwrap_err();
        assert!(matches!(err, BrookError::Config(ref m) if m == "restore"));
        assert!(session_outcome(Ok(()), Ok(())).is_ok());
    }

    #[test]
    fn test_setup_failure_undoes_raw_mode() {
        let mut undone = false;
        let result: Result<()> = undo_on_error(Err(config_error("no tty")), || undone = true);
        assert!(result.is_err());
        assert!(undone);

        let mut undone = false;
        undo_on_error(Ok(()), || undone = true).unwrap();
        assert!(!undone);
    }
}
