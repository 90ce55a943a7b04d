//! The interactive read-and-mark loop.
//!
//! ```text
//! Selecting ──entry──▶ Displaying ──any key──▶ ConfirmingMark ──▶ Selecting
//!     │                                                │
//!     └──exit / interrupt / empty list──▶ Exited       └─ yes + remote ok: remove entry
//! ```
//!
//! The session owns its [`ReadingList`] and never re-fetches it. The only
//! mutation is removing an entry after the service confirmed it read.

use crate::api::Gateway;
use crate::app::Result;
use crate::domain::{Credential, Entry, EntryId, ReadingList};
use crate::render::EntryView;

pub const MARK_READ_QUESTION: &str = "Mark as read?";

/// What the user picked from the entry menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Index into the entries shown.
    Entry(usize),
    /// The exit item or the quit key.
    Exit,
    /// Ctrl+C.
    Interrupted,
}

/// Terminal primitives the session drives.
pub trait SessionUi {
    /// Offer `entries` (in order) plus an exit item.
    fn select(&mut self, entries: &[Entry]) -> Result<Selection>;

    fn clear(&mut self) -> Result<()>;

    /// Show `view` and block until any key is pressed.
    fn show(&mut self, view: &EntryView) -> Result<()>;

    /// Ask a yes/no question. An interrupt counts as "no".
    fn confirm(&mut self, question: &str) -> Result<bool>;

    /// Tell the user something went wrong without leaving the loop.
    fn notify(&mut self, message: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Selecting,
    Displaying(EntryId),
    ConfirmingMark(EntryId),
    Exited,
}

pub struct ReadingSession<'a> {
    gateway: &'a dyn Gateway,
    credential: &'a Credential,
    list: ReadingList,
    ui: &'a mut dyn SessionUi,
}

impl<'a> ReadingSession<'a> {
    pub fn new(
        gateway: &'a dyn Gateway,
        credential: &'a Credential,
        list: ReadingList,
        ui: &'a mut dyn SessionUi,
    ) -> Self {
        Self {
            gateway,
            credential,
            list,
            ui,
        }
    }

    pub fn list(&self) -> &ReadingList {
        &self.list
    }

    /// Drive the loop until the user exits or the list runs out.
    pub async fn run(&mut self) -> Result<()> {
        let mut state = SessionState::Selecting;
        while state != SessionState::Exited {
            state = self.step(state).await?;
        }
        tracing::debug!(remaining = self.list.len(), "reading session finished");
        Ok(())
    }

    /// Perform one transition from `state`.
    pub async fn step(&mut self, state: SessionState) -> Result<SessionState> {
        match state {
            SessionState::Selecting => self.select(),
            SessionState::Displaying(id) => self.display(id),
            SessionState::ConfirmingMark(id) => self.confirm_mark(id).await,
            SessionState::Exited => Ok(SessionState::Exited),
        }
    }

    fn select(&mut self) -> Result<SessionState> {
        if self.list.is_empty() {
            return Ok(SessionState::Exited);
        }

        match self.ui.select(self.list.entries())? {
            Selection::Exit | Selection::Interrupted => Ok(SessionState::Exited),
            Selection::Entry(index) => Ok(self
                .list
                .get(index)
                .map_or(SessionState::Selecting, |entry| {
                    SessionState::Displaying(entry.id)
                })),
        }
    }

    fn display(&mut self, id: EntryId) -> Result<SessionState> {
        let Some(entry) = self.list.find(id) else {
            return Ok(SessionState::Selecting);
        };
        let view = EntryView::new(entry);

        self.ui.clear()?;
        self.ui.show(&view)?;
        Ok(SessionState::ConfirmingMark(id))
    }

    async fn confirm_mark(&mut self, id: EntryId) -> Result<SessionState> {
        if !self.ui.confirm(MARK_READ_QUESTION)? {
            return Ok(SessionState::Selecting);
        }

        match self.gateway.mark_entries_read(self.credential, &[id]).await {
            Ok(()) => {
                self.list.remove(id);
                tracing::info!(entry = id, "marked as read");
            }
            Err(e) => {
                tracing::warn!(entry = id, "mark as read failed: {}", e);
                self.ui.notify(&e.guidance())?;
            }
        }
        Ok(SessionState::Selecting)
    }
}
