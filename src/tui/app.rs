use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;

use crate::session::Selection;

pub const PAGE_SIZE: usize = 10;

/// Highlight position in the entry menu. The last row is the exit item.
pub struct MenuState {
    pub index: usize,
    pub len: usize,
    pub list_state: ListState,
}

impl MenuState {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            index: 0,
            len: 0,
            list_state,
        }
    }

    /// Resize for `entry_count` entries plus the exit row. A highlight that
    /// was on an entry stays on an entry while any remain.
    pub fn reset(&mut self, entry_count: usize) {
        let was_on_entry = self.index + 1 < self.len;
        self.len = entry_count + 1;
        self.index = if was_on_entry && entry_count > 0 {
            self.index.min(entry_count - 1)
        } else {
            self.index.min(self.len - 1)
        };
        self.sync();
    }

    pub fn move_up(&mut self) {
        if self.len == 0 {
            return;
        }
        self.index = if self.index == 0 {
            self.len - 1
        } else {
            self.index - 1
        };
        self.sync();
    }

    pub fn move_down(&mut self) {
        if self.len == 0 {
            return;
        }
        self.index = (self.index + 1) % self.len;
        self.sync();
    }

    pub fn next_page(&mut self) {
        let max_index = self.len.saturating_sub(1);
        self.index = (self.index + PAGE_SIZE).min(max_index);
        self.sync();
    }

    pub fn prev_page(&mut self) {
        self.index = self.index.saturating_sub(PAGE_SIZE);
        self.sync();
    }

    /// What choosing the highlighted row means.
    pub fn selection(&self) -> Selection {
        if self.index + 1 >= self.len {
            Selection::Exit
        } else {
            Selection::Entry(self.index)
        }
    }

    fn sync(&mut self) {
        self.list_state.select(Some(self.index));
    }
}

impl Default for MenuState {
    fn default() -> Self {
        Self::new()
    }
}

/// Scroll position while an entry is on screen.
#[derive(Debug, Default)]
pub struct ViewerState {
    pub scroll: u16,
    pub max_scroll: u16,
    /// Rows moved by PgUp/PgDn: the viewport height.
    pub page: u16,
}

impl ViewerState {
    pub fn new(content_height: u16, viewport_height: u16) -> Self {
        Self {
            scroll: 0,
            max_scroll: content_height.saturating_sub(viewport_height),
            page: viewport_height.max(1),
        }
    }

    /// Adopt new dimensions after a terminal resize, keeping the scroll
    /// position where it still fits.
    pub fn resize(&mut self, content_height: u16, viewport_height: u16) {
        self.max_scroll = content_height.saturating_sub(viewport_height);
        self.page = viewport_height.max(1);
        self.scroll = self.scroll.min(self.max_scroll);
    }

    pub fn overflows(&self) -> bool {
        self.max_scroll > 0
    }

    /// Handle a key press. Returns `true` once the user has acknowledged.
    ///
    /// Arrow and page keys scroll while the entry is taller than the screen;
    /// every other key acknowledges.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if !self.overflows() || key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        match key.code {
            KeyCode::Down => self.scroll = (self.scroll + 1).min(self.max_scroll),
            KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::PageDown => {
                self.scroll = self.scroll.saturating_add(self.page).min(self.max_scroll)
            }
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(self.page),
            _ => return true,
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_navigation_wraps_both_ways() {
        let mut menu = MenuState::new();
        menu.reset(2);
        assert_eq!(menu.len, 3);

        menu.move_up();
        assert_eq!(menu.index, 2);
        assert_eq!(menu.selection(), Selection::Exit);

        menu.move_down();
        assert_eq!(menu.index, 0);
        assert_eq!(menu.selection(), Selection::Entry(0));
        assert_eq!(menu.list_state.selected(), Some(0));
    }

    #[test]
    fn test_paging_clamps() {
        let mut menu = MenuState::new();
        menu.reset(25);
        menu.next_page();
        assert_eq!(menu.index, 10);
        menu.next_page();
        menu.next_page();
        assert_eq!(menu.index, 25);
        menu.prev_page();
        assert_eq!(menu.index, 15);
    }

    #[test]
    fn test_reset_after_removal_keeps_highlight_in_range() {
        let mut menu = MenuState::new();
        menu.reset(3);
        menu.move_up(); // exit row
        menu.move_up(); // last entry, index 2
        assert_eq!(menu.selection(), Selection::Entry(2));

        menu.reset(2);
        assert_eq!(menu.index, 1);
        assert_eq!(menu.selection(), Selection::Entry(1));

        menu.reset(0);
        assert_eq!(menu.index, 0);
        assert_eq!(menu.selection(), Selection::Exit);
    }

    #[test]
    fn test_removing_last_entry_keeps_highlight_off_exit() {
        let mut menu = MenuState::new();
        menu.reset(3);
        menu.next_page();
        menu.move_up();
        assert_eq!(menu.selection(), Selection::Entry(2));

        menu.reset(2);
        assert_eq!(menu.selection(), Selection::Entry(1));
        assert_eq!(menu.list_state.selected(), Some(1));
    }

    #[test]
    fn test_exit_highlight_survives_reset() {
        let mut menu = MenuState::new();
        menu.reset(2);
        menu.move_up();
        menu.reset(2);
        assert_eq!(menu.selection(), Selection::Exit);
    }

    #[test]
    fn test_viewer_any_key_acknowledges_short_entry() {
        let mut viewer = ViewerState::new(5, 20);
        assert!(!viewer.overflows());
        assert!(viewer.handle_key(&key(KeyCode::Down)));
    }

    #[test]
    fn test_viewer_scrolls_long_entry() {
        let mut viewer = ViewerState::new(50, 18);
        assert_eq!(viewer.max_scroll, 32);

        assert!(!viewer.handle_key(&key(KeyCode::PageDown)));
        assert_eq!(viewer.scroll, 18);
        assert!(!viewer.handle_key(&key(KeyCode::PageDown)));
        assert_eq!(viewer.scroll, 32);
        assert!(!viewer.handle_key(&key(KeyCode::Up)));
        assert_eq!(viewer.scroll, 31);

        assert!(viewer.handle_key(&key(KeyCode::Char('x'))));
    }

    #[test]
    fn test_viewer_pages_by_resized_height() {
        let mut viewer = ViewerState::new(100, 20);
        viewer.scroll = 70;

        viewer.resize(100, 40);
        assert_eq!(viewer.max_scroll, 60);
        assert_eq!(viewer.scroll, 60);

        assert!(!viewer.handle_key(&key(KeyCode::PageUp)));
        assert_eq!(viewer.scroll, 20);
    }
}
