//! Keyboard input handling

use super::App;
use crate::widget::{DismissReason, ModalSize, WalboxOptions};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Instant;

/// Body of the `?` help box
const HELP_TEXT: &str = "<p>Mouse: click a link to open it, drag the title bar to move the box, click [×] to close.</p>\
<p>Esc: close the box (while the overlay is up)</p>\
<p>x: close the box regardless</p>\
<p>Tab / Shift+Tab: focus next / previous link</p>\
<p>Enter: open the focused link</p>\
<p>j k ↑ ↓: scroll a line</p>\
<p>PgUp PgDn Space: scroll a page</p>\
<p>h l ← →: scroll sideways</p>\
<p>g G: top / bottom</p>\
<p>q, Ctrl+C: quit</p>";

impl App {
    /// Handle keyboard input
    pub(super) fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        // Handle Ctrl+C always
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        // Escape fires on release where the terminal reports it, on press
        // otherwise; never on both
        if key.code == KeyCode::Esc {
            if key.kind == KeyEventKind::Press && self.release_reported {
                return;
            }
            if key.kind == KeyEventKind::Release {
                self.release_reported = true;
            }
            if !self.widget.escape(now) {
                self.focused = None;
            }
            return;
        }
        if key.kind == KeyEventKind::Release {
            self.release_reported = true;
            return;
        }

        let page_rows = (self.viewport.height - 1).max(1);

        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('x') => {
                self.widget.dismiss(DismissReason::Programmatic, now);
            }
            KeyCode::Char('?') => {
                self.open_direct_at(
                    WalboxOptions {
                        title: Some("Keys".to_string()),
                        content: Some(HELP_TEXT.to_string()),
                        size: ModalSize::Large,
                        overlay: true,
                        ..WalboxOptions::default()
                    },
                    now,
                );
            }
            KeyCode::Tab => self.focus_next(true, now),
            KeyCode::BackTab => self.focus_next(false, now),
            KeyCode::Enter => {
                if let Some(index) = self.focused {
                    self.activate_at(index, now);
                }
            }
            KeyCode::Char('j') | KeyCode::Down => self.scroll_by(1, 0, now),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_by(-1, 0, now),
            KeyCode::Char('h') | KeyCode::Left => self.scroll_by(0, -4, now),
            KeyCode::Char('l') | KeyCode::Right => self.scroll_by(0, 4, now),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_by(page_rows, 0, now),
            KeyCode::PageUp => self.scroll_by(-page_rows, 0, now),
            KeyCode::Char('g') | KeyCode::Home => {
                self.scroll_to(0, self.viewport.scroll_left, now);
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.scroll_to(i32::MAX / 2, self.viewport.scroll_left, now);
            }
            _ => {}
        }
    }
}
