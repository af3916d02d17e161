pub mod input;

use crate::widget::ModalId;

/// Application events
#[derive(Debug)]
pub enum Event {
    /// Keyboard input
    Key(crossterm::event::KeyEvent),
    /// Mouse press, drag, release or wheel
    Mouse(crossterm::event::MouseEvent),
    /// Terminal resized to (columns, rows)
    Resize(u16, u16),
    /// A modal's post-show callback fired
    Shown(ModalId),
}

impl Event {
    /// Convert a raw crossterm event, dropping the kinds we don't handle
    pub fn from_crossterm(event: crossterm::event::Event) -> Option<Self> {
        use crossterm::event::{Event as CrosstermEvent, KeyEventKind};

        match event {
            // Escape acts on release in the browser widget; terminals
            // without key release reporting only send presses
            CrosstermEvent::Key(key) if key.kind != KeyEventKind::Repeat => Some(Event::Key(key)),
            CrosstermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
            CrosstermEvent::Resize(cols, rows) => Some(Event::Resize(cols, rows)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{
        Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers,
    };

    #[test]
    fn test_from_crossterm_key_and_resize() {
        let key = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert!(matches!(
            Event::from_crossterm(CrosstermEvent::Key(key)),
            Some(Event::Key(_))
        ));
        assert!(matches!(
            Event::from_crossterm(CrosstermEvent::Resize(80, 24)),
            Some(Event::Resize(80, 24))
        ));
    }

    #[test]
    fn test_from_crossterm_drops_repeats_and_focus() {
        let repeat = KeyEvent {
            code: KeyCode::Char('j'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Repeat,
            state: KeyEventState::NONE,
        };
        assert!(Event::from_crossterm(CrosstermEvent::Key(repeat)).is_none());
        assert!(Event::from_crossterm(CrosstermEvent::FocusGained).is_none());
    }
}
