//! Mouse input handling

use super::App;
use crate::widget::PointerOutcome;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use std::time::Instant;

/// Rows moved per wheel notch
const WHEEL_ROWS: i32 = 3;
/// Columns moved per horizontal wheel notch
const WHEEL_COLS: i32 = 4;

impl App {
    /// Handle mouse input
    pub(super) fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        let column = i32::from(mouse.column);
        let row = i32::from(mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                // Footer is not part of the page
                if row >= self.viewport.height {
                    return;
                }
                let point = self.viewport.to_page(column, row);
                match self.widget.pointer_down(point, now) {
                    PointerOutcome::Ignored => {
                        if let Some(index) = self.layout.element_at(point) {
                            self.activate_at(index, now);
                        }
                    }
                    outcome => {
                        tracing::debug!(?outcome, ?point, "Pointer down on widget");
                        self.needs_render = true;
                    }
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let point = self.viewport.to_page(column, row);
                if self.widget.pointer_move(point, self.viewport) {
                    self.needs_render = true;
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if self.widget.pointer_up() {
                    self.needs_render = true;
                }
            }
            MouseEventKind::ScrollDown => self.scroll_by(WHEEL_ROWS, 0, now),
            MouseEventKind::ScrollUp => self.scroll_by(-WHEEL_ROWS, 0, now),
            MouseEventKind::ScrollRight => self.scroll_by(0, WHEEL_COLS, now),
            MouseEventKind::ScrollLeft => self.scroll_by(0, -WHEEL_COLS, now),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::app::App;
    use crate::config::WalboxConfig;
    use crate::event::Event;
    use crate::page::{Element, Page};
    use crate::widget::geometry::Position;
    use crate::widget::WalboxOptions;
    use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
    use std::time::Instant;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn app() -> App {
        let mut elements = vec![Element::new("a")
            .with_class("walbox")
            .with_attr("href", "#b")
            .with_text("Open")];
        for i in 0..40 {
            elements.push(Element::new("p").with_text(&format!("line {i}")));
        }
        elements.push(Element::new("div").with_id("b").with_text("Body").hidden());
        let page = Page {
            elements,
            ..Page::default()
        };
        App::new(page, WalboxConfig::default(), None, (80, 25)).unwrap()
    }

    fn open_titled(app: &mut App, now: Instant) {
        app.open_direct_at(
            WalboxOptions {
                title: Some("Drag me".to_string()),
                content: Some("x".to_string()),
                width: Some(40),
                height: Some(6),
                ..WalboxOptions::default()
            },
            now,
        );
    }

    #[test]
    fn test_click_on_trigger_opens_modal() {
        let mut app = app();
        // First block sits at row 1, two columns in
        app.handle_event_at(
            mouse(MouseEventKind::Down(MouseButton::Left), 3, 1),
            Instant::now(),
        );
        assert!(app.widget.is_open());
    }

    #[test]
    fn test_click_on_plain_text_or_footer_does_nothing() {
        let mut app = app();
        let now = Instant::now();
        app.handle_event_at(mouse(MouseEventKind::Down(MouseButton::Left), 3, 3), now);
        app.handle_event_at(mouse(MouseEventKind::Down(MouseButton::Left), 3, 24), now);
        assert!(!app.widget.is_open());
    }

    #[test]
    fn test_click_close_control_dismisses() {
        let mut app = app();
        let now = Instant::now();
        open_titled(&mut app, now);
        let close = app.widget.modal().unwrap().close_bounds().unwrap();
        app.handle_event_at(
            mouse(
                MouseEventKind::Down(MouseButton::Left),
                close.position.left as u16,
                close.position.top as u16,
            ),
            now,
        );
        assert!(!app.widget.is_open());
    }

    #[test]
    fn test_overlay_click_is_inert_by_default() {
        let mut app = app();
        let now = Instant::now();
        open_titled(&mut app, now);
        // Outside the box, over the overlay; the trigger underneath is covered
        app.handle_event_at(mouse(MouseEventKind::Down(MouseButton::Left), 3, 1), now);
        assert!(app.widget.is_open());
        assert_eq!(app.widget.modal().unwrap().id.0, 1);
    }

    #[test]
    fn test_title_drag_moves_modal() {
        let mut app = app();
        let now = Instant::now();
        open_titled(&mut app, now);
        assert_eq!(app.widget.modal().unwrap().position, Position::new(9, 20));

        app.handle_event_at(mouse(MouseEventKind::Down(MouseButton::Left), 25, 9), now);
        assert!(app.widget.is_dragging());

        app.handle_event_at(mouse(MouseEventKind::Drag(MouseButton::Left), 30, 12), now);
        assert_eq!(app.widget.modal().unwrap().position, Position::new(12, 25));

        app.handle_event_at(mouse(MouseEventKind::Up(MouseButton::Left), 30, 12), now);
        assert!(!app.widget.is_dragging());
        assert!(!app.widget.modal().unwrap().dragging);

        // Moves after release are ignored
        app.handle_event_at(mouse(MouseEventKind::Drag(MouseButton::Left), 0, 0), now);
        assert_eq!(app.widget.modal().unwrap().position, Position::new(12, 25));
    }

    #[test]
    fn test_wheel_scrolls_page() {
        let mut app = app();
        let now = Instant::now();
        app.handle_event_at(mouse(MouseEventKind::ScrollDown, 0, 0), now);
        assert_eq!(app.viewport.scroll_top, 3);
        app.handle_event_at(mouse(MouseEventKind::ScrollUp, 0, 0), now);
        assert_eq!(app.viewport.scroll_top, 0);
    }
}
