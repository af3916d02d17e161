//! Title-bar dragging
//!
//! A session starts on pointer-down over the title bar and lives until
//! pointer-up or until its modal goes away. It is owned by the manager, one
//! at a time, so handlers cannot pile up across opens.

use super::geometry::{drag_target, Position, Size, Viewport};
use super::modal::{Modal, ModalId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    pub modal: ModalId,
    /// Pointer offset from the modal's top-left corner at pointer-down
    pub grab: Position,
    /// Modal size when the drag started
    pub size: Size,
}

impl DragSession {
    pub fn begin(modal: &Modal, pointer: Position) -> Self {
        Self {
            modal: modal.id,
            grab: Position::new(
                pointer.top - modal.position.top,
                pointer.left - modal.position.left,
            ),
            size: modal.size,
        }
    }

    /// Where the modal should move for a pointer at `pointer`, or `None`
    /// when the modal is taller than the viewport
    pub fn target(&self, pointer: Position, viewport: Viewport) -> Option<Position> {
        drag_target(pointer, self.grab, viewport, self.size)
    }
}
