//! Modal geometry
//!
//! All coordinates are in terminal cells and document-relative: a position
//! of `top = 40` on a page scrolled by 30 rows is drawn on screen row 10.
//! Values are signed because the clamp formulas can legitimately go
//! negative when a modal is larger than the viewport.

use serde::Serialize;

/// Visible window onto the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
    /// Rows scrolled past the top of the page
    pub scroll_top: i32,
    /// Columns scrolled past the left edge of the page
    pub scroll_left: i32,
}

impl Viewport {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            scroll_top: 0,
            scroll_left: 0,
        }
    }

    pub fn scrolled(self, scroll_top: i32, scroll_left: i32) -> Self {
        Self {
            scroll_top,
            scroll_left,
            ..self
        }
    }

    pub fn is_scrolled(&self) -> bool {
        self.scroll_top > 0 || self.scroll_left > 0
    }

    /// Convert a screen cell into document coordinates
    pub fn to_page(&self, column: i32, row: i32) -> Position {
        Position {
            top: row + self.scroll_top,
            left: column + self.scroll_left,
        }
    }
}

/// Outer dimensions of a modal box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Document-relative top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Position {
    pub top: i32,
    pub left: i32,
}

impl Position {
    pub fn new(top: i32, left: i32) -> Self {
        Self { top, left }
    }
}

/// Document-relative rectangle, used for hit testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub position: Position,
    pub size: Size,
}

impl Bounds {
    pub fn new(position: Position, size: Size) -> Self {
        Self { position, size }
    }

    pub fn contains(&self, point: Position) -> bool {
        point.top >= self.position.top
            && point.top < self.position.top + self.size.height
            && point.left >= self.position.left
            && point.left < self.position.left + self.size.width
    }
}

/// Centered placement: `max((viewport - box) / 2, 0)` on each axis
pub fn center(viewport: Viewport, size: Size) -> Position {
    Position {
        top: ((viewport.height - size.height) / 2).max(0),
        left: ((viewport.width - size.width) / 2).max(0),
    }
}

/// Pull a modal back into the visible window after a scroll or resize.
///
/// The lower bound is applied before the upper one, so a box taller than
/// the viewport ends up aligned to the bottom edge rather than the top.
pub fn clamp_to_viewport(offset: Position, viewport: Viewport, size: Size) -> Position {
    let top = offset
        .top
        .max(viewport.scroll_top)
        .min(viewport.scroll_top + (viewport.height - size.height));
    let left = offset
        .left
        .max(viewport.scroll_left)
        .min(viewport.scroll_left + (viewport.width - size.width));
    Position { top, left }
}

/// Position of a dragged modal given the pointer (page coordinates) and
/// the grab offset recorded at pointer-down.
///
/// Returns `None` when the box is taller than the viewport, where any move
/// could push the title bar out of reach.
pub fn drag_target(
    pointer: Position,
    grab: Position,
    viewport: Viewport,
    size: Size,
) -> Option<Position> {
    if size.height > viewport.height {
        return None;
    }

    let top = (pointer.top - grab.top).max(0);
    let left = (pointer.left - grab.left).max(0);

    let (max_top, max_left) = if viewport.is_scrolled() {
        (
            viewport.scroll_top + (viewport.height - size.height),
            viewport.scroll_left + (viewport.width - size.width),
        )
    } else {
        (viewport.height - size.height, viewport.width - size.width)
    };

    Some(Position {
        top: top.min(max_top),
        left: left.min(max_left),
    })
}
