//! Modal instance and builder

use super::content::{resolve_body, resolve_title, Body};
use super::geometry::{center, Bounds, Position, Size, Viewport};
use super::options::{ModalSize, WalboxOptions};
use crate::page::{Element, Page};
use crate::text::{html_to_text, wrap};
use serde::Serialize;
use std::fmt;
use std::time::{Duration, Instant};

/// Fade-in applied when the modal and overlay appear
pub const FADE_IN: Duration = Duration::from_millis(500);

/// Fade-out applied on dismissal
pub const FADE_OUT: Duration = Duration::from_millis(400);

/// Narrowest auto-sized modal
const MIN_AUTO_WIDTH: i32 = 20;

/// Rows reserved for an embedded frame
pub const FRAME_ROWS: i32 = 8;

/// Width of the close control `[×]` in the top border
pub const CLOSE_CONTROL_WIDTH: i32 = 3;

/// Border plus one column of padding on each side
const HORIZONTAL_CHROME: i32 = 4;

/// Top and bottom border
const VERTICAL_CHROME: i32 = 2;

/// Unique modal identifier, rendered as `walbox-N`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ModalId(pub u32);

impl fmt::Display for ModalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "walbox-{}", self.0)
    }
}

/// Lifecycle phase shared by the modal and the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Inserted, fading in
    Opening { since: Instant },
    /// Fully shown
    Open,
    /// Dismissed, fading out before removal
    Closing { since: Instant },
}

impl Phase {
    /// Opacity in `0.0..=1.0` for rendering the fade
    pub fn opacity(&self, now: Instant) -> f32 {
        match *self {
            Phase::Opening { since } => {
                (now.saturating_duration_since(since).as_secs_f32() / FADE_IN.as_secs_f32())
                    .min(1.0)
            }
            Phase::Open => 1.0,
            Phase::Closing { since } => {
                1.0 - (now.saturating_duration_since(since).as_secs_f32()
                    / FADE_OUT.as_secs_f32())
                .min(1.0)
            }
        }
    }

    pub fn is_closing(&self) -> bool {
        matches!(self, Phase::Closing { .. })
    }

    /// Advance time-based transitions. Returns `true` once a closing
    /// element has finished fading and should be removed.
    pub fn advance(&mut self, now: Instant) -> bool {
        match *self {
            Phase::Opening { since } if now.saturating_duration_since(since) >= FADE_IN => {
                *self = Phase::Open;
                false
            }
            Phase::Closing { since } => now.saturating_duration_since(since) >= FADE_OUT,
            _ => false,
        }
    }
}

/// A built modal
#[derive(Debug, Clone)]
pub struct Modal {
    pub id: ModalId,
    pub size_class: ModalSize,
    /// `None` when the title region is hidden
    pub title: Option<String>,
    pub body: Body,
    pub show_close: bool,
    pub position: Position,
    pub size: Size,
    pub phase: Phase,
    /// Title bar is being dragged (move cursor, selection disabled)
    pub dragging: bool,
    options: WalboxOptions,
}

impl Modal {
    /// Build the modal structure for `options` and an optional trigger.
    ///
    /// The modal starts unpositioned at the origin; [`Modal::place`] centers it.
    pub fn build(
        id: ModalId,
        options: &WalboxOptions,
        trigger: Option<&Element>,
        page: &Page,
        now: Instant,
    ) -> Self {
        let title = options
            .show_title
            .then(|| resolve_title(options, trigger));
        let body = resolve_body(options, trigger, page);

        Self {
            id,
            size_class: options.size,
            title,
            body,
            show_close: options.show_close,
            position: Position::default(),
            size: Size::default(),
            phase: Phase::Opening { since: now },
            dragging: false,
            options: options.clone(),
        }
    }

    pub fn options(&self) -> &WalboxOptions {
        &self.options
    }

    /// Body as display lines wrapped to `width` cells
    pub fn body_lines(&self, width: i32) -> Vec<String> {
        match &self.body {
            Body::Html(html) => wrap(&html_to_text(html), width.max(1) as usize),
            Body::Frame(src) => vec![src.clone()],
        }
    }

    /// Outer size for `viewport`: explicit width/height, or auto from the
    /// size class and body length
    pub fn measure(&self, viewport: Viewport) -> Size {
        let width = self.options.explicit_width().unwrap_or_else(|| {
            (viewport.width * self.size_class.width_percent() / 100)
                .max(MIN_AUTO_WIDTH)
                .min(viewport.width.max(1))
        });

        let height = self.options.explicit_height().unwrap_or_else(|| {
            let content_rows = match self.body {
                Body::Frame(_) => FRAME_ROWS,
                Body::Html(_) => self.body_lines(width - HORIZONTAL_CHROME).len() as i32,
            };
            content_rows.max(1) + VERTICAL_CHROME
        });

        Size::new(width, height)
    }

    /// Size and center for `viewport`, honoring explicit top/left
    pub fn place(&mut self, viewport: Viewport) {
        self.size = self.measure(viewport);
        let centered = center(viewport, self.size);
        self.position = Position {
            top: self.options.explicit_top().unwrap_or(centered.top),
            left: self.options.explicit_left().unwrap_or(centered.left),
        };
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.position, self.size)
    }

    /// Close control occupies the right end of the top border
    pub fn close_bounds(&self) -> Option<Bounds> {
        self.show_close.then(|| {
            Bounds::new(
                Position::new(
                    self.position.top,
                    self.position.left + self.size.width - CLOSE_CONTROL_WIDTH - 1,
                ),
                Size::new(CLOSE_CONTROL_WIDTH, 1),
            )
        })
    }

    /// The title bar: the top border row, minus the close control
    pub fn title_contains(&self, point: Position) -> bool {
        if self.title.is_none() || point.top != self.position.top {
            return false;
        }
        if self.close_bounds().is_some_and(|b| b.contains(point)) {
            return false;
        }
        self.bounds().contains(point)
    }

    pub fn close_contains(&self, point: Position) -> bool {
        self.close_bounds().is_some_and(|b| b.contains(point))
    }

    pub fn is_interactive(&self) -> bool {
        !self.phase.is_closing()
    }
}
