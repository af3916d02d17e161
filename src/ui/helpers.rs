//! UI helper functions

use crate::text::display_width;
use crate::widget::geometry::{Bounds, Viewport};
use ratatui::layout::Rect;

/// Truncate a string to `max_width` display cells with ellipsis
pub fn truncate(s: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if display_width(s) <= max_width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = display_width(c.encode_utf8(&mut [0; 4]));
        if used + w > max_width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Screen cell for a document-relative coordinate, if it lands in `area`
pub fn screen_cell(area: Rect, viewport: Viewport, top: i32, left: i32) -> Option<(u16, u16)> {
    let x = left - viewport.scroll_left;
    let y = top - viewport.scroll_top;
    if x < 0 || y < 0 || x >= i32::from(area.width) || y >= i32::from(area.height) {
        return None;
    }
    Some((area.x + x as u16, area.y + y as u16))
}

/// Part of `bounds` visible in `area`, in screen coordinates
pub fn visible_rect(area: Rect, viewport: Viewport, bounds: Bounds) -> Option<Rect> {
    let left = (bounds.position.left - viewport.scroll_left).max(0);
    let top = (bounds.position.top - viewport.scroll_top).max(0);
    let right = (bounds.position.left + bounds.size.width - viewport.scroll_left)
        .min(i32::from(area.width));
    let bottom = (bounds.position.top + bounds.size.height - viewport.scroll_top)
        .min(i32::from(area.height));
    if right <= left || bottom <= top {
        return None;
    }
    Some(Rect::new(
        area.x + left as u16,
        area.y + top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    ))
}
