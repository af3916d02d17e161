//! Overlay and modal rendering
//!
//! The modal is drawn into a scratch buffer of its full size and then
//! copied onto the frame, so a box scrolled partly out of view keeps its
//! border and title in the right place.

use super::helpers::{screen_cell, truncate, visible_rect};
use crate::config::Theme;
use crate::widget::geometry::Viewport;
use crate::widget::modal::CLOSE_CONTROL_WIDTH;
use crate::widget::overlay::Overlay;
use crate::widget::{Body, Modal};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap},
    Frame,
};
use std::time::Instant;

/// Largest scratch buffer drawn for one modal, per axis
const MAX_SCRATCH: i32 = 512;

/// Close control glyph
const CLOSE_SYMBOL: &str = "[×]";

/// Dim the page under the overlay
pub fn render_overlay(f: &mut Frame, area: Rect, overlay: &Overlay, theme: &Theme, now: Instant) {
    let style = if overlay.opacity(now) < 0.5 {
        // Early in the fade in, or late in the fade out
        Style::default().add_modifier(Modifier::DIM)
    } else {
        theme.overlay.style()
    };
    f.buffer_mut().set_style(area, style);
}

/// Draw the modal, clipped to `area`
pub fn render_modal(
    f: &mut Frame,
    area: Rect,
    viewport: Viewport,
    modal: &Modal,
    theme: &Theme,
    now: Instant,
) {
    let Some(visible) = visible_rect(area, viewport, modal.bounds()) else {
        return;
    };
    let width = modal.size.width.clamp(1, MAX_SCRATCH) as u16;
    let height = modal.size.height.clamp(1, MAX_SCRATCH) as u16;

    let mut scratch = Buffer::empty(Rect::new(0, 0, width, height));
    draw_modal(&mut scratch, modal, theme);

    let dim = modal.phase.opacity(now) < 1.0;
    let buf = f.buffer_mut();
    for y in 0..height {
        for x in 0..width {
            let Some(target) = screen_cell(
                area,
                viewport,
                modal.position.top + i32::from(y),
                modal.position.left + i32::from(x),
            ) else {
                continue;
            };
            let (Some(src), Some(dst)) = (scratch.cell((x, y)), buf.cell_mut(target)) else {
                continue;
            };
            *dst = src.clone();
            if dim {
                dst.modifier.insert(Modifier::DIM);
            }
        }
    }

    tracing::trace!(modal = %modal.id, ?visible, "Rendered modal");
}

/// Modal chrome and body at the origin of `buf`
fn draw_modal(buf: &mut Buffer, modal: &Modal, theme: &Theme) {
    let area = buf.area;
    let border_type = if modal.dragging {
        BorderType::Thick
    } else {
        BorderType::Rounded
    };

    let mut block = Block::bordered()
        .border_type(border_type)
        .border_style(theme.modal.style())
        .style(theme.modal.style())
        .padding(Padding::horizontal(1));

    if let Some(title) = &modal.title {
        let room = usize::from(area.width).saturating_sub(CLOSE_CONTROL_WIDTH as usize + 4);
        let mut style = theme.title.style();
        if modal.dragging {
            style = style.add_modifier(Modifier::REVERSED);
        }
        block = block.title_top(Line::styled(truncate(title, room), style));
    }
    if modal.show_close {
        block = block.title_top(Line::styled(CLOSE_SYMBOL, theme.close.style()).right_aligned());
    }

    let inner = block.inner(area);
    block.render(area, buf);

    match &modal.body {
        Body::Html(_) => {
            let lines: Vec<Line> = modal
                .body_lines(i32::from(inner.width))
                .into_iter()
                .map(Line::from)
                .collect();
            Paragraph::new(lines)
                .style(theme.content.style())
                .render(inner, buf);
        }
        Body::Frame(src) => {
            let frame = Block::bordered()
                .border_type(BorderType::Plain)
                .border_style(theme.modal.style())
                .title_top(Line::styled(" frame ", theme.title.style()));
            let frame_inner = frame.inner(inner);
            frame.render(inner, buf);
            Paragraph::new(vec![
                Line::styled(src.as_str(), theme.content.style().add_modifier(Modifier::UNDERLINED)),
                Line::styled("embedded document", theme.content.style().add_modifier(Modifier::DIM)),
            ])
            .wrap(Wrap { trim: true })
            .render(frame_inner, buf);
        }
    }
}
