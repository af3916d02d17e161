//! UI rendering module for walbox
//!
//! Draws the page scrolled by the viewport, then the overlay and the modal
//! on top, then a one-line footer.

mod helpers;
mod modal;

use crate::app::{App, FOOTER_HEIGHT};
use crate::config::colors;
use crate::page::PAGE_MARGIN;
pub use helpers::truncate;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::Instant;

/// Main render function
pub fn render(f: &mut Frame, app: &App) {
    render_at(f, app, Instant::now());
}

/// Render with an explicit clock for fade opacity
pub fn render_at(f: &mut Frame, app: &App, now: Instant) {
    let [page_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(FOOTER_HEIGHT)]).areas(f.area());

    render_page(f, page_area, app);

    if let Some(overlay) = app.widget.overlay() {
        modal::render_overlay(f, page_area, overlay, &app.config.theme, now);
    }
    if let Some(m) = app.widget.modal() {
        modal::render_modal(f, page_area, app.viewport, m, &app.config.theme, now);
    }

    render_footer(f, footer_area, app);
}

fn render_page(f: &mut Frame, area: Rect, app: &App) {
    let rows = app.layout.height.max(0) as usize;
    let mut lines = vec![Line::default(); rows];
    let margin = " ".repeat(PAGE_MARGIN as usize);

    for block in &app.layout.blocks {
        let style = element_style(app, block.index);
        let top = block.bounds.position.top.max(0) as usize;
        for (i, text) in block.lines.iter().enumerate() {
            if let Some(line) = lines.get_mut(top + i) {
                *line = Line::from(vec![
                    Span::raw(margin.clone()),
                    Span::styled(text.clone(), style),
                ]);
            }
        }
    }

    let scroll = (
        app.viewport.scroll_top.clamp(0, i32::from(u16::MAX)) as u16,
        app.viewport.scroll_left.clamp(0, i32::from(u16::MAX)) as u16,
    );
    let page = Paragraph::new(lines)
        .style(Style::default().fg(colors::FG).bg(colors::BG))
        .scroll(scroll);
    f.render_widget(page, area);
}

/// Triggers look like links; the focused one stands out
fn element_style(app: &App, index: usize) -> Style {
    let Some(element) = app.page.elements.get(index) else {
        return Style::default();
    };
    if app.widget.binding_for(&app.page, index).is_some() {
        let style = Style::default()
            .fg(colors::LINK)
            .add_modifier(Modifier::UNDERLINED);
        if app.focused == Some(index) {
            return style.fg(colors::FOCUS).add_modifier(Modifier::BOLD);
        }
        return style;
    }
    match element.tag() {
        "h1" | "h2" | "h3" => Style::default()
            .fg(colors::HIGHLIGHT)
            .add_modifier(Modifier::BOLD),
        _ => Style::default().fg(colors::FG),
    }
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let left = match &app.status_message {
        Some((msg, _)) => msg.clone(),
        None if app.page.title.is_empty() => "walbox".to_string(),
        None => app.page.title.clone(),
    };

    let right = match app.widget.modal() {
        Some(m) if m.dragging => format!("{} dragging", m.id),
        Some(m) => format!("{} Esc:close x:dismiss", m.id),
        None => "Tab:focus Enter:open ?:keys q:quit".to_string(),
    };

    let width = usize::from(area.width);
    let right = truncate(&right, width);
    let left = truncate(&left, width.saturating_sub(right.chars().count() + 1));
    let gap = width.saturating_sub(left.chars().count() + right.chars().count());

    let footer = Paragraph::new(Line::from(vec![
        Span::styled(left, Style::default().fg(colors::HIGHLIGHT)),
        Span::raw(" ".repeat(gap)),
        Span::styled(right, Style::default().fg(colors::DIM)),
    ]))
    .style(Style::default().bg(colors::BG));

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WalboxConfig;
    use crate::page::{Element, Page};
    use crate::widget::WalboxOptions;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    fn app() -> App {
        let page = Page {
            title: "Demo".to_string(),
            elements: vec![
                Element::new("h1").with_text("Heading"),
                Element::new("a")
                    .with_class("walbox")
                    .with_attr("href", "#b")
                    .with_text("Open me"),
                Element::new("div").with_id("b").with_text("Secret").hidden(),
            ],
            ..Page::default()
        };
        App::new(page, WalboxConfig::default(), None, (60, 20)).unwrap()
    }

    fn screen(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buf = terminal.backend().buffer();
        (0..buf.area.height)
            .map(|y| {
                (0..buf.area.width)
                    .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_render_page_and_footer() {
        let app = app();
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();

        let rows = screen(&terminal);
        assert!(rows[1].contains("HEADING"));
        assert!(rows[3].contains("Open me"));
        assert!(!rows.iter().any(|r| r.contains("Secret")));
        assert!(rows[19].starts_with("Demo"));
    }

    #[test]
    fn test_render_open_modal() {
        let mut app = app();
        let now = Instant::now();
        app.activate_at(1, now);
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal
            .draw(|f| render_at(f, &app, now + Duration::from_secs(1)))
            .unwrap();

        let rows = screen(&terminal);
        let modal = app.widget.modal().unwrap();
        let top = modal.position.top as usize;
        assert!(rows[top].contains("Open me"));
        assert!(rows[top].contains("[×]"));
        assert!(rows[top + 1].contains("Secret"));
        assert!(rows[19].contains("walbox-1"));
    }

    #[test]
    fn test_render_clips_modal_scrolled_out_of_view() {
        let mut app = app();
        let now = Instant::now();
        app.open_direct_at(
            WalboxOptions {
                title: Some("Far".to_string()),
                top: Some(40),
                width: Some(20),
                height: Some(4),
                ..WalboxOptions::default()
            },
            now,
        );
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|f| render_at(f, &app, now)).unwrap();
        assert!(!screen(&terminal).iter().any(|r| r.contains("Far")));

        // Scrolling stops where the box's bottom edge meets the viewport's
        app.scroll_to(30, 0, now);
        assert_eq!(app.viewport.scroll_top, 25);
        terminal.draw(|f| render_at(f, &app, now)).unwrap();
        let rows = screen(&terminal);
        assert!(rows[15].contains("Far"));
    }
}
