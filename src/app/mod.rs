//! Application state and logic
//!
//! This module contains the main `App` struct: the page, its layout, the
//! viewport onto it and the [`WidgetManager`] holding the lightbox state.
//! Keyboard and mouse handling live in sub-modules.
//!
//! Every handler has an `_at` twin taking an explicit `Instant` so tests can
//! drive fades, debounces and callbacks without sleeping.

mod keyboard;
mod mouse;

use crate::config::WalboxConfig;
use crate::errors::Result;
use crate::event::Event;
use crate::page::{Page, PageLayout};
use crate::widget::geometry::Viewport;
use crate::widget::{ModalId, ShowCallback, WalboxOptions, WidgetManager};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Rows reserved below the page for the footer
pub const FOOTER_HEIGHT: u16 = 1;

/// Selector bound when a page declares no bindings
pub const DEFAULT_SELECTOR: &str = ".walbox";

/// How long footer status messages stay up
const STATUS_TTL: Duration = Duration::from_secs(5);

/// Bind every selector the page declares, with config defaults underneath.
/// A page without bindings gets `.walbox`.
pub fn bind_page(
    widget: &mut WidgetManager,
    page: &Page,
    config: &WalboxConfig,
    action: Option<&ShowCallback>,
) -> Result<()> {
    let with_action = |options: WalboxOptions| match action {
        Some(action) => options.with_action(action.clone()),
        None => options,
    };

    if page.bindings.is_empty() {
        widget.bind(DEFAULT_SELECTOR, with_action(config.defaults.resolve()))?;
        return Ok(());
    }
    for spec in &page.bindings {
        let options = config.defaults.layered(&spec.options).resolve();
        widget.bind(&spec.selector, with_action(options))?;
    }
    Ok(())
}

/// Application state and logic
pub struct App {
    pub page: Page,
    /// Page laid out for the current viewport width
    pub layout: PageLayout,
    pub widget: WidgetManager,
    pub viewport: Viewport,
    pub config: WalboxConfig,
    pub should_quit: bool,
    /// Dirty flag: true if UI needs re-render (render-on-change optimization)
    pub needs_render: bool,
    /// Trigger element focused from the keyboard
    pub focused: Option<usize>,
    /// Status message to display in footer (message, timestamp)
    pub status_message: Option<(String, Instant)>,
    /// Terminal sends key release events
    release_reported: bool,
    /// Callback sending `Event::Shown` back into the event loop
    action: Option<ShowCallback>,
}

impl App {
    /// Build the app for a terminal of `size` (columns, rows)
    pub fn new(
        page: Page,
        config: WalboxConfig,
        event_tx: Option<mpsc::Sender<Event>>,
        size: (u16, u16),
    ) -> Result<Self> {
        let action = event_tx.map(|tx| {
            ShowCallback::new(move |id| {
                if let Err(e) = tx.try_send(Event::Shown(id)) {
                    tracing::debug!("Dropped shown notification for {}: {}", id, e);
                }
            })
        });

        let mut widget = WidgetManager::new();
        bind_page(&mut widget, &page, &config, action.as_ref())?;
        tracing::debug!(bindings = widget.bindings().len(), "Page bound");

        let viewport = viewport_for(size);
        let layout = page.layout(viewport.width);

        Ok(Self {
            page,
            layout,
            widget,
            viewport,
            config,
            should_quit: false,
            needs_render: true, // Always render first frame
            focused: None,
            status_message: None,
            release_reported: false,
            action,
        })
    }

    /// Show a status message in the footer (clears after 5 seconds)
    pub fn show_status(&mut self, msg: &str) {
        self.status_message = Some((msg.to_string(), Instant::now()));
        self.needs_render = true;
    }

    /// Open a modal without a trigger element
    pub fn open_direct(&mut self, options: WalboxOptions) -> ModalId {
        self.open_direct_at(options, Instant::now())
    }

    pub fn open_direct_at(&mut self, options: WalboxOptions, now: Instant) -> ModalId {
        let options = match &self.action {
            Some(action) if options.action.is_none() => options.with_action(action.clone()),
            _ => options,
        };
        let id = self
            .widget
            .open(&options, None, &self.page, self.viewport, now);
        self.needs_render = true;
        id
    }

    /// Click (or Enter) on a page element
    pub fn activate_at(&mut self, index: usize, now: Instant) {
        match self
            .widget
            .click_element(&self.page, index, self.viewport, now)
        {
            Some(id) => {
                self.focused = Some(index);
                tracing::debug!(element = index, modal = %id, "Trigger activated");
            }
            None => {
                tracing::debug!(element = index, "Clicked element is not a trigger");
            }
        }
        self.needs_render = true;
    }

    /// Handle incoming events
    pub fn handle_event(&mut self, event: Event) {
        self.handle_event_at(event, Instant::now());
    }

    pub fn handle_event_at(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(key) => {
                self.handle_key(key, now);
                self.needs_render = true;
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse, now),
            Event::Resize(cols, rows) => self.resize((cols, rows), now),
            Event::Shown(id) => {
                tracing::info!(modal = %id, "Modal shown");
                self.show_status(&format!("{id} shown"));
            }
        }
    }

    /// Terminal resized
    pub fn resize(&mut self, size: (u16, u16), now: Instant) {
        let viewport = viewport_for(size);
        if viewport.width != self.layout.width {
            self.layout = self.page.layout(viewport.width);
        }
        self.viewport = viewport.scrolled(self.viewport.scroll_top, self.viewport.scroll_left);
        self.clamp_scroll();
        self.widget.resize(self.viewport, now);
        self.needs_render = true;
    }

    /// Scroll the page by a number of rows and columns
    pub fn scroll_by(&mut self, rows: i32, cols: i32, now: Instant) {
        self.scroll_to(
            self.viewport.scroll_top + rows,
            self.viewport.scroll_left + cols,
            now,
        );
    }

    pub fn scroll_to(&mut self, top: i32, left: i32, now: Instant) {
        let before = (self.viewport.scroll_top, self.viewport.scroll_left);
        self.viewport.scroll_top = top;
        self.viewport.scroll_left = left;
        self.clamp_scroll();
        if before != (self.viewport.scroll_top, self.viewport.scroll_left) {
            self.widget.scroll(self.viewport, now);
            self.needs_render = true;
        }
    }

    /// Scrollable extent: the page, or the modal if it reaches further
    fn extent(&self) -> (i32, i32) {
        let (mut height, mut width) = (self.layout.height, self.layout.content_width);
        if let Some(modal) = self.widget.modal() {
            height = height.max(modal.position.top + modal.size.height);
            width = width.max(modal.position.left + modal.size.width);
        }
        (height, width)
    }

    fn clamp_scroll(&mut self) {
        let (height, width) = self.extent();
        let max_top = (height - self.viewport.height).max(0);
        let max_left = (width - self.viewport.width).max(0);
        self.viewport.scroll_top = self.viewport.scroll_top.clamp(0, max_top);
        self.viewport.scroll_left = self.viewport.scroll_left.clamp(0, max_left);
    }

    /// Bound, visible trigger elements in page order
    pub fn triggers(&self) -> Vec<usize> {
        self.layout
            .blocks
            .iter()
            .map(|b| b.index)
            .filter(|&i| self.widget.binding_for(&self.page, i).is_some())
            .collect()
    }

    /// Move keyboard focus to the next (or previous) trigger
    pub fn focus_next(&mut self, forward: bool, now: Instant) {
        let triggers = self.triggers();
        if triggers.is_empty() {
            return;
        }
        let current = self
            .focused
            .and_then(|f| triggers.iter().position(|&i| i == f));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => triggers.len() - 1,
            (Some(i), true) => (i + 1) % triggers.len(),
            (Some(i), false) => (i + triggers.len() - 1) % triggers.len(),
        };
        self.focused = Some(triggers[next]);
        self.scroll_into_view(triggers[next], now);
    }

    fn scroll_into_view(&mut self, index: usize, now: Instant) {
        let Some(block) = self.layout.block_for(index) else {
            return;
        };
        let top = block.bounds.position.top;
        let bottom = top + block.bounds.size.height;
        if top < self.viewport.scroll_top {
            self.scroll_to(top - 1, self.viewport.scroll_left, now);
        } else if bottom > self.viewport.scroll_top + self.viewport.height {
            self.scroll_to(bottom - self.viewport.height + 1, self.viewport.scroll_left, now);
        }
    }

    /// Tick for timers and re-renders
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        if self.widget.tick(now) {
            self.needs_render = true;
        }

        if let Some((_, at)) = &self.status_message {
            if now.saturating_duration_since(*at) >= STATUS_TTL {
                self.status_message = None;
                self.needs_render = true;
            }
        }
    }

    /// Called after render to reset dirty flag
    pub fn rendered(&mut self) {
        self.needs_render = false;
    }
}

/// Page viewport for a terminal of (columns, rows)
pub fn viewport_for((cols, rows): (u16, u16)) -> Viewport {
    Viewport::new(
        i32::from(cols),
        i32::from(rows.saturating_sub(FOOTER_HEIGHT)),
    )
}
