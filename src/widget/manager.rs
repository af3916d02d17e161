//! Widget manager
//!
//! Owns everything the widget needs between events: the id counter, the
//! trigger bindings, the current modal and overlay, the listeners bound for
//! the current modal, the drag session, the scroll/resize debouncer and the
//! scheduled post-show callbacks. One manager per page.
//!
//! Every entry point takes the current [`Viewport`] and an [`Instant`], so
//! the host owns both the layout and the clock.

use super::debounce::Debouncer;
use super::drag::DragSession;
use super::geometry::{clamp_to_viewport, Position, Viewport};
use super::modal::{Modal, ModalId, Phase};
use super::options::{ShowCallback, WalboxOptions};
use super::overlay::Overlay;
use crate::errors::Result;
use crate::page::{Element, Page, Selector};
use std::time::{Duration, Instant};

/// Window over which scroll/resize events are coalesced
pub const ADJUST_DEBOUNCE: Duration = Duration::from_millis(200);

/// Delay between opening a modal and running its callback
pub const SHOW_CALLBACK_DELAY: Duration = Duration::from_secs(1);

/// Identifies a binding made with [`WidgetManager::bind`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingId(pub usize);

/// Trigger elements matching `selector` open a modal with `options`
#[derive(Debug, Clone)]
pub struct Binding {
    pub id: BindingId,
    pub selector: Selector,
    pub options: WalboxOptions,
}

/// Handlers active for the current modal. Built from its options at open
/// time, cleared on dismissal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerSet {
    pub close_click: bool,
    pub overlay_click: bool,
    pub escape: bool,
    pub drag: bool,
    pub adjust: bool,
    pub recenter: bool,
}

impl ListenerSet {
    fn for_options(options: &WalboxOptions) -> Self {
        Self {
            close_click: options.close && options.show_close,
            overlay_click: options.overlay && options.show_overlay,
            escape: options.escape,
            drag: options.drag && options.show_title,
            adjust: options.adjust,
            recenter: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Why a modal went away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    CloseButton,
    Overlay,
    Escape,
    /// Closed by the host
    Programmatic,
}

/// Result of a pointer-down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    /// Not over the widget; the host may handle it
    Ignored,
    /// Landed on the widget with no effect
    Consumed,
    DragStarted,
    Dismissed(DismissReason),
}

#[derive(Debug)]
struct ScheduledCallback {
    due: Instant,
    modal: ModalId,
    callback: ShowCallback,
}

#[derive(Debug)]
pub struct WidgetManager {
    counter: u32,
    bindings: Vec<Binding>,
    modal: Option<Modal>,
    overlay: Option<Overlay>,
    listeners: ListenerSet,
    drag: Option<DragSession>,
    adjust: Debouncer<Viewport>,
    callbacks: Vec<ScheduledCallback>,
}

impl Default for WidgetManager {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetManager {
    pub fn new() -> Self {
        Self {
            counter: 0,
            bindings: Vec::new(),
            modal: None,
            overlay: None,
            listeners: ListenerSet::default(),
            drag: None,
            adjust: Debouncer::new(ADJUST_DEBOUNCE),
            callbacks: Vec::new(),
        }
    }

    /// Attach the click behavior to every element matching `selector`
    pub fn bind(&mut self, selector: &str, options: WalboxOptions) -> Result<BindingId> {
        let selector = Selector::parse(selector)?;
        let id = BindingId(self.bindings.len());
        tracing::debug!(selector = %selector, binding = id.0, "Bound trigger selector");
        self.bindings.push(Binding {
            id,
            selector,
            options,
        });
        Ok(id)
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Binding that handles clicks on `page.elements[index]`. Later
    /// bindings take precedence over earlier ones.
    pub fn binding_for(&self, page: &Page, index: usize) -> Option<&Binding> {
        let element = page.elements.get(index)?;
        self.bindings
            .iter()
            .rev()
            .find(|b| b.selector.matches(element))
    }

    /// Click on a page element. Opens a modal if the element is bound.
    pub fn click_element(
        &mut self,
        page: &Page,
        index: usize,
        viewport: Viewport,
        now: Instant,
    ) -> Option<ModalId> {
        let options = self.binding_for(page, index)?.options.clone();
        let trigger = page.elements.get(index);
        Some(self.open(&options, trigger, page, viewport, now))
    }

    /// Open a modal. With no trigger this is the direct-call entry point
    /// and title/content come from `options` alone.
    pub fn open(
        &mut self,
        options: &WalboxOptions,
        trigger: Option<&Element>,
        page: &Page,
        viewport: Viewport,
        now: Instant,
    ) -> ModalId {
        self.counter += 1;
        let id = ModalId(self.counter);

        // Overlay first, reusing a live one
        if options.show_overlay {
            if !self.overlay_visible() {
                self.overlay = Some(Overlay::new(now));
            }
        } else if self.overlay_visible() {
            // Left over from a previous modal; this one has no overlay
            self.remove_overlay(now);
        }

        // Any previous modal goes away at once, without a fade
        if let Some(previous) = self.modal.take() {
            tracing::debug!(modal = %previous.id, "Removing previous modal");
            self.teardown();
        }

        let mut modal = Modal::build(id, options, trigger, page, now);
        modal.place(viewport);
        self.listeners = ListenerSet::for_options(options);

        tracing::debug!(
            modal = %id,
            top = modal.position.top,
            left = modal.position.left,
            width = modal.size.width,
            height = modal.size.height,
            size = modal.size_class.class_name(),
            frame = modal.body.is_frame(),
            listeners = ?self.listeners,
            "Opened modal"
        );
        self.modal = Some(modal);

        if let Some(callback) = &options.action {
            self.callbacks.push(ScheduledCallback {
                due: now + SHOW_CALLBACK_DELAY,
                modal: id,
                callback: callback.clone(),
            });
        }

        id
    }

    /// Begin fading out the modal and overlay. Listeners are torn down now.
    pub fn dismiss(&mut self, reason: DismissReason, now: Instant) -> bool {
        let Some(modal) = self.modal.as_mut() else {
            return false;
        };
        if !modal.is_interactive() {
            return false;
        }
        modal.phase = Phase::Closing { since: now };
        modal.dragging = false;
        tracing::debug!(modal = %modal.id, ?reason, "Dismissing modal");

        self.remove_overlay(now);
        self.teardown();
        true
    }

    fn remove_overlay(&mut self, now: Instant) {
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.fade_out(now);
        }
    }

    /// Drop every handler bound for the current modal
    fn teardown(&mut self) {
        if !self.listeners.is_empty() {
            tracing::debug!(listeners = ?self.listeners, "Tearing down modal listeners");
        }
        self.listeners = ListenerSet::default();
        self.drag = None;
        self.adjust.cancel();
    }

    /// Pointer pressed at a document-relative point
    pub fn pointer_down(&mut self, point: Position, now: Instant) -> PointerOutcome {
        let overlay_visible = self.overlay_visible();
        let Some(modal) = self.modal.as_mut().filter(|m| m.is_interactive()) else {
            return if overlay_visible {
                PointerOutcome::Consumed
            } else {
                PointerOutcome::Ignored
            };
        };

        if modal.close_contains(point) {
            if self.listeners.close_click {
                self.dismiss(DismissReason::CloseButton, now);
                return PointerOutcome::Dismissed(DismissReason::CloseButton);
            }
            return PointerOutcome::Consumed;
        }

        if modal.title_contains(point) && self.listeners.drag {
            let session = DragSession::begin(modal, point);
            modal.dragging = true;
            tracing::debug!(modal = %modal.id, grab = ?session.grab, "Drag started");
            self.drag = Some(session);
            return PointerOutcome::DragStarted;
        }

        if modal.bounds().contains(point) {
            return PointerOutcome::Consumed;
        }

        if overlay_visible {
            if self.listeners.overlay_click {
                self.dismiss(DismissReason::Overlay, now);
                return PointerOutcome::Dismissed(DismissReason::Overlay);
            }
            return PointerOutcome::Consumed;
        }

        PointerOutcome::Ignored
    }

    /// Pointer moved. Returns whether the modal moved.
    pub fn pointer_move(&mut self, point: Position, viewport: Viewport) -> bool {
        let Some(session) = self.drag else {
            return false;
        };
        let Some(modal) = self.modal.as_mut().filter(|m| m.id == session.modal) else {
            self.drag = None;
            return false;
        };
        match session.target(point, viewport) {
            Some(target) if target != modal.position => {
                modal.position = target;
                true
            }
            _ => false,
        }
    }

    /// Pointer released. Ends any drag and restores title bar styling.
    pub fn pointer_up(&mut self) -> bool {
        let Some(session) = self.drag.take() else {
            return false;
        };
        if let Some(modal) = self.modal.as_mut() {
            modal.dragging = false;
        }
        tracing::debug!(modal = %session.modal, "Drag ended");
        true
    }

    /// Escape released. Dismisses only while the overlay is visible.
    pub fn escape(&mut self, now: Instant) -> bool {
        if !self.listeners.escape || !self.overlay_visible() {
            return false;
        }
        self.dismiss(DismissReason::Escape, now)
    }

    /// Window resized: recenter now, clamp once the resize settles
    pub fn resize(&mut self, viewport: Viewport, now: Instant) {
        if self.listeners.recenter {
            if let Some(modal) = self.modal.as_mut().filter(|m| m.is_interactive()) {
                modal.place(viewport);
                tracing::debug!(modal = %modal.id, position = ?modal.position, "Recentered");
            }
        }
        if self.listeners.adjust {
            self.adjust.call(now, viewport);
        }
    }

    /// Page scrolled: clamp once scrolling settles
    pub fn scroll(&mut self, viewport: Viewport, now: Instant) {
        if self.listeners.adjust {
            self.adjust.call(now, viewport);
        }
    }

    /// Pull the open modal into `viewport`. Returns whether it moved.
    pub fn clamp(&mut self, viewport: Viewport) -> bool {
        let Some(modal) = self.modal.as_mut().filter(|m| m.is_interactive()) else {
            return false;
        };
        let clamped = clamp_to_viewport(modal.position, viewport, modal.size);
        if clamped == modal.position {
            return false;
        }
        tracing::debug!(modal = %modal.id, from = ?modal.position, to = ?clamped, "Clamped to viewport");
        modal.position = clamped;
        true
    }

    /// Run due timers: debounced clamp, post-show callbacks, fades.
    /// Returns whether anything visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;

        if let Some(viewport) = self.adjust.poll(now) {
            changed |= self.clamp(viewport);
        }

        let (due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.callbacks)
            .into_iter()
            .partition(|c| now >= c.due);
        self.callbacks = pending;
        for scheduled in due {
            tracing::debug!(modal = %scheduled.modal, "Running post-show callback");
            scheduled.callback.invoke(scheduled.modal);
        }

        if let Some(modal) = self.modal.as_mut() {
            let was_opening = matches!(modal.phase, Phase::Opening { .. });
            if modal.phase.advance(now) {
                tracing::debug!(modal = %modal.id, "Modal removed");
                self.modal = None;
                changed = true;
            } else if was_opening || modal.phase.is_closing() {
                changed = true;
            }
        }
        if let Some(overlay) = self.overlay.as_mut() {
            let fading = !matches!(overlay.phase, Phase::Open);
            if overlay.phase.advance(now) {
                self.overlay = None;
            }
            changed |= fading;
        }

        changed
    }

    /// Earliest instant at which [`tick`](Self::tick) has work to do
    pub fn next_deadline(&self) -> Option<Instant> {
        let callbacks = self.callbacks.iter().map(|c| c.due).min();
        match (self.adjust.deadline(), callbacks) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay.as_ref().is_some_and(Overlay::is_visible)
    }

    /// An interactive modal is up
    pub fn is_open(&self) -> bool {
        self.modal.as_ref().is_some_and(Modal::is_interactive)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    #[cfg(test)]
    pub fn listeners(&self) -> ListenerSet {
        self.listeners
    }

    #[cfg(test)]
    pub fn pending_callbacks(&self) -> usize {
        self.callbacks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::content::Body;
    use crate::widget::geometry::Size;
    use crate::widget::modal::{FADE_IN, FADE_OUT};
    use crate::widget::OptionsOverride;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn viewport() -> Viewport {
        Viewport::new(80, 24)
    }

    fn demo_page() -> Page {
        Page {
            title: "t".to_string(),
            elements: vec![
                Element::new("a")
                    .with_class("walbox")
                    .with_attr("href", "#block1")
                    .with_text("Open"),
                Element::new("a")
                    .with_class("walbox")
                    .with_attr("href", "https://example.com/page")
                    .with_text("Remote"),
                Element::new("p").with_text("plain"),
                Element::new("div")
                    .with_id("block1")
                    .with_text("Hello")
                    .hidden(),
            ],
            bindings: Vec::new(),
        }
    }

    fn sized(width: i32, height: i32) -> WalboxOptions {
        WalboxOptions {
            content: Some("body".to_string()),
            width: Some(width),
            height: Some(height),
            ..WalboxOptions::default()
        }
    }

    #[test]
    fn test_open_centers() {
        let mut widget = WidgetManager::new();
        let now = Instant::now();
        widget.open(&sized(40, 10), None, &Page::default(), viewport(), now);
        let modal = widget.modal().unwrap();
        assert_eq!(modal.position, Position::new(7, 20));
        assert_eq!(modal.size, Size::new(40, 10));
    }

    #[test]
    fn test_second_open_replaces_first() {
        let mut widget = WidgetManager::new();
        let now = Instant::now();
        let page = Page::default();
        let first = widget.open(&sized(40, 10), None, &page, viewport(), now);
        let second = widget.open(&sized(30, 8), None, &page, viewport(), now);

        assert_ne!(first, second);
        assert_eq!(widget.modal().unwrap().id, second);
        assert_eq!(second.to_string(), "walbox-2");
        assert!(widget.overlay_visible());
    }

    #[test]
    fn test_open_replaces_closing_modal() {
        let mut widget = WidgetManager::new();
        let now = Instant::now();
        let page = Page::default();
        widget.open(&sized(40, 10), None, &page, viewport(), now);
        widget.dismiss(DismissReason::Programmatic, now);
        let id = widget.open(&sized(40, 10), None, &page, viewport(), now);

        let modal = widget.modal().unwrap();
        assert_eq!(modal.id, id);
        assert!(modal.is_interactive());
        // A fresh overlay replaces the fading one
        assert!(widget.overlay_visible());
    }

    #[test]
    fn test_click_bound_element_resolves_fragment() {
        let mut widget = WidgetManager::new();
        widget.bind(".walbox", WalboxOptions::default()).unwrap();
        let page = demo_page();

        let id = widget.click_element(&page, 0, viewport(), Instant::now());
        assert!(id.is_some());
        let modal = widget.modal().unwrap();
        assert_eq!(modal.body, Body::Html("Hello".to_string()));
        assert_eq!(modal.title.as_deref(), Some("Open"));
    }

    #[test]
    fn test_click_bound_element_embeds_url() {
        let mut widget = WidgetManager::new();
        widget.bind("a.walbox", WalboxOptions::default()).unwrap();
        let page = demo_page();

        widget.click_element(&page, 1, viewport(), Instant::now());
        assert_eq!(
            widget.modal().unwrap().body,
            Body::Frame("https://example.com/page".to_string())
        );
    }

    #[test]
    fn test_click_unbound_element_does_nothing() {
        let mut widget = WidgetManager::new();
        widget.bind(".walbox", WalboxOptions::default()).unwrap();
        let page = demo_page();
        assert!(widget
            .click_element(&page, 2, viewport(), Instant::now())
            .is_none());
        assert!(widget.modal().is_none());
    }

    #[test]
    fn test_later_binding_wins() {
        let mut widget = WidgetManager::new();
        widget.bind("a", WalboxOptions::default()).unwrap();
        let large = OptionsOverride {
            title: Some("Later".to_string()),
            ..Default::default()
        }
        .resolve();
        widget.bind(".walbox", large).unwrap();
        let page = demo_page();
        widget.click_element(&page, 0, viewport(), Instant::now());
        assert_eq!(widget.modal().unwrap().title.as_deref(), Some("Later"));
    }

    #[test]
    fn test_bind_invalid_selector() {
        let mut widget = WidgetManager::new();
        assert!(widget.bind("div > p", WalboxOptions::default()).is_err());
    }

    #[test]
    fn test_direct_call_literal_content() {
        let mut widget = WidgetManager::new();
        let opts = WalboxOptions {
            content: Some("<p>Hi</p>".to_string()),
            ..WalboxOptions::default()
        };
        widget.open(&opts, None, &demo_page(), viewport(), Instant::now());
        assert_eq!(
            widget.modal().unwrap().body,
            Body::Html("<p>Hi</p>".to_string())
        );
    }

    #[test]
    fn test_escape_requires_visible_overlay() {
        let now = Instant::now();

        // No modal, no overlay: no-op
        let mut widget = WidgetManager::new();
        assert!(!widget.escape(now));

        // Modal without overlay: no-op
        let opts = WalboxOptions {
            show_overlay: false,
            ..sized(40, 10)
        };
        widget.open(&opts, None, &Page::default(), viewport(), now);
        assert!(!widget.escape(now));
        assert!(widget.is_open());

        // With overlay: dismisses
        widget.open(&sized(40, 10), None, &Page::default(), viewport(), now);
        assert!(widget.escape(now));
        assert!(!widget.is_open());
        assert!(!widget.overlay_visible());

        // Second press after dismissal is a no-op
        assert!(!widget.escape(now));
    }

    #[test]
    fn test_escape_disabled() {
        let now = Instant::now();
        let mut widget = WidgetManager::new();
        let opts = WalboxOptions {
            escape: false,
            ..sized(40, 10)
        };
        widget.open(&opts, None, &Page::default(), viewport(), now);
        assert!(!widget.escape(now));
        assert!(widget.is_open());
    }

    #[test]
    fn test_close_button_dismisses() {
        let now = Instant::now();
        let mut widget = WidgetManager::new();
        widget.open(&sized(40, 10), None, &Page::default(), viewport(), now);
        // Modal at (7, 20), close control at columns 56..59
        let outcome = widget.pointer_down(Position::new(7, 57), now);
        assert_eq!(outcome, PointerOutcome::Dismissed(DismissReason::CloseButton));
        assert!(!widget.is_open());
    }

    #[test]
    fn test_close_disabled_is_inert() {
        let now = Instant::now();
        let mut widget = WidgetManager::new();
        let opts = WalboxOptions {
            close: false,
            ..sized(40, 10)
        };
        widget.open(&opts, None, &Page::default(), viewport(), now);
        assert_eq!(
            widget.pointer_down(Position::new(7, 57), now),
            PointerOutcome::Consumed
        );
        assert!(widget.is_open());
    }

    #[test]
    fn test_overlay_click_off_by_default() {
        let now = Instant::now();
        let mut widget = WidgetManager::new();
        widget.open(&sized(40, 10), None, &Page::default(), viewport(), now);
        assert_eq!(
            widget.pointer_down(Position::new(0, 0), now),
            PointerOutcome::Consumed
        );
        assert!(widget.is_open());
    }

    #[test]
    fn test_overlay_click_dismisses_when_enabled() {
        let now = Instant::now();
        let mut widget = WidgetManager::new();
        let opts = WalboxOptions {
            overlay: true,
            ..sized(40, 10)
        };
        widget.open(&opts, None, &Page::default(), viewport(), now);

        // Inside the modal body: nothing
        assert_eq!(
            widget.pointer_down(Position::new(10, 30), now),
            PointerOutcome::Consumed
        );
        assert_eq!(
            widget.pointer_down(Position::new(0, 0), now),
            PointerOutcome::Dismissed(DismissReason::Overlay)
        );
        assert!(!widget.is_open());
    }

    #[test]
    fn test_pointer_outside_without_overlay_is_ignored() {
        let now = Instant::now();
        let mut widget = WidgetManager::new();
        let opts = WalboxOptions {
            show_overlay: false,
            ..sized(40, 10)
        };
        widget.open(&opts, None, &Page::default(), viewport(), now);
        assert_eq!(
            widget.pointer_down(Position::new(0, 0), now),
            PointerOutcome::Ignored
        );
    }

    #[test]
    fn test_drag_moves_and_clamps() {
        let now = Instant::now();
        let mut widget = WidgetManager::new();
        widget.open(&sized(40, 10), None, &Page::default(), viewport(), now);

        assert_eq!(
            widget.pointer_down(Position::new(7, 25), now),
            PointerOutcome::DragStarted
        );
        assert!(widget.modal().unwrap().dragging);

        assert!(widget.pointer_move(Position::new(9, 30), viewport()));
        assert_eq!(widget.modal().unwrap().position, Position::new(9, 25));

        // Far past the bottom-right corner
        widget.pointer_move(Position::new(100, 200), viewport());
        assert_eq!(widget.modal().unwrap().position, Position::new(14, 40));

        assert!(widget.pointer_up());
        assert!(!widget.modal().unwrap().dragging);
        // Moves after release do nothing
        assert!(!widget.pointer_move(Position::new(0, 0), viewport()));
    }

    #[test]
    fn test_drag_noop_when_taller_than_viewport() {
        let now = Instant::now();
        let mut widget = WidgetManager::new();
        let opts = WalboxOptions {
            top: Some(2),
            left: Some(5),
            ..sized(40, 30)
        };
        widget.open(&opts, None, &Page::default(), viewport(), now);
        let before = widget.modal().unwrap().position;

        assert_eq!(
            widget.pointer_down(Position::new(2, 10), now),
            PointerOutcome::DragStarted
        );
        assert!(!widget.pointer_move(Position::new(5, 20), viewport()));
        assert!(!widget.pointer_move(Position::new(1, 1), viewport()));
        widget.pointer_up();

        assert_eq!(widget.modal().unwrap().position, before);
    }

    #[test]
    fn test_drag_disabled() {
        let now = Instant::now();
        let mut widget = WidgetManager::new();
        let opts = WalboxOptions {
            drag: false,
            ..sized(40, 10)
        };
        widget.open(&opts, None, &Page::default(), viewport(), now);
        assert_eq!(
            widget.pointer_down(Position::new(7, 25), now),
            PointerOutcome::Consumed
        );
        assert!(!widget.is_dragging());
    }

    #[test]
    fn test_dismiss_tears_down_drag() {
        let now = Instant::now();
        let mut widget = WidgetManager::new();
        widget.open(&sized(40, 10), None, &Page::default(), viewport(), now);
        widget.pointer_down(Position::new(7, 25), now);
        assert!(widget.is_dragging());

        widget.dismiss(DismissReason::Programmatic, now);
        assert!(!widget.is_dragging());
        assert!(widget.listeners().is_empty());
    }

    #[test]
    fn test_reopen_tears_down_drag() {
        let now = Instant::now();
        let mut widget = WidgetManager::new();
        widget.open(&sized(40, 10), None, &Page::default(), viewport(), now);
        widget.pointer_down(Position::new(7, 25), now);

        widget.open(&sized(40, 10), None, &Page::default(), viewport(), now);
        assert!(!widget.is_dragging());
        let before = widget.modal().unwrap().position;
        assert!(!widget.pointer_move(Position::new(0, 0), viewport()));
        assert_eq!(widget.modal().unwrap().position, before);
    }

    #[test]
    fn test_scroll_clamp_is_debounced() {
        let now = Instant::now();
        let mut widget = WidgetManager::new();
        widget.open(&sized(40, 10), None, &Page::default(), viewport(), now);

        // Rapid scrolling down the page
        for step in 1..=5u64 {
            let scrolled = viewport().scrolled(step as i32 * 10, 0);
            widget.scroll(scrolled, now + Duration::from_millis(step * 20));
        }
        widget.tick(now + Duration::from_millis(150));
        assert_eq!(widget.modal().unwrap().position.top, 7);

        // 200ms after the last event the clamp runs against the last viewport
        widget.tick(now + Duration::from_millis(300));
        assert_eq!(widget.modal().unwrap().position, Position::new(50, 20));
    }

    #[test]
    fn test_adjust_disabled_never_clamps() {
        let now = Instant::now();
        let mut widget = WidgetManager::new();
        let opts = WalboxOptions {
            adjust: false,
            ..sized(40, 10)
        };
        widget.open(&opts, None, &Page::default(), viewport(), now);
        widget.scroll(viewport().scrolled(50, 0), now);
        widget.tick(now + Duration::from_secs(1));
        assert_eq!(widget.modal().unwrap().position, Position::new(7, 20));
    }

    #[test]
    fn test_clamp_idempotent_through_manager() {
        let now = Instant::now();
        let mut widget = WidgetManager::new();
        widget.open(&sized(40, 10), None, &Page::default(), viewport(), now);
        let scrolled = viewport().scrolled(40, 0);
        assert!(widget.clamp(scrolled));
        let once = widget.modal().unwrap().position;
        assert!(!widget.clamp(scrolled));
        assert_eq!(widget.modal().unwrap().position, once);
    }

    #[test]
    fn test_resize_recenters() {
        let now = Instant::now();
        let mut widget = WidgetManager::new();
        widget.open(&sized(40, 10), None, &Page::default(), viewport(), now);
        widget.resize(Viewport::new(120, 40), now);
        assert_eq!(widget.modal().unwrap().position, Position::new(15, 40));
    }

    #[test]
    fn test_callback_runs_once_after_delay() {
        let now = Instant::now();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let opts = sized(40, 10).with_action(ShowCallback::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        let mut widget = WidgetManager::new();
        widget.open(&opts, None, &Page::default(), viewport(), now);
        assert_eq!(widget.next_deadline(), Some(now + SHOW_CALLBACK_DELAY));

        widget.tick(now + Duration::from_millis(999));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        widget.tick(now + SHOW_CALLBACK_DELAY);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        widget.tick(now + Duration::from_secs(5));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(widget.pending_callbacks(), 0);
    }

    #[test]
    fn test_callback_survives_dismissal() {
        let now = Instant::now();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let opts = sized(40, 10).with_action(ShowCallback::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        let mut widget = WidgetManager::new();
        widget.open(&opts, None, &Page::default(), viewport(), now);
        widget.dismiss(DismissReason::Programmatic, now);
        widget.tick(now + SHOW_CALLBACK_DELAY);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_lifecycle_fades() {
        let now = Instant::now();
        let mut widget = WidgetManager::new();
        widget.open(&sized(40, 10), None, &Page::default(), viewport(), now);
        assert!(matches!(
            widget.modal().unwrap().phase,
            Phase::Opening { .. }
        ));

        widget.tick(now + FADE_IN);
        assert_eq!(widget.modal().unwrap().phase, Phase::Open);

        let closed_at = now + Duration::from_secs(2);
        widget.dismiss(DismissReason::Programmatic, closed_at);
        assert!(widget.modal().unwrap().phase.is_closing());
        assert!(widget.overlay().is_some());

        widget.tick(closed_at + FADE_OUT);
        assert!(widget.modal().is_none());
        assert!(widget.overlay().is_none());
    }
}
