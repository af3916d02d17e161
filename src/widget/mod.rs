//! The lightbox widget
//!
//! Headless: nothing in here draws or reads the terminal. The host feeds
//! pointer, key, scroll and resize events plus the clock into a
//! [`WidgetManager`] and renders whatever modal and overlay it holds.
//!
//! - `content`: title/body resolution from options and trigger attributes
//! - `modal`: the modal instance, its sizing and hit regions
//! - `overlay`: the shared dimming overlay
//! - `geometry`: centering, viewport clamp and drag formulas
//! - `drag`: title-bar drag sessions
//! - `debounce`: trailing debouncer for scroll/resize
//! - `manager`: lifecycle, listeners and timers

pub mod content;
pub mod debounce;
pub mod drag;
pub mod geometry;
pub mod manager;
pub mod modal;
pub mod options;
pub mod overlay;

pub use content::Body;
pub use manager::{DismissReason, PointerOutcome, WidgetManager};
pub use modal::{Modal, ModalId};
pub use options::{ModalSize, OptionsOverride, ShowCallback, WalboxOptions};

use crate::page::{Element, Page};
use serde::Serialize;

/// What a trigger would show, without opening anything
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub title: Option<String>,
    pub body: Body,
}

/// Resolve title and body for a trigger the way opening it would
pub fn preview(options: &WalboxOptions, trigger: Option<&Element>, page: &Page) -> Preview {
    Preview {
        title: options
            .show_title
            .then(|| content::resolve_title(options, trigger)),
        body: content::resolve_body(options, trigger, page),
    }
}
