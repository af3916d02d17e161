//! Widget configuration
//!
//! [`WalboxOptions`] is the fully-resolved option record a modal is built
//! from. [`OptionsOverride`] is the sparse form read from config and page
//! files, where every field is optional and set fields win when merged.

use super::modal::ModalId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Size class of a modal. Selects the auto width when no explicit width is
/// configured, and is exposed as a style class hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl ModalSize {
    pub fn class_name(self) -> &'static str {
        match self {
            ModalSize::Small => "small",
            ModalSize::Medium => "medium",
            ModalSize::Large => "large",
        }
    }

    /// Auto width as a percentage of the viewport width
    pub fn width_percent(self) -> i32 {
        match self {
            ModalSize::Small => 40,
            ModalSize::Medium => 60,
            ModalSize::Large => 80,
        }
    }
}

/// Callback run once, a fixed delay after a modal is shown
#[derive(Clone)]
pub struct ShowCallback(Arc<dyn Fn(ModalId) + Send + Sync>);

impl ShowCallback {
    pub fn new(f: impl Fn(ModalId) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn invoke(&self, id: ModalId) {
        (self.0)(id);
    }
}

impl fmt::Debug for ShowCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ShowCallback(..)")
    }
}

/// Resolved modal options
#[derive(Debug, Clone)]
pub struct WalboxOptions {
    /// Title text; falls back to the trigger's attributes
    pub title: Option<String>,
    /// Body HTML or URL; falls back to the trigger's content source
    pub content: Option<String>,
    pub size: ModalSize,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub top: Option<i32>,
    pub left: Option<i32>,
    /// Close control dismisses the modal
    pub close: bool,
    /// Clicking the overlay dismisses the modal
    pub overlay: bool,
    /// Escape dismisses the modal while the overlay is visible
    pub escape: bool,
    pub show_overlay: bool,
    pub show_close: bool,
    pub show_title: bool,
    /// Always embed the content as a frame, even if it is not a URL
    pub iframe: bool,
    /// Clamp into the viewport after scroll/resize
    pub adjust: bool,
    /// Title bar drags the modal
    pub drag: bool,
    pub action: Option<ShowCallback>,
}

impl Default for WalboxOptions {
    fn default() -> Self {
        Self {
            title: None,
            content: None,
            size: ModalSize::Medium,
            width: None,
            height: None,
            top: None,
            left: None,
            close: true,
            overlay: false,
            escape: true,
            show_overlay: true,
            show_close: true,
            show_title: true,
            iframe: false,
            adjust: true,
            drag: true,
            action: None,
        }
    }
}

impl WalboxOptions {
    /// Copy of these options with every field set in `over` replacing ours
    pub fn merged(&self, over: &OptionsOverride) -> Self {
        Self {
            title: over.title.clone().or_else(|| self.title.clone()),
            content: over.content.clone().or_else(|| self.content.clone()),
            size: over.size.unwrap_or(self.size),
            width: over.width.or(self.width),
            height: over.height.or(self.height),
            top: over.top.or(self.top),
            left: over.left.or(self.left),
            close: over.close.unwrap_or(self.close),
            overlay: over.overlay.unwrap_or(self.overlay),
            escape: over.escape.unwrap_or(self.escape),
            show_overlay: over.show_overlay.unwrap_or(self.show_overlay),
            show_close: over.show_close.unwrap_or(self.show_close),
            show_title: over.show_title.unwrap_or(self.show_title),
            iframe: over.iframe.unwrap_or(self.iframe),
            adjust: over.adjust.unwrap_or(self.adjust),
            drag: over.drag.unwrap_or(self.drag),
            action: self.action.clone(),
        }
    }

    pub fn with_action(mut self, action: ShowCallback) -> Self {
        self.action = Some(action);
        self
    }

    /// Explicit width, treating zero or negative as unset
    pub fn explicit_width(&self) -> Option<i32> {
        self.width.filter(|w| *w > 0)
    }

    /// Explicit height, treating zero or negative as unset
    pub fn explicit_height(&self) -> Option<i32> {
        self.height.filter(|h| *h > 0)
    }

    /// Explicit top, treating zero as unset
    pub fn explicit_top(&self) -> Option<i32> {
        self.top.filter(|t| *t != 0)
    }

    /// Explicit left, treating zero as unset
    pub fn explicit_left(&self) -> Option<i32> {
        self.left.filter(|l| *l != 0)
    }
}

/// Sparse option set as written in config and page files.
///
/// Keys are snake_case; the camelCase spellings used by the browser widget
/// (`showOverlay`, `showClose`, `showTitle`) are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionsOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<ModalSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escape: Option<bool>,
    #[serde(alias = "showOverlay", skip_serializing_if = "Option::is_none")]
    pub show_overlay: Option<bool>,
    #[serde(alias = "showClose", skip_serializing_if = "Option::is_none")]
    pub show_close: Option<bool>,
    #[serde(alias = "showTitle", skip_serializing_if = "Option::is_none")]
    pub show_title: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iframe: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjust: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drag: Option<bool>,
}

impl OptionsOverride {
    /// Stack `top` over `self`; fields set in `top` win
    pub fn layered(&self, top: &OptionsOverride) -> OptionsOverride {
        OptionsOverride {
            title: top.title.clone().or_else(|| self.title.clone()),
            content: top.content.clone().or_else(|| self.content.clone()),
            size: top.size.or(self.size),
            width: top.width.or(self.width),
            height: top.height.or(self.height),
            top: top.top.or(self.top),
            left: top.left.or(self.left),
            close: top.close.or(self.close),
            overlay: top.overlay.or(self.overlay),
            escape: top.escape.or(self.escape),
            show_overlay: top.show_overlay.or(self.show_overlay),
            show_close: top.show_close.or(self.show_close),
            show_title: top.show_title.or(self.show_title),
            iframe: top.iframe.or(self.iframe),
            adjust: top.adjust.or(self.adjust),
            drag: top.drag.or(self.drag),
        }
    }

    /// Resolve against the built-in defaults
    pub fn resolve(&self) -> WalboxOptions {
        WalboxOptions::default().merged(self)
    }
}
