//! Title and body resolution
//!
//! Explicit option values win. Otherwise the trigger element supplies them:
//!
//! - title: `walbox-title`, `title`, `alt`, then the element's text
//! - content source: `walbox-content`, `href`, then `src`
//!
//! A content source containing `#` is a fragment reference and resolves to
//! the inner HTML of the page element with that id. Nothing here fails:
//! missing pieces resolve to empty strings.

use super::options::WalboxOptions;
use crate::page::{Element, Page};
use crate::text::single_line;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// `scheme://` followed by non-whitespace, for the schemes a frame can show
static EMBEDDABLE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(https?|s?ftp)://[^\s/$.?#].[^\s]*$").expect("embeddable URL pattern")
});

/// Modal body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Body {
    /// Literal HTML or text
    Html(String),
    /// Embedded frame pointing at a URL
    Frame(String),
}

impl Body {
    pub fn is_frame(&self) -> bool {
        matches!(self, Body::Frame(_))
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// Whether `value` should be embedded as a frame rather than shown as text
pub fn is_embeddable_url(value: &str) -> bool {
    EMBEDDABLE_URL.is_match(value)
}

/// Title from options, falling back to the trigger's attributes
pub fn resolve_title(options: &WalboxOptions, trigger: Option<&Element>) -> String {
    if let Some(title) = non_empty(options.title.as_deref()) {
        return title.to_string();
    }
    let Some(el) = trigger else {
        return String::new();
    };
    non_empty(el.attr("walbox-title"))
        .or_else(|| non_empty(el.attr("title")))
        .or_else(|| non_empty(el.attr("alt")))
        .map_or_else(|| single_line(&el.text_content()), str::to_string)
}

/// The trigger's content source attribute, if any
pub fn content_source(trigger: &Element) -> Option<&str> {
    non_empty(trigger.attr("walbox-content"))
        .or_else(|| non_empty(trigger.attr("href")))
        .or_else(|| non_empty(trigger.attr("src")))
}

/// Resolve a content source: fragment references become the referenced
/// element's inner HTML, anything else is returned as-is.
pub fn source_content(source: &str, page: &Page) -> String {
    if !source.contains('#') {
        return source.to_string();
    }
    // Text between the first `#` and the next one
    let anchor = source.split('#').nth(1).unwrap_or_default();
    if anchor.is_empty() {
        return String::new();
    }
    match page.find_by_id(anchor) {
        Some(el) => el.html().to_string(),
        None => {
            tracing::debug!(anchor, "Fragment target not found, using empty content");
            String::new()
        }
    }
}

/// Body from options, falling back to the trigger's content source
pub fn resolve_body(options: &WalboxOptions, trigger: Option<&Element>, page: &Page) -> Body {
    let content = match non_empty(options.content.as_deref()) {
        Some(content) => content.to_string(),
        None => trigger
            .and_then(content_source)
            .map(|source| source_content(source, page))
            .unwrap_or_default(),
    };

    if options.iframe || is_embeddable_url(&content) {
        Body::Frame(content)
    } else {
        Body::Html(content)
    }
}
