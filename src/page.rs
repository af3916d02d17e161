//! Page document model
//!
//! A page is a flat list of elements, each with a tag, optional id and
//! class, free-form attributes and inner HTML. Elements are laid out one
//! block per element, top to bottom. Hidden elements are never drawn but can
//! still be referenced by id as fragment content.
//!
//! Pages are loaded from TOML:
//!
//! ```toml
//! title = "Gallery"
//!
//! [[elements]]
//! tag = "a"
//! class = "walbox"
//! href = "#block1"
//! text = "Open the greeting"
//!
//! [[elements]]
//! id = "block1"
//! hidden = true
//! text = "<p>Hello</p>"
//!
//! [[bindings]]
//! selector = ".walbox"
//! [bindings.options]
//! overlay = true
//! ```

use crate::errors::{Result, WalboxError};
use crate::text::{display_width, html_to_text, wrap};
use crate::widget::geometry::{Bounds, Position, Size};
use crate::widget::OptionsOverride;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Built-in page shown when no page file is given
const DEMO_PAGE: &str = include_str!("demo_page.toml");

/// Columns left blank at the left edge of the page
pub const PAGE_MARGIN: i32 = 2;

/// A single page element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    /// Whitespace-separated class list
    pub class: Option<String>,
    /// Inner HTML
    pub text: String,
    pub hidden: bool,
    /// Every other key: `href`, `title`, `alt`, `src`, `walbox-title`, ...
    #[serde(flatten)]
    pub attrs: BTreeMap<String, String>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.class = Some(class.to_string());
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn tag(&self) -> &str {
        if self.tag.is_empty() {
            "p"
        } else {
            &self.tag
        }
    }

    /// Attribute value, `None` when absent
    pub fn attr(&self, name: &str) -> Option<&str> {
        match name {
            "id" => self.id.as_deref(),
            "class" => self.class.as_deref(),
            _ => self.attrs.get(name).map(String::as_str),
        }
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.class.as_deref().unwrap_or("").split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Inner HTML
    pub fn html(&self) -> &str {
        &self.text
    }

    /// Text content with markup removed
    pub fn text_content(&self) -> String {
        html_to_text(&self.text)
    }

    /// What the element shows on the page
    fn display_text(&self) -> String {
        let text = self.text_content();
        match self.tag() {
            "img" => {
                let alt = self.attr("alt").unwrap_or("image");
                format!("[img: {alt}]")
            }
            "a" => format!("» {}", if text.is_empty() { "link" } else { &text }),
            "h1" | "h2" | "h3" => text.to_uppercase(),
            _ => text,
        }
    }
}

/// Simple element selector: `tag`, `.class`, `#id` or `tag.class`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Tag(String),
    Class(String),
    Id(String),
    TagClass(String, String),
}

impl Selector {
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let valid = |part: &str| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        };

        let selector = if let Some(id) = s.strip_prefix('#') {
            valid(id).then(|| Selector::Id(id.to_string()))
        } else if let Some(class) = s.strip_prefix('.') {
            valid(class).then(|| Selector::Class(class.to_string()))
        } else if let Some((tag, class)) = s.split_once('.') {
            (valid(tag) && valid(class))
                .then(|| Selector::TagClass(tag.to_ascii_lowercase(), class.to_string()))
        } else {
            valid(s).then(|| Selector::Tag(s.to_ascii_lowercase()))
        };

        selector.ok_or_else(|| WalboxError::InvalidSelector(s.to_string()))
    }

    pub fn matches(&self, element: &Element) -> bool {
        match self {
            Selector::Tag(tag) => element.tag().eq_ignore_ascii_case(tag),
            Selector::Class(class) => element.has_class(class),
            Selector::Id(id) => element.id.as_deref() == Some(id.as_str()),
            Selector::TagClass(tag, class) => {
                element.tag().eq_ignore_ascii_case(tag) && element.has_class(class)
            }
        }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selector::Tag(tag) => write!(f, "{tag}"),
            Selector::Class(class) => write!(f, ".{class}"),
            Selector::Id(id) => write!(f, "#{id}"),
            Selector::TagClass(tag, class) => write!(f, "{tag}.{class}"),
        }
    }
}

/// Binding declared in a page file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingSpec {
    pub selector: String,
    #[serde(default)]
    pub options: OptionsOverride,
}

/// A page of elements
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Page {
    pub title: String,
    pub elements: Vec<Element>,
    pub bindings: Vec<BindingSpec>,
}

impl Page {
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| WalboxError::PageRead {
            path: path.to_path_buf(),
            source,
        })?;
        let page = Self::from_toml(&content)?;
        tracing::info!(
            path = %path.display(),
            elements = page.elements.len(),
            bindings = page.bindings.len(),
            "Loaded page"
        );
        Ok(page)
    }

    pub fn demo() -> Self {
        toml::from_str(DEMO_PAGE).unwrap_or_else(|e| {
            tracing::warn!("Built-in demo page failed to parse: {}", e);
            Self::default()
        })
    }

    /// First element with the given id, hidden or not
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id.as_deref() == Some(id))
    }

    /// Lay visible elements out for a viewport `width` cells wide
    pub fn layout(&self, width: i32) -> PageLayout {
        let text_width = (width - PAGE_MARGIN * 2).max(8) as usize;
        let mut blocks = Vec::new();
        let mut top = 1;
        let mut max_width = 0;

        for (index, element) in self.elements.iter().enumerate() {
            if element.hidden {
                continue;
            }
            let lines = wrap(&element.display_text(), text_width);
            let block_width = lines.iter().map(|l| display_width(l)).max().unwrap_or(0) as i32;
            let height = lines.len() as i32;
            max_width = max_width.max(block_width + PAGE_MARGIN * 2);

            blocks.push(LaidOutElement {
                index,
                bounds: Bounds::new(
                    Position::new(top, PAGE_MARGIN),
                    Size::new(block_width.max(1), height),
                ),
                lines,
            });
            top += height + 1;
        }

        PageLayout {
            width,
            height: top,
            content_width: max_width,
            blocks,
        }
    }
}

/// One element placed on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaidOutElement {
    pub index: usize,
    pub bounds: Bounds,
    pub lines: Vec<String>,
}

/// Page blocks positioned for a given width
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLayout {
    /// Width the layout was computed for
    pub width: i32,
    /// Total document height in rows
    pub height: i32,
    /// Widest laid-out row including margins
    pub content_width: i32,
    pub blocks: Vec<LaidOutElement>,
}

impl PageLayout {
    /// Element under a document-relative point
    pub fn element_at(&self, point: Position) -> Option<usize> {
        self.blocks
            .iter()
            .find(|b| b.bounds.contains(point))
            .map(|b| b.index)
    }

    pub fn block_for(&self, index: usize) -> Option<&LaidOutElement> {
        self.blocks.iter().find(|b| b.index == index)
    }
}
