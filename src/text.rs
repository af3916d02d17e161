//! Plain-text helpers for markup shown in the terminal
//!
//! Modal bodies and page elements carry HTML fragments. The terminal can't
//! render markup, so fragments are parsed and flattened to text: block-level
//! elements become line breaks, scripts, styles and comments are dropped.

use scraper::{ElementRef, Html, Node};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Elements that start a new line
const BLOCK_TAGS: &[&str] = &[
    "br", "p", "div", "li", "ul", "ol", "tr", "h1", "h2", "h3", "h4", "h5", "h6", "hr",
    "blockquote", "pre", "section", "article", "table", "dl", "dt", "dd",
];

/// Elements whose content never shows
const HIDDEN_TAGS: &[&str] = &["script", "style", "template", "noscript", "head", "title"];

/// Parse an HTML fragment and flatten it to lines of text
pub fn html_to_text(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }

    let fragment = Html::parse_fragment(html);
    let mut out = String::with_capacity(html.len());
    flatten(fragment.root_element(), &mut out);

    out.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn flatten(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => push_collapsed(out, text),
            Node::Element(el) => {
                let name = el.name();
                if HIDDEN_TAGS.contains(&name) {
                    continue;
                }
                let block = BLOCK_TAGS.contains(&name);
                if block {
                    line_break(out);
                }
                if let Some(child) = ElementRef::wrap(child) {
                    flatten(child, out);
                }
                if block {
                    line_break(out);
                }
            }
            _ => {}
        }
    }
}

/// Append text with whitespace runs collapsed to one space
fn push_collapsed(out: &mut String, text: &str) {
    for c in text.chars() {
        if c.is_whitespace() {
            if !out.is_empty() && !out.ends_with([' ', '\n']) {
                out.push(' ');
            }
        } else {
            out.push(c);
        }
    }
}

fn line_break(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

/// Text on one line, as a title shows it
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Display width in terminal cells
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Greedy word wrap to `width` cells. Words wider than a line are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();

    for line in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;

        for word in line.split_whitespace() {
            let word_width = display_width(word);

            if word_width > width {
                // Flush, then hard-split the long word
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                for c in word.chars() {
                    let w = c.width().unwrap_or(0);
                    if current_width + w > width {
                        out.push(std::mem::take(&mut current));
                        current_width = 0;
                    }
                    current.push(c);
                    current_width += w;
                }
                continue;
            }

            let needed = if current.is_empty() {
                word_width
            } else {
                current_width + 1 + word_width
            };
            if needed > width {
                out.push(std::mem::take(&mut current));
                current_width = 0;
            }
            if !current.is_empty() {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
        }

        out.push(current);
    }

    out
}
