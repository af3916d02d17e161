//! `walbox check`: what each trigger on a page would open

use crate::app::bind_page;
use crate::config::WalboxConfig;
use crate::errors::Result;
use crate::page::Page;
use crate::ui::truncate;
use crate::widget::{preview, Body, Preview, WidgetManager};
use serde::Serialize;

/// One bound element and its resolved modal contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriggerReport {
    /// Element index in the page
    pub index: usize,
    /// Binding that wins for this element
    pub binding: usize,
    pub selector: String,
    /// Visible label of the element
    pub label: String,
    #[serde(flatten)]
    pub preview: Preview,
}

/// Resolve every trigger on `page` with `config` defaults applied
pub fn check_page(page: &Page, config: &WalboxConfig) -> Result<Vec<TriggerReport>> {
    let mut widget = WidgetManager::new();
    bind_page(&mut widget, page, config, None)?;

    let reports = page
        .elements
        .iter()
        .enumerate()
        .filter_map(|(index, element)| {
            let binding = widget.binding_for(page, index)?;
            Some(TriggerReport {
                index,
                binding: binding.id.0,
                selector: binding.selector.to_string(),
                label: element.text_content(),
                preview: preview(&binding.options, Some(element), page),
            })
        })
        .collect();
    Ok(reports)
}

/// Plain-text table for the terminal
pub fn format_table(reports: &[TriggerReport]) -> String {
    if reports.is_empty() {
        return "No triggers found\n".to_string();
    }

    let mut out = format!(
        "{:<5} {:<16} {:<20} {:<20} {}\n",
        "IDX", "SELECTOR", "LABEL", "TITLE", "BODY"
    );
    out.push_str(&"-".repeat(90));
    out.push('\n');
    for report in reports {
        let title = report.preview.title.as_deref().unwrap_or("-");
        let body = match &report.preview.body {
            Body::Frame(src) => format!("frame {src}"),
            Body::Html(html) if html.is_empty() => "(empty)".to_string(),
            Body::Html(html) => html.replace('\n', " "),
        };
        out.push_str(&format!(
            "{:<5} {:<16} {:<20} {:<20} {}\n",
            report.index,
            truncate(&report.selector, 16),
            truncate(&report.label, 20),
            truncate(title, 20),
            truncate(&body, 40),
        ));
    }
    out
}
