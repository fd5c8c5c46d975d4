// ABOUTME: This module handles output formatting for the image search CLI
// ABOUTME: It renders display regions as tables and result items as JSON

use anyhow::Result;
use image_search_sdk::{RegionEntry, ResultItem};
use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::constants::ui;

pub trait OutputFormat {
    /// Format the entries of a display region under a title
    fn format_region(&self, title: &str, entries: &[RegionEntry]) -> Result<String>;

    /// Format raw result items as returned by the service
    fn format_items(&self, items: &[ResultItem]) -> Result<String>;
}

pub struct TableFormatter {
    use_color: bool,
}

impl TableFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn truncate(text: &str, max_len: usize) -> String {
        if text.chars().count() <= max_len {
            text.to_string()
        } else {
            let kept: String = text.chars().take(max_len - 3).collect();
            format!("{}...", kept)
        }
    }

    fn format_title(&self, title: &str, count: usize) -> String {
        let heading = format!("{} ({})", title, count);
        if self.use_color {
            heading.bold().to_string()
        } else {
            heading
        }
    }
}

#[derive(Tabled)]
struct RegionRow {
    #[tabled(rename = "Caption")]
    caption: String,
    #[tabled(rename = "Image")]
    image: String,
}

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Collection")]
    collection: String,
    #[tabled(rename = "Url")]
    url: String,
}

impl OutputFormat for TableFormatter {
    fn format_region(&self, title: &str, entries: &[RegionEntry]) -> Result<String> {
        let heading = self.format_title(title, entries.len());
        if entries.is_empty() {
            return Ok(heading);
        }

        let rows: Vec<RegionRow> = entries
            .iter()
            .map(|entry| RegionRow {
                caption: entry.caption.clone(),
                image: Self::truncate(&entry.image_url, ui::MAX_URL_WIDTH),
            })
            .collect();

        let mut table = Table::new(rows);
        table.with(Style::psql());
        Ok(format!("{}\n{}", heading, table))
    }

    fn format_items(&self, items: &[ResultItem]) -> Result<String> {
        let rows: Vec<ItemRow> = items
            .iter()
            .map(|item| ItemRow {
                id: item.id.clone(),
                score: item.score.map(|s| s.to_string()).unwrap_or_default(),
                collection: item.collection.clone(),
                url: Self::truncate(&item.url, ui::MAX_URL_WIDTH),
            })
            .collect();

        let mut table = Table::new(rows);
        table.with(Style::psql());
        Ok(table.to_string())
    }
}

pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormat for JsonFormatter {
    fn format_region(&self, title: &str, entries: &[RegionEntry]) -> Result<String> {
        let value = serde_json::json!({ "title": title, "entries": entries });
        if self.pretty {
            Ok(serde_json::to_string_pretty(&value)?)
        } else {
            Ok(serde_json::to_string(&value)?)
        }
    }

    fn format_items(&self, items: &[ResultItem]) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(items)?)
        } else {
            Ok(serde_json::to_string(items)?)
        }
    }
}
