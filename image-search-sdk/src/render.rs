// ABOUTME: Display ports for the source and destination regions plus the notification port
// ABOUTME: ResultRenderer owns the destination region and writes captioned result entries into it

use crate::types::ResultItem;
use serde::Serialize;
use std::fmt;

/// An output area that shows images with captions. Regions are write-only
/// targets: callers clear them and append entries, never read them back.
pub trait DisplayRegion: Send {
    fn clear(&mut self);
    fn append(&mut self, image_url: &str, caption: &str);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionEntry {
    pub image_url: String,
    pub caption: String,
}

/// Region that keeps its entries in memory so a front end can draw them.
#[derive(Debug, Clone, Default)]
pub struct BufferedRegion {
    entries: Vec<RegionEntry>,
}

impl BufferedRegion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[RegionEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DisplayRegion for BufferedRegion {
    fn clear(&mut self) {
        self.entries.clear();
    }

    fn append(&mut self, image_url: &str, caption: &str) {
        self.entries.push(RegionEntry {
            image_url: image_url.to_string(),
            caption: caption.to_string(),
        });
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Similarity results, captions carry the score
    Search,
    /// Stored images, captions omit the score
    Listing,
}

pub fn caption(item: &ResultItem, mode: RenderMode) -> String {
    match (mode, item.score) {
        (RenderMode::Search, Some(score)) => format!(
            "id:{}, score:{}, collection:{}",
            item.id, score, item.collection
        ),
        _ => format!("id:{}, collection:{}", item.id, item.collection),
    }
}

pub struct ResultRenderer<R> {
    region: R,
}

impl<R: DisplayRegion> ResultRenderer<R> {
    pub fn new(region: R) -> Self {
        Self { region }
    }

    pub fn region(&self) -> &R {
        &self.region
    }

    /// Replace the destination contents with one entry per item, in order
    pub fn render(&mut self, items: &[ResultItem], mode: RenderMode) {
        self.region.clear();
        for item in items {
            self.region.append(&item.url, &caption(item, mode));
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Validation,
    Failure,
}

/// A message for the user about the outcome of an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Delivers notices to the user. Must not block on user acknowledgement.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice);
}
