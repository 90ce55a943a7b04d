use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::FeedId;

pub type EntryId = i64;

/// A single entry as returned by `entries.json`.
///
/// `feed_title` is not part of the payload; the aggregator fills it in once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub feed_id: FeedId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub published: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(skip)]
    pub feed_title: String,
}

impl Entry {
    pub fn new(id: EntryId, feed_id: FeedId) -> Self {
        Self {
            id,
            feed_id,
            title: None,
            author: None,
            published: None,
            url: None,
            content: None,
            feed_title: String::new(),
        }
    }

    /// Parsed publication time, `None` when missing or malformed.
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.published.as_deref()?.trim();
        DateTime::parse_from_rfc3339(raw)
            .or_else(|_| DateTime::parse_from_rfc2822(raw))
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
    }

    /// Key used to order the reading list. Unparseable timestamps sort last.
    pub fn sort_key(&self) -> DateTime<Utc> {
        self.published_at().unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or("(Untitled)")
    }
}
