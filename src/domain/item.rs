//! Candidate videos and the pools they are drawn from.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single schedulable video.
///
/// Identity for deduplication is the `url`: two items with the same URL are
/// the same video even when they were fetched through different queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Catalog identifier (YouTube video ID)
    pub id: String,

    /// Human-readable title
    pub title: String,

    /// Watch URL
    pub url: String,

    /// Thumbnail image URL
    #[serde(alias = "thumb", default)]
    pub thumbnail_ref: String,

    /// Length in whole minutes
    #[serde(alias = "duration", default)]
    pub duration_minutes: u32,
}

impl Item {
    /// Create a new item
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
        duration_minutes: u32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: url.into(),
            thumbnail_ref: String::new(),
            duration_minutes,
        }
    }

    /// Set the thumbnail reference
    pub fn with_thumbnail(mut self, thumbnail_ref: impl Into<String>) -> Self {
        self.thumbnail_ref = thumbnail_ref.into();
        self
    }
}

/// Which pool a fetched item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolKind {
    /// Recurring candidate, at most one per day
    Daily,

    /// Shared candidate for the greedy fill
    Include,
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolKind::Daily => write!(f, "daily"),
            PoolKind::Include => write!(f, "include"),
        }
    }
}

/// The two candidate pools handed to the scheduler.
///
/// Pools are expected to be free of URL duplicates; see
/// [`crate::core::dedup::dedupe`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pools {
    #[serde(default)]
    pub daily: Vec<Item>,

    #[serde(default)]
    pub include: Vec<Item>,
}

impl Pools {
    pub fn new(daily: Vec<Item>, include: Vec<Item>) -> Self {
        Self { daily, include }
    }

    /// Total number of items across both pools
    pub fn len(&self) -> usize {
        self.daily.len() + self.include.len()
    }

    pub fn is_empty(&self) -> bool {
        self.daily.is_empty() && self.include.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_accepts_legacy_field_names() {
        let json = r#"{
            "id": "abc",
            "title": "Morning Yoga",
            "url": "https://www.youtube.com/watch?v=abc",
            "thumb": "https://i.ytimg.com/vi/abc/hqdefault.jpg",
            "duration": 25
        }"#;

        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.duration_minutes, 25);
        assert_eq!(item.thumbnail_ref, "https://i.ytimg.com/vi/abc/hqdefault.jpg");
    }

    #[test]
    fn test_pools_len() {
        let pools = Pools::new(
            vec![Item::new("a", "A", "u1", 10)],
            vec![Item::new("b", "B", "u2", 20), Item::new("c", "C", "u3", 30)],
        );
        assert_eq!(pools.len(), 3);
        assert!(!pools.is_empty());
        assert!(Pools::default().is_empty());
    }
}
