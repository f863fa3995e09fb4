//! Adapter interfaces for external video catalogs.
//!
//! A catalog source turns a channel and a keyword query into candidate
//! videos. Filtering by title and tagging into daily/include pools happens
//! here too, so the planner only sees clean `(Item, PoolKind)` pairs.

pub mod youtube;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, info};

use crate::config::ExerciseCategory;
use crate::domain::{Item, PoolKind};

// Re-export the YouTube adapter
pub use youtube::{parse_iso8601_minutes, YouTubeCatalog};

/// Default number of search results requested per query
pub const DEFAULT_MAX_RESULTS: u32 = 7;

/// Trait for external video catalogs
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Human-readable source name
    fn name(&self) -> &str;

    /// Fetch long-form videos from a channel matching the keywords
    async fn fetch(
        &self,
        channel_id: &str,
        keywords: &[String],
        max_results: u32,
    ) -> Result<Vec<Item>>;
}

/// Drop untitled or excluded videos and tag the rest with the category's pool
pub fn categorize(
    items: Vec<Item>,
    category: &ExerciseCategory,
    excluded_keywords: &[String],
) -> Vec<(Item, PoolKind)> {
    let kind = if category.daily {
        PoolKind::Daily
    } else {
        PoolKind::Include
    };
    let excluded: Vec<String> = excluded_keywords.iter().map(|k| k.to_lowercase()).collect();

    let categorized: Vec<(Item, PoolKind)> = items
        .into_iter()
        .filter(|item| {
            if item.title.trim().is_empty() {
                debug!(id = %item.id, "Skipping video with missing title");
                return false;
            }
            let title = item.title.to_lowercase();
            if excluded.iter().any(|keyword| title.contains(keyword.as_str())) {
                debug!(title = %item.title, "Skipping video due to excluded keywords");
                return false;
            }
            true
        })
        .map(|item| (item, kind))
        .collect();

    info!(
        category = %category.category_name,
        %kind,
        count = categorized.len(),
        "Categorized videos"
    );
    categorized
}
