//! Gathers candidate videos for every included channel and category.
//!
//! A failing query is logged and skipped so one bad channel or category
//! does not abort the whole week.

use tracing::{error, info, warn};

use crate::adapters::{categorize, CatalogSource};
use crate::config::InputData;
use crate::domain::{Item, PoolKind, Pools};

use super::dedup::dedupe;

/// Fetch and categorize videos for each included channel × category.
///
/// All daily entries come first, then all include entries, so a URL matched
/// by both a daily and an include category ends up in the include pool.
pub async fn collect<S>(source: &S, input: &InputData, max_results: u32) -> Vec<(Item, PoolKind)>
where
    S: CatalogSource + ?Sized,
{
    let mut daily = Vec::new();
    let mut include = Vec::new();

    for channel in input.included_channels() {
        for category in input.included_categories() {
            info!(
                source = source.name(),
                channel_id = %channel.channel_id,
                category = %category.category_name,
                "Fetching videos"
            );

            match source
                .fetch(&channel.channel_id, &category.keywords, max_results)
                .await
            {
                Ok(items) => {
                    for (item, kind) in categorize(items, category, &input.excluded_keywords) {
                        match kind {
                            PoolKind::Daily => daily.push((item, kind)),
                            PoolKind::Include => include.push((item, kind)),
                        }
                    }
                }
                Err(e) => {
                    error!(
                        channel_id = %channel.channel_id,
                        category = %category.category_name,
                        error = ?e,
                        "Error fetching videos"
                    );
                }
            }
        }
    }

    let mut entries = daily;
    entries.extend(include);

    info!(count = entries.len(), "Number of videos fetched");
    entries
}

/// Collect, then deduplicate into scheduler pools
pub async fn plan<S>(source: &S, input: &InputData, max_results: u32) -> Pools
where
    S: CatalogSource + ?Sized,
{
    let entries = collect(source, input, max_results).await;
    if entries.is_empty() {
        warn!("No videos were fetched. Check the YouTube queries and input data");
        return Pools::default();
    }

    let pools = dedupe(entries);
    info!(
        total = pools.len(),
        daily = pools.daily.len(),
        include = pools.include.len(),
        "Number of unique videos"
    );
    pools
}
