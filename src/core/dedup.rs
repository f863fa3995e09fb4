//! Deduplication pre-pass run before pools reach the scheduler.
//!
//! The same video is often returned by several keyword queries. Entries are
//! collapsed by URL with last-write-wins semantics: the final `(item, kind)`
//! pair seen for a URL is kept, at the position where that URL first
//! appeared.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{Item, PoolKind, Pools};

/// Collapse duplicate URLs and partition into daily/include pools
pub fn dedupe<I>(entries: I) -> Pools
where
    I: IntoIterator<Item = (Item, PoolKind)>,
{
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<(Item, PoolKind)> = Vec::new();
    let mut total = 0usize;

    for (item, kind) in entries {
        total += 1;
        match positions.get(&item.url) {
            Some(&pos) => {
                debug!(url = %item.url, %kind, "Replacing duplicate video");
                unique[pos] = (item, kind);
            }
            None => {
                positions.insert(item.url.clone(), unique.len());
                unique.push((item, kind));
            }
        }
    }

    debug!(total, unique = unique.len(), "Deduplicated videos");

    let mut pools = Pools::default();
    for (item, kind) in unique {
        match kind {
            PoolKind::Daily => pools.daily.push(item),
            PoolKind::Include => pools.include.push(item),
        }
    }
    pools
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, url: &str) -> Item {
        Item::new(id, format!("Video {}", id), url, 20)
    }

    #[test]
    fn test_last_write_wins() {
        let pools = dedupe(vec![
            (item("A", "url1"), PoolKind::Daily),
            (item("B", "url1"), PoolKind::Include),
        ]);

        assert!(pools.daily.is_empty());
        assert_eq!(pools.include.len(), 1);
        assert_eq!(pools.include[0].id, "B");
    }

    #[test]
    fn test_first_position_is_kept() {
        let pools = dedupe(vec![
            (item("A", "url1"), PoolKind::Include),
            (item("B", "url2"), PoolKind::Include),
            (item("C", "url1"), PoolKind::Include),
        ]);

        let ids: Vec<_> = pools.include.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["C", "B"]);
    }

    #[test]
    fn test_partition_by_kind() {
        let pools = dedupe(vec![
            (item("A", "url1"), PoolKind::Daily),
            (item("B", "url2"), PoolKind::Include),
            (item("C", "url3"), PoolKind::Include),
        ]);

        assert_eq!(pools.daily.len(), 1);
        assert_eq!(pools.include.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        let pools = dedupe(Vec::new());
        assert!(pools.is_empty());
    }
}
