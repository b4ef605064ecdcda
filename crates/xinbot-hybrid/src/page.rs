//! Pagination slicing over a ranked result list.

use xinbot_core::catalog::Catalog;
use xinbot_core::types::{MediaFilter, ScoredResult};

/// One page plus the figures a continuation turn needs.
#[derive(Debug, Clone)]
pub struct Page {
    pub items: Vec<ScoredResult>,
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
    pub has_more: bool,
}

/// Keep only units matching the media filter; `None` keeps everything.
pub fn apply_filter(
    catalog: &Catalog,
    results: Vec<ScoredResult>,
    filter: Option<MediaFilter>,
) -> Vec<ScoredResult> {
    match filter {
        None => results,
        Some(f) => results
            .into_iter()
            .filter(|r| {
                let is_article = catalog.get(r.unit_index).is_article;
                match f {
                    MediaFilter::Article => is_article,
                    MediaFilter::Video => !is_article,
                }
            })
            .collect(),
    }
}

/// Slice `[offset, offset + limit)`. Invariants:
/// `offset + items.len() <= total` and `has_more == (offset + limit < total)`.
pub fn paginate(results: &[ScoredResult], offset: usize, limit: usize) -> Page {
    let total = results.len();
    let start = offset.min(total);
    let end = offset.saturating_add(limit).min(total);
    Page {
        items: results[start..end].to_vec(),
        total,
        offset,
        limit,
        has_more: offset.saturating_add(limit) < total,
    }
}
