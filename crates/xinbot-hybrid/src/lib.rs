#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

//! The hybrid ranking pipeline: lexical scoring merged with remote
//! vector similarity, then episode-aware reordering.

pub mod episode;
pub mod merge;
pub mod page;

use std::sync::Arc;

use xinbot_core::catalog::Catalog;
use xinbot_core::traits::SimilaritySearch;
use xinbot_core::types::{ScoredResult, TermSet};

pub use episode::{base_key, group_and_flatten, part_rank};
pub use merge::merge_vector_hits;
pub use page::{apply_filter, paginate, Page};

/// Search facade. The vector collaborator is optional; without it (or
/// when it fails) ranking is lexical-only — never an error.
pub struct SearchPipeline {
    similarity: Option<Arc<dyn SimilaritySearch>>,
    vector_top_k: usize,
}

impl SearchPipeline {
    pub fn new(vector_top_k: usize) -> Self {
        Self {
            similarity: None,
            vector_top_k,
        }
    }

    pub fn with_similarity(mut self, similarity: Arc<dyn SimilaritySearch>) -> Self {
        self.similarity = Some(similarity);
        self
    }

    /// Full unpaginated ranking for a normalized query. `query` is the
    /// text sent to the similarity collaborator; `terms` drive the
    /// lexical side.
    pub async fn search(
        &self,
        catalog: &Catalog,
        terms: &TermSet,
        query: &str,
        model: &str,
    ) -> Vec<ScoredResult> {
        if terms.is_empty() {
            return Vec::new();
        }
        let lexical = xinbot_text::lexical_search(catalog, terms);

        let vector_hits = match &self.similarity {
            Some(svc) => match svc.similar_units(query, model, self.vector_top_k).await {
                Ok(hits) => hits,
                Err(e) => {
                    tracing::warn!("similarity service unavailable, lexical-only: {e:#}");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let merged = merge_vector_hits(catalog, lexical, &vector_hits);
        group_and_flatten(catalog, merged)
    }
}
