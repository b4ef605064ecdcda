//! Collaborator seams. Each trait has a narrow contract; implementations
//! live in their own crates and talk to remote services.

use async_trait::async_trait;

use crate::types::LanguageTag;

/// Embedding-similarity collaborator. Given a query and a model id,
/// returns up to `top_k` `(unit_id, cosine_similarity)` pairs, already
/// filtered to the service's relevance floor.
#[async_trait]
pub trait SimilaritySearch: Send + Sync {
    async fn similar_units(
        &self,
        query: &str,
        model: &str,
        top_k: usize,
    ) -> anyhow::Result<Vec<(String, f32)>>;
}

/// Address-to-coordinates collaborator. `Ok(None)` means the service
/// answered but found nothing for this address string.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, address: &str) -> anyhow::Result<Option<(f64, f64)>>;
}

/// Language detection and translation collaborator.
#[async_trait]
pub trait LanguageService: Send + Sync {
    async fn detect(&self, text: &str) -> anyhow::Result<LanguageTag>;
    async fn translate(&self, text: &str, target: &str) -> anyhow::Result<String>;
}
