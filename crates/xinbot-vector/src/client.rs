use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use xinbot_core::traits::SimilaritySearch;
use xinbot_core::weights::SIMILARITY_FLOOR;

#[derive(Serialize)]
struct SimilarityRequest<'a> {
    query: &'a str,
    model: &'a str,
    top_k: usize,
}

#[derive(Debug, Deserialize)]
struct SimilarityHit {
    id: String,
    similarity: f32,
}

#[derive(Debug, Deserialize)]
struct SimilarityResponse {
    #[serde(default)]
    results: Vec<SimilarityHit>,
}

/// Client for the remote similarity endpoint (`POST {base}/similar`).
pub struct SimilarityClient {
    http: reqwest::Client,
    base_url: String,
}

impl SimilarityClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl SimilaritySearch for SimilarityClient {
    async fn similar_units(
        &self,
        query: &str,
        model: &str,
        top_k: usize,
    ) -> anyhow::Result<Vec<(String, f32)>> {
        let req = SimilarityRequest {
            query,
            model,
            top_k,
        };
        let resp = self
            .http
            .post(format!("{}/similar", self.base_url))
            .json(&req)
            .send()
            .await?
            .error_for_status()?;
        let body: SimilarityResponse = resp.json().await?;
        let hits: Vec<(String, f32)> = body
            .results
            .into_iter()
            .filter(|h| h.similarity > SIMILARITY_FLOOR)
            .map(|h| (h.id, h.similarity))
            .collect();
        tracing::debug!(model, hits = hits.len(), "similarity search");
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_parsing_tolerates_missing_results() {
        let parsed: SimilarityResponse = serde_json::from_str("{}").expect("parse");
        assert!(parsed.results.is_empty());

        let parsed: SimilarityResponse = serde_json::from_str(
            r#"{"results": [{"id": "u1", "similarity": 0.61}, {"id": "u2", "similarity": 0.12}]}"#,
        )
        .expect("parse");
        assert_eq!(parsed.results.len(), 2);
        assert_eq!(parsed.results[0].id, "u1");
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client =
            SimilarityClient::new("http://localhost:9090/", Duration::from_secs(5)).expect("client");
        assert_eq!(client.base_url, "http://localhost:9090");
    }
}
