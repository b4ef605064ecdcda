use std::time::Duration;

use async_trait::async_trait;
use moka::sync::Cache;
use serde::{Deserialize, Serialize};

use xinbot_core::traits::LanguageService;
use xinbot_core::types::LanguageTag;

const CACHE_CAPACITY: u64 = 10_000;
const CACHE_TTL: Duration = Duration::from_secs(86_400);

#[derive(Serialize)]
struct DetectRequest<'a> {
    q: &'a str,
}

#[derive(Debug, Deserialize)]
struct DetectHit {
    language: String,
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// Client for a LibreTranslate-style service (`POST {base}/detect`,
/// `POST {base}/translate`) with a write-through translation cache.
pub struct TranslationClient {
    http: reqwest::Client,
    base_url: String,
    cache: Cache<String, String>,
}

impl TranslationClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            cache,
        })
    }

    fn cache_key(target: &str, text: &str) -> String {
        format!("{target}\u{1}{text}")
    }
}

#[async_trait]
impl LanguageService for TranslationClient {
    async fn detect(&self, text: &str) -> anyhow::Result<LanguageTag> {
        let resp = self
            .http
            .post(format!("{}/detect", self.base_url))
            .json(&DetectRequest { q: text })
            .send()
            .await?
            .error_for_status()?;
        let hits: Vec<DetectHit> = resp.json().await?;
        let tag = hits
            .into_iter()
            .next()
            .map(|h| h.language)
            .ok_or_else(|| anyhow::anyhow!("detect returned no candidates"))?;
        Ok(tag)
    }

    async fn translate(&self, text: &str, target: &str) -> anyhow::Result<String> {
        let key = Self::cache_key(target, text);
        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit);
        }
        let resp = self
            .http
            .post(format!("{}/translate", self.base_url))
            .json(&TranslateRequest {
                q: text,
                source: "auto",
                target,
            })
            .send()
            .await?
            .error_for_status()?;
        let body: TranslateResponse = resp.json().await?;
        self.cache.insert(key, body.translated_text.clone());
        tracing::debug!(target, "translated {} chars", text.chars().count());
        Ok(body.translated_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_separates_targets() {
        assert_ne!(
            TranslationClient::cache_key("en", "你好"),
            TranslationClient::cache_key("ja", "你好")
        );
    }

    #[tokio::test]
    async fn cached_translation_skips_the_network() {
        // Unroutable base URL: only a cache hit can answer.
        let client =
            TranslationClient::new("http://127.0.0.1:1", Duration::from_millis(200)).expect("client");
        client
            .cache
            .insert(TranslationClient::cache_key("en", "你好"), "hello".into());
        let out = client.translate("你好", "en").await.expect("cache hit");
        assert_eq!(out, "hello");
    }
}
