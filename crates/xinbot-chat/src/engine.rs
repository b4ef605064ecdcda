//! The per-turn orchestration: detect language, route intent, run the
//! pipeline, paginate, localize, and record the turn.

use std::sync::Arc;

use xinbot_core::catalog::Catalog;
use xinbot_core::error::Error;
use xinbot_core::taxonomy::TaxonomyHandle;
use xinbot_core::traits::{Geocoder, LanguageService, SimilaritySearch};
use xinbot_core::types::{MediaFilter, ResponsePayload};
use xinbot_core::weights::{NEARBY_MAX_KM, NEARBY_TOP_K, PAGE_SIZE};
use xinbot_geo::{geocode_with_fallbacks, PointStore};
use xinbot_hybrid::{apply_filter, paginate, SearchPipeline};
use xinbot_lang::{fallback_language, is_chinese};
use xinbot_text::normalize;

use crate::advice::AdviceScenario;
use crate::intent::{classify, Intent};
use crate::respond;
use crate::session::{SessionStore, TurnRecord};

#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub page_size: usize,
    pub nearby_max_km: f64,
    pub nearby_top_k: usize,
    pub vector_top_k: usize,
    pub default_model: String,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            nearby_max_km: NEARBY_MAX_KM,
            nearby_top_k: NEARBY_TOP_K,
            vector_top_k: 20,
            default_model: "default".to_string(),
        }
    }
}

/// The conversational recommendation engine. Catalog and taxonomy are
/// read-mostly shared snapshots; sessions are the only per-request
/// mutable state.
pub struct ChatEngine {
    catalog: Arc<Catalog>,
    taxonomy: Arc<TaxonomyHandle>,
    sessions: SessionStore,
    pipeline: SearchPipeline,
    points: PointStore,
    geocoder: Option<Arc<dyn Geocoder>>,
    lang: Option<Arc<dyn LanguageService>>,
    opts: EngineOptions,
}

impl ChatEngine {
    pub fn new(
        catalog: Arc<Catalog>,
        taxonomy: Arc<TaxonomyHandle>,
        points: PointStore,
        opts: EngineOptions,
    ) -> Self {
        let pipeline = SearchPipeline::new(opts.vector_top_k);
        Self {
            catalog,
            taxonomy,
            sessions: SessionStore::new(),
            pipeline,
            points,
            geocoder: None,
            lang: None,
            opts,
        }
    }

    pub fn with_similarity(mut self, similarity: Arc<dyn SimilaritySearch>) -> Self {
        self.pipeline = SearchPipeline::new(self.opts.vector_top_k).with_similarity(similarity);
        self
    }

    pub fn with_geocoder(mut self, geocoder: Arc<dyn Geocoder>) -> Self {
        self.geocoder = Some(geocoder);
        self
    }

    pub fn with_language(mut self, lang: Arc<dyn LanguageService>) -> Self {
        self.lang = Some(lang);
        self
    }

    pub fn taxonomy(&self) -> &TaxonomyHandle {
        &self.taxonomy
    }

    pub fn history(&self, session_id: &str) -> Vec<TurnRecord> {
        self.sessions.history(session_id)
    }

    /// Handle one conversational turn for a session.
    pub async fn handle(
        &self,
        session_id: &str,
        raw_query: &str,
        model: Option<&str>,
    ) -> ResponsePayload {
        let raw = raw_query.trim();
        let model = model.unwrap_or(&self.opts.default_model);

        let language = self.detect_language(raw).await;
        // Phrase-driven intents (pagination, media preference) match the
        // raw utterance in any supported language; only a general search
        // is bridged into the catalog language first.
        let mut intent = classify(raw);
        if !is_chinese(&language) {
            if let Intent::GeneralRecommendation { .. } = intent {
                let bridged = self.bridge_query(raw).await;
                intent = classify(&bridged);
            }
        }
        tracing::debug!(session_id, language = language.as_str(), ?intent, "turn");

        let mut response = match intent {
            Intent::NearbyClinic { address: None } => {
                tracing::debug!("nearby request rejected: {}", Error::AddressNotFound);
                ResponsePayload::XinPoints(xinbot_core::types::NearbyPoints {
                    address: None,
                    points: vec![],
                    message: Some(respond::MSG_ADDRESS_PROMPT.to_string()),
                })
            }
            Intent::NearbyClinic {
                address: Some(addr),
            }
            | Intent::DirectAddress { address: addr } => self.respond_nearby(&addr).await,
            Intent::PaginationContinue => self.respond_pagination(session_id, model).await,
            Intent::MediaPreferenceOnly { filter } => {
                self.respond_media_only(session_id, filter, model).await
            }
            Intent::SpecialAdvice { scenario } => Self::respond_advice(scenario),
            Intent::GeneralRecommendation { query, filter } => {
                self.respond_recommendation(&query, filter, 0, model).await
            }
        };

        if !is_chinese(&language) {
            response = self.localize(response, &language).await;
        }
        self.sessions
            .append_turn(session_id, raw, response.clone(), &language);
        response
    }

    /// Search without session bookkeeping (the `/recommend` surface).
    pub async fn recommend(&self, query: &str, model: Option<&str>) -> ResponsePayload {
        let model = model.unwrap_or(&self.opts.default_model);
        self.respond_recommendation(query.trim(), None, 0, model)
            .await
    }

    /// Rank nearby points for a caller-supplied address (the `/nearby`
    /// surface).
    pub async fn nearby(&self, address: &str) -> ResponsePayload {
        let address = address.trim();
        if address.is_empty() {
            return ResponsePayload::XinPoints(xinbot_core::types::NearbyPoints {
                address: None,
                points: vec![],
                message: Some(respond::MSG_ADDRESS_PROMPT.to_string()),
            });
        }
        self.respond_nearby(address).await
    }

    async fn detect_language(&self, raw: &str) -> String {
        let Some(lang) = &self.lang else {
            return fallback_language(raw);
        };
        match lang.detect(raw).await {
            Ok(tag) => tag,
            Err(e) => {
                tracing::warn!("language detection failed, using script check: {e:#}");
                fallback_language(raw)
            }
        }
    }

    /// Bring a foreign-language query into the catalog language for
    /// routing and search. Translation failure searches the text as-is.
    async fn bridge_query(&self, raw: &str) -> String {
        let Some(lang) = &self.lang else {
            return raw.to_string();
        };
        match lang.translate(raw, "zh-TW").await {
            Ok(translated) => translated,
            Err(e) => {
                tracing::warn!("query translation failed, searching as-is: {e:#}");
                raw.to_string()
            }
        }
    }

    async fn respond_nearby(&self, address: &str) -> ResponsePayload {
        match self.locate(address).await {
            Ok((lat, lon)) => {
                let hits = self
                    .points
                    .nearby(lat, lon, self.opts.nearby_max_km, self.opts.nearby_top_k);
                respond::nearby_points(address, &hits)
            }
            Err(e) => {
                tracing::debug!("nearby lookup degraded: {e}");
                ResponsePayload::XinPoints(xinbot_core::types::NearbyPoints {
                    address: Some(address.to_string()),
                    points: vec![],
                    message: Some(respond::msg_geocode_miss(address)),
                })
            }
        }
    }

    async fn locate(&self, address: &str) -> xinbot_core::error::Result<(f64, f64)> {
        let geocoder = self
            .geocoder
            .as_ref()
            .ok_or_else(|| Error::GeocodeMiss(address.to_string()))?;
        geocode_with_fallbacks(geocoder.as_ref(), address)
            .await
            .ok_or_else(|| Error::GeocodeMiss(address.to_string()))
    }

    async fn respond_recommendation(
        &self,
        query: &str,
        filter: Option<MediaFilter>,
        offset: usize,
        model: &str,
    ) -> ResponsePayload {
        let taxonomy = self.taxonomy.current();
        let terms = normalize(query, &taxonomy);
        if terms.is_empty() {
            tracing::debug!("search short-circuited: {}", Error::NoSearchableTerms);
            let empty = paginate(&[], 0, self.opts.page_size);
            return respond::recommendation_page(&self.catalog, query, filter, &empty);
        }
        let ranked = self.pipeline.search(&self.catalog, &terms, query, model).await;
        let filtered = apply_filter(&self.catalog, ranked, filter);
        let page = paginate(&filtered, offset, self.opts.page_size);
        respond::recommendation_page(&self.catalog, query, filter, &page)
    }

    /// "Show more": recompute the full result set from the stored search
    /// query and slice the next window. No inter-page caching, so a
    /// taxonomy reload between turns is honored.
    async fn respond_pagination(&self, session_id: &str, model: &str) -> ResponsePayload {
        let Some(prev) = self.sessions.find_last_recommendation(session_id) else {
            tracing::debug!("pagination: {}", Error::NoPriorRecommendation);
            return ResponsePayload::Text {
                message: respond::MSG_NOTHING_TO_CONTINUE.to_string(),
            };
        };
        self.respond_recommendation(
            &prev.query,
            prev.filter_type,
            prev.offset + prev.limit,
            model,
        )
        .await
    }

    /// "Only articles"/"only videos": rerun the last topic under the new
    /// filter, from the first page.
    async fn respond_media_only(
        &self,
        session_id: &str,
        filter: MediaFilter,
        model: &str,
    ) -> ResponsePayload {
        let Some(prev) = self.sessions.find_last_recommendation(session_id) else {
            return ResponsePayload::Text {
                message: respond::MSG_NO_TOPIC_FOR_PREFERENCE.to_string(),
            };
        };
        self.respond_recommendation(&prev.query, Some(filter), 0, model)
            .await
    }

    fn respond_advice(scenario: &AdviceScenario) -> ResponsePayload {
        ResponsePayload::Advice(scenario.to_doc())
    }

    /// Localize the user-facing message fields back into the detected
    /// language. Any failure keeps the original text.
    async fn localize(&self, mut response: ResponsePayload, target: &str) -> ResponsePayload {
        let Some(lang) = &self.lang else {
            return response;
        };
        let translate = |text: String| async move {
            match lang.translate(&text, target).await {
                Ok(t) => t,
                Err(e) => {
                    tracing::warn!("response localization failed: {e:#}");
                    text
                }
            }
        };
        match &mut response {
            ResponsePayload::Text { message } => {
                *message = translate(std::mem::take(message)).await;
            }
            ResponsePayload::CourseRecommendation(page) => {
                if let Some(msg) = page.message.take() {
                    page.message = Some(translate(msg).await);
                }
            }
            ResponsePayload::XinPoints(np) => {
                if let Some(msg) = np.message.take() {
                    np.message = Some(translate(msg).await);
                }
            }
            ResponsePayload::Advice(doc) => {
                doc.title = translate(std::mem::take(&mut doc.title)).await;
                let mut localized = Vec::with_capacity(doc.advice.len());
                for line in doc.advice.drain(..) {
                    localized.push(translate(line).await);
                }
                doc.advice = localized;
            }
        }
        response
    }
}
