//! Domain types shared by the search engines and the chat layer.

use serde::{Deserialize, Serialize};

pub type UnitId = String;
pub type LanguageTag = String;

/// One subtitle segment of a video unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subtitle {
    pub text: String,
    #[serde(default)]
    pub start_sec: f32,
}

/// A recommendable item: one video lesson or one article.
///
/// - `id`: stable unit identifier from the dataset
/// - `section_title`/`title`: display identity, also the grouping key input
/// - `content_text`: article body (empty for most videos)
/// - `media_url`: youtube URL for videos, article URL for articles
/// - `subtitles`: ordered segments, empty for articles
///
/// Immutable after catalog load. `title_text` and `body_text` are the
/// lower-cased search projections computed once at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentUnit {
    pub id: UnitId,
    #[serde(default)]
    pub section_title: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content_text: String,
    #[serde(default)]
    pub is_article: bool,
    #[serde(default)]
    pub media_url: String,
    #[serde(default)]
    pub subtitles: Vec<Subtitle>,
    #[serde(skip)]
    pub title_text: String,
    #[serde(skip)]
    pub body_text: String,
}

/// Output of query normalization: three pairwise-disjoint term lists.
///
/// Insertion order is preserved so downstream scoring and merging stay
/// deterministic for identical inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermSet {
    /// Taxonomy keywords the user actually typed (or the whole-query fallback).
    pub user_core: Vec<String>,
    /// Sibling keywords from matched categories, not typed by the user.
    pub expanded: Vec<String>,
    /// Residual tokens: length >= 2, not stop words, not functional words.
    pub other: Vec<String>,
}

impl TermSet {
    pub fn is_empty(&self) -> bool {
        self.user_core.is_empty() && self.expanded.is_empty() && self.other.is_empty()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.user_core.iter().any(|t| t == term)
            || self.expanded.iter().any(|t| t == term)
            || self.other.iter().any(|t| t == term)
    }
}

/// One scored catalog unit. Built fresh per search call, never persisted.
///
/// `unit_index` points into the owning [`crate::catalog::Catalog`];
/// `best_segment` is an index into the unit's subtitles.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredResult {
    pub unit_index: usize,
    pub score: f32,
    pub best_segment: Option<usize>,
}

/// Media-type filter expressed by the user ("only articles" / "only videos").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaFilter {
    Article,
    Video,
}

/// One rendered recommendation entry in a response page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationItem {
    pub section_title: String,
    pub title: String,
    pub score: f32,
    #[serde(rename = "type")]
    pub media_type: MediaFilter,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// A page of recommendations. `query` is the originating *search* query
/// (post media-preference stripping), sufficient for a later "show more"
/// turn to recompute the identical result set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationPage {
    pub query: String,
    pub offset: usize,
    pub limit: usize,
    pub total: usize,
    pub has_more: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_type: Option<MediaFilter>,
    pub results: Vec<RecommendationItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// One service location within range of the requested address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyPointItem {
    pub title: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tel: Option<String>,
    pub distance_km: f64,
}

/// Nearby service locations for an extracted address. `address` is `None`
/// when no usable address could be pulled out of the query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyPoints {
    pub address: Option<String>,
    pub points: Vec<NearbyPointItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Pre-authored advice for one curated scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdviceDoc {
    pub scenario: String,
    pub title: String,
    pub advice: Vec<String>,
}

/// The discriminated response returned for every turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponsePayload {
    CourseRecommendation(RecommendationPage),
    XinPoints(NearbyPoints),
    Advice(AdviceDoc),
    Text { message: String },
}
