//! Per-turn intent classification: a priority-ordered rule list where the
//! first match wins and every state is terminal for the turn.

use xinbot_core::types::MediaFilter;
use xinbot_geo::{extract_address, is_direct_address, mentions_nearby_clinic};

use crate::advice::{match_scenario, AdviceScenario};

/// Full continuation utterances, compared after compaction (punctuation
/// and whitespace stripped, lower-cased).
const PAGINATION_PHRASES: &[&str] = &[
    "更多", "再更多", "給我更多", "還有嗎", "還有沒有", "下一頁", "下一批", "下五個",
    "給我下五個", "再五個", "再來", "繼續", "more", "show me more", "next", "next page",
];

const ARTICLE_ONLY_PHRASES: &[&str] = &[
    "只要文章", "只看文章", "只想看文章", "文章就好", "only articles", "articles only",
];
const VIDEO_ONLY_PHRASES: &[&str] = &[
    "只要影片", "只看影片", "只想看影片", "影片就好", "only videos", "videos only",
];

/// The five routed states plus the default search state.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Proximity + clinic words. `address` is `None` when extraction
    /// failed (the AddressNotFound branch).
    NearbyClinic { address: Option<String> },
    /// A bare address: recognized region prefix, no proximity word needed.
    DirectAddress { address: String },
    /// "Show me more" — resolved against session history by the engine.
    PaginationContinue,
    /// Media preference with no residual topic; reuses the last search.
    MediaPreferenceOnly { filter: MediaFilter },
    /// Curated scenario matched by keyword co-occurrence.
    SpecialAdvice { scenario: &'static AdviceScenario },
    /// Default: run the hybrid pipeline.
    GeneralRecommendation {
        query: String,
        filter: Option<MediaFilter>,
    },
}

fn compact(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}

fn is_pagination(query: &str) -> bool {
    let q = compact(query);
    !q.is_empty() && PAGINATION_PHRASES.iter().any(|p| compact(p) == q)
}

fn media_preference(query: &str) -> Option<MediaFilter> {
    if ARTICLE_ONLY_PHRASES.iter().any(|p| query.contains(p)) {
        Some(MediaFilter::Article)
    } else if VIDEO_ONLY_PHRASES.iter().any(|p| query.contains(p)) {
        Some(MediaFilter::Video)
    } else {
        None
    }
}

fn strip_media_phrases(query: &str) -> String {
    let mut q = query.to_string();
    for p in ARTICLE_ONLY_PHRASES.iter().chain(VIDEO_ONLY_PHRASES) {
        q = q.replace(p, " ");
    }
    q.trim().to_string()
}

/// What is left to search for once media phrases *and* media-intent
/// function words are gone. Empty means "preference only".
fn residual_topic(query: &str) -> String {
    let mut q = strip_media_phrases(query);
    for w in xinbot_text::normalize::FUNCTIONAL_WORDS {
        q = q.replace(w, " ");
    }
    q.trim().to_string()
}

/// Classify one turn. Evaluation order is the contract: nearby-clinic,
/// direct address, pagination, media-preference-only, special advice,
/// then the general search fallback.
pub fn classify(query: &str) -> Intent {
    let q = query.trim();

    if mentions_nearby_clinic(q) {
        return Intent::NearbyClinic {
            address: extract_address(q).ok(),
        };
    }

    if is_direct_address(q) {
        return Intent::DirectAddress {
            address: q.to_string(),
        };
    }

    if is_pagination(q) {
        return Intent::PaginationContinue;
    }

    let filter = media_preference(q);
    if let Some(f) = filter {
        if compact(&residual_topic(q)).chars().count() < 2 {
            return Intent::MediaPreferenceOnly { filter: f };
        }
    }

    if let Some(scenario) = match_scenario(q) {
        return Intent::SpecialAdvice { scenario };
    }

    let search_query = if filter.is_some() {
        strip_media_phrases(q)
    } else {
        q.to_string()
    };
    Intent::GeneralRecommendation {
        query: search_query,
        filter,
    }
}
