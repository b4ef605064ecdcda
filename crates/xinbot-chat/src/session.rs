//! Per-session bounded history enabling "show more" continuation.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;

use xinbot_core::types::{RecommendationPage, ResponsePayload};
use xinbot_core::weights::HISTORY_CAP;

/// One handled turn as recorded in a session's history.
#[derive(Debug, Clone, Serialize)]
pub struct TurnRecord {
    pub raw_query: String,
    pub response: ResponsePayload,
    pub detected_language: String,
    pub at: DateTime<Utc>,
}

/// Concurrent session map. Different sessions never block each other;
/// appends within one session are serialized by the entry guard.
#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<String, VecDeque<TurnRecord>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn, evicting the oldest entry past the cap.
    pub fn append_turn(
        &self,
        session_id: &str,
        raw_query: &str,
        response: ResponsePayload,
        detected_language: &str,
    ) {
        let mut history = self.sessions.entry(session_id.to_string()).or_default();
        history.push_back(TurnRecord {
            raw_query: raw_query.to_string(),
            response,
            detected_language: detected_language.to_string(),
            at: Utc::now(),
        });
        while history.len() > HISTORY_CAP {
            history.pop_front();
        }
    }

    /// Most recent `course_recommendation` in the session, newest first.
    pub fn find_last_recommendation(&self, session_id: &str) -> Option<RecommendationPage> {
        let history = self.sessions.get(session_id)?;
        history.iter().rev().find_map(|t| match &t.response {
            ResponsePayload::CourseRecommendation(page) => Some(page.clone()),
            _ => None,
        })
    }

    /// Cloned snapshot of a session's history (empty for unseen ids).
    pub fn history(&self, session_id: &str) -> Vec<TurnRecord> {
        self.sessions
            .get(session_id)
            .map(|h| h.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xinbot_core::types::ResponsePayload;

    fn text(msg: &str) -> ResponsePayload {
        ResponsePayload::Text {
            message: msg.to_string(),
        }
    }

    #[test]
    fn history_caps_at_fifty_entries() {
        let store = SessionStore::new();
        for i in 0..51 {
            store.append_turn("s", &format!("q{i}"), text("ok"), "zh-TW");
        }
        let history = store.history("s");
        assert_eq!(history.len(), HISTORY_CAP);
        assert_eq!(history[0].raw_query, "q1", "first append was evicted");
        assert_eq!(history.last().map(|t| t.raw_query.as_str()), Some("q50"));
    }

    #[test]
    fn last_recommendation_scans_newest_first() {
        let store = SessionStore::new();
        assert!(store.find_last_recommendation("s").is_none());

        let page = |q: &str| {
            ResponsePayload::CourseRecommendation(xinbot_core::types::RecommendationPage {
                query: q.to_string(),
                offset: 0,
                limit: 5,
                total: 0,
                has_more: false,
                filter_type: None,
                results: vec![],
                message: None,
            })
        };
        store.append_turn("s", "早", page("壓力"), "zh-TW");
        store.append_turn("s", "午", page("失眠"), "zh-TW");
        store.append_turn("s", "晚", text("hi"), "zh-TW");

        let last = store.find_last_recommendation("s").expect("present");
        assert_eq!(last.query, "失眠");
    }

    #[test]
    fn sessions_are_isolated() {
        let store = SessionStore::new();
        store.append_turn("a", "hello", text("hi"), "en");
        assert!(store.history("b").is_empty());
        assert_eq!(store.session_count(), 1);
    }
}
