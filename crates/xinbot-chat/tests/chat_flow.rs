use std::sync::Arc;

use async_trait::async_trait;

use xinbot_chat::{ChatEngine, EngineOptions};
use xinbot_core::catalog::Catalog;
use xinbot_core::taxonomy::{Taxonomy, TaxonomyHandle};
use xinbot_core::traits::LanguageService;
use xinbot_core::types::{ContentUnit, MediaFilter, ResponsePayload, Subtitle};
use xinbot_geo::PointStore;

fn unit(id: &str, title: &str, body: &str, is_article: bool) -> ContentUnit {
    ContentUnit {
        id: id.into(),
        section_title: "好眠課程".into(),
        title: title.into(),
        content_text: body.into(),
        is_article,
        media_url: if is_article {
            format!("https://example.org/{id}")
        } else {
            format!("https://youtube.com/watch?v={id}")
        },
        subtitles: if is_article {
            vec![]
        } else {
            vec![Subtitle {
                text: body.into(),
                start_sec: 12.0,
            }]
        },
        title_text: String::new(),
        body_text: String::new(),
    }
}

/// Seven units about insomnia with strictly decreasing relevance.
fn insomnia_catalog() -> Arc<Catalog> {
    let units = (0..7)
        .map(|i| {
            unit(
                &format!("u{i}"),
                &format!("失眠指南第{i}講"),
                &"失眠".repeat(7 - i),
                i % 2 == 0,
            )
        })
        .collect();
    Arc::new(Catalog::from_units(units))
}

fn engine(catalog: Arc<Catalog>) -> ChatEngine {
    ChatEngine::new(
        catalog,
        Arc::new(TaxonomyHandle::new(Taxonomy::builtin())),
        PointStore::empty(),
        EngineOptions::default(),
    )
}

#[tokio::test]
async fn pagination_without_history_is_a_friendly_text() {
    let engine = engine(insomnia_catalog());
    let resp = engine.handle("s1", "給我下五個", None).await;
    match resp {
        ResponsePayload::Text { message } => assert!(!message.is_empty()),
        other => panic!("expected text payload, got {other:?}"),
    }
}

#[tokio::test]
async fn recommendation_pages_then_continues_from_history() {
    let catalog = insomnia_catalog();
    let engine = engine(catalog.clone());

    let first = engine.handle("s1", "最近一直失眠", None).await;
    let page = match first {
        ResponsePayload::CourseRecommendation(p) => p,
        other => panic!("expected recommendation, got {other:?}"),
    };
    assert_eq!(page.offset, 0);
    assert_eq!(page.total, 7);
    assert_eq!(page.results.len(), 5);
    assert!(page.has_more);
    assert!(page.offset + page.results.len() <= page.total);
    // Subtitle text counts toward the body, so the densest video leads.
    assert_eq!(page.results[0].title, "失眠指南第1講");

    let second = engine.handle("s1", "給我下五個", None).await;
    let page2 = match second {
        ResponsePayload::CourseRecommendation(p) => p,
        other => panic!("expected recommendation, got {other:?}"),
    };
    assert_eq!(page2.offset, 5);
    assert_eq!(page2.results.len(), 2);
    assert!(!page2.has_more);
    assert_eq!(page2.query, page.query, "continuation reuses the stored query");

    let third = engine.handle("s1", "更多", None).await;
    let page3 = match third {
        ResponsePayload::CourseRecommendation(p) => p,
        other => panic!("expected recommendation, got {other:?}"),
    };
    assert!(page3.results.is_empty());
    assert!(page3.message.is_some(), "exhausted pages say so");
}

#[tokio::test]
async fn media_preference_reuses_last_topic() {
    let engine = engine(insomnia_catalog());

    let none = engine.handle("s2", "只要文章", None).await;
    assert!(
        matches!(none, ResponsePayload::Text { .. }),
        "no prior topic yields a prompt"
    );

    engine.handle("s2", "失眠怎麼辦", None).await;
    let filtered = engine.handle("s2", "只要文章", None).await;
    match filtered {
        ResponsePayload::CourseRecommendation(p) => {
            assert_eq!(p.filter_type, Some(MediaFilter::Article));
            assert!(p.total > 0);
            assert!(p
                .results
                .iter()
                .all(|r| r.media_type == MediaFilter::Article));
            assert_eq!(p.offset, 0, "preference restarts from the first page");
        }
        other => panic!("expected recommendation, got {other:?}"),
    }
}

#[tokio::test]
async fn nearby_clinic_without_address_reports_no_points() {
    let engine = engine(insomnia_catalog());
    let resp = engine.handle("s3", "附近有沒有心據點", None).await;
    match resp {
        ResponsePayload::XinPoints(np) => {
            assert!(np.address.is_none());
            assert!(np.points.is_empty());
            assert!(np.message.is_some());
        }
        other => panic!("expected xin_points, got {other:?}"),
    }
}

#[tokio::test]
async fn advice_scenario_bypasses_search() {
    let engine = engine(insomnia_catalog());
    let resp = engine.handle("s4", "憂鬱到想去看醫生", None).await;
    match resp {
        ResponsePayload::Advice(doc) => {
            assert_eq!(doc.scenario, "depression_seek_doctor");
            assert!(!doc.advice.is_empty());
        }
        other => panic!("expected advice, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_query_terms_yield_suggestion_not_error() {
    let engine = engine(insomnia_catalog());
    let resp = engine.handle("s5", "嗎", None).await;
    match resp {
        ResponsePayload::CourseRecommendation(p) => {
            assert_eq!(p.total, 0);
            assert!(p.message.is_some());
        }
        other => panic!("expected recommendation, got {other:?}"),
    }
}

#[tokio::test]
async fn turns_are_recorded_per_session() {
    let engine = engine(insomnia_catalog());
    engine.handle("s6", "失眠", None).await;
    engine.handle("s6", "給我下五個", None).await;
    assert_eq!(engine.history("s6").len(), 2);
    assert!(engine.history("other").is_empty());
}

struct EnglishBridge;

#[async_trait]
impl LanguageService for EnglishBridge {
    async fn detect(&self, text: &str) -> anyhow::Result<String> {
        Ok(if text.is_ascii() { "en".into() } else { "zh-TW".into() })
    }

    async fn translate(&self, text: &str, target: &str) -> anyhow::Result<String> {
        if target == "zh-TW" {
            Ok("失眠".to_string())
        } else {
            Ok(format!("[{target}] {text}"))
        }
    }
}

#[tokio::test]
async fn foreign_queries_search_in_chinese_and_localize_messages() {
    let engine = engine(insomnia_catalog()).with_language(Arc::new(EnglishBridge));

    let resp = engine.handle("s7", "i cannot sleep at night", None).await;
    match resp {
        ResponsePayload::CourseRecommendation(p) => {
            assert_eq!(p.total, 7, "query was bridged to the catalog language");
        }
        other => panic!("expected recommendation, got {other:?}"),
    }

    let text = engine.handle("s8", "show me more", None).await;
    match text {
        ResponsePayload::Text { message } => {
            assert!(message.starts_with("[en]"), "message localized: {message}");
        }
        other => panic!("expected text, got {other:?}"),
    }
}
