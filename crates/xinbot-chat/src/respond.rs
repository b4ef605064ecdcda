//! Response assembly: turning scored results and nearby points into the
//! wire payloads, plus the canned user-facing messages.

use xinbot_core::catalog::Catalog;
use xinbot_core::types::{
    MediaFilter, NearbyPointItem, NearbyPoints, RecommendationItem, RecommendationPage,
    ResponsePayload, ScoredResult,
};
use xinbot_geo::ServicePoint;

pub const MSG_ADDRESS_PROMPT: &str =
    "我有點抓不到地址，請嘗試輸入完整地址，例如：台南市東區大學路1號";
pub const MSG_NO_RESULTS: &str =
    "目前找不到很符合的課程，可以試著用：婆媳、壓力、憂鬱、失眠… 等詞再試試看。";
pub const MSG_NO_MORE_RESULTS: &str = "沒有更多相關的課程了，想換個主題聊聊嗎？";
pub const MSG_NOTHING_TO_CONTINUE: &str =
    "目前沒有可以繼續的課程推薦，先告訴我你想了解的主題吧。";
pub const MSG_NO_TOPIC_FOR_PREFERENCE: &str =
    "想看文章或影片的話，先告訴我你想了解的主題喔。";
pub const MSG_NO_SUBTITLE_HIT: &str = "字幕裡沒有特別命中關鍵句，可以從頭開始看。";

pub fn msg_geocode_miss(address: &str) -> String {
    format!("查不到「{address}」這個地址，請改成更正式的寫法試試看")
}

pub fn msg_no_points_in_range(address: &str) -> String {
    format!("在「{address}」5 公里內沒有找到心據點")
}

const SNIPPET_CHARS: usize = 100;
const HINT_CHARS: usize = 30;

/// `mm:ss`, or `hh:mm:ss` past the hour.
pub fn format_time(seconds: f32) -> String {
    let s = seconds.max(0.0) as u64;
    let (h, m, sec) = (s / 3600, (s % 3600) / 60, s % 60);
    if h > 0 {
        format!("{h:02}:{m:02}:{sec:02}")
    } else {
        format!("{m:02}:{sec:02}")
    }
}

fn truncate_chars(text: &str, limit: usize) -> (String, bool) {
    let mut out: String = text.chars().take(limit).collect();
    let truncated = out.chars().count() < text.chars().count();
    if truncated {
        out.push_str("...");
    }
    (out, truncated)
}

/// Render one scored unit. Articles carry a snippet; videos carry a
/// timestamped hint into the best subtitle segment.
pub fn recommendation_item(catalog: &Catalog, result: &ScoredResult) -> RecommendationItem {
    let unit = catalog.get(result.unit_index);
    let mut item = RecommendationItem {
        section_title: unit.section_title.clone(),
        title: unit.title.clone(),
        score: result.score,
        media_type: if unit.is_article {
            MediaFilter::Article
        } else {
            MediaFilter::Video
        },
        article_url: None,
        snippet: None,
        youtube_url: None,
        hint: None,
    };
    if unit.is_article {
        item.article_url = Some(unit.media_url.clone());
        let flat = unit.content_text.replace('\n', " ");
        let (snippet, _) = truncate_chars(&flat, SNIPPET_CHARS);
        item.snippet = Some(snippet);
    } else {
        item.youtube_url = Some(unit.media_url.clone());
        item.hint = Some(match result.best_segment.and_then(|i| unit.subtitles.get(i)) {
            Some(seg) => {
                let (text, _) = truncate_chars(&seg.text, HINT_CHARS);
                format!("該單元在 {} 有提到：「{}」", format_time(seg.start_sec), text)
            }
            None => MSG_NO_SUBTITLE_HIT.to_string(),
        });
    }
    item
}

/// Assemble a recommendation page from an already-sliced window.
pub fn recommendation_page(
    catalog: &Catalog,
    query: &str,
    filter: Option<MediaFilter>,
    page: &xinbot_hybrid::Page,
) -> ResponsePayload {
    let results: Vec<RecommendationItem> = page
        .items
        .iter()
        .map(|r| recommendation_item(catalog, r))
        .collect();
    let message = if page.total == 0 {
        Some(MSG_NO_RESULTS.to_string())
    } else if results.is_empty() {
        Some(MSG_NO_MORE_RESULTS.to_string())
    } else {
        None
    };
    ResponsePayload::CourseRecommendation(RecommendationPage {
        query: query.to_string(),
        offset: page.offset,
        limit: page.limit,
        total: page.total,
        has_more: page.has_more,
        filter_type: filter,
        results,
        message,
    })
}

/// Assemble the nearby-points payload; an empty hit list gets the
/// "nothing within range" message.
pub fn nearby_points(address: &str, hits: &[(&ServicePoint, f64)]) -> ResponsePayload {
    if hits.is_empty() {
        return ResponsePayload::XinPoints(NearbyPoints {
            address: Some(address.to_string()),
            points: vec![],
            message: Some(msg_no_points_in_range(address)),
        });
    }
    let points = hits
        .iter()
        .map(|(p, d)| NearbyPointItem {
            title: p.title.clone(),
            address: p.address.clone(),
            tel: p.tel.clone(),
            distance_km: (d * 100.0).round() / 100.0,
        })
        .collect();
    ResponsePayload::XinPoints(NearbyPoints {
        address: Some(address.to_string()),
        points,
        message: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_formats_with_and_without_hours() {
        assert_eq!(format_time(0.0), "00:00");
        assert_eq!(format_time(65.9), "01:05");
        assert_eq!(format_time(3661.0), "01:01:01");
    }

    #[test]
    fn truncation_appends_ellipsis_only_when_needed() {
        let (s, t) = truncate_chars("短", 100);
        assert_eq!(s, "短");
        assert!(!t);
        let (s, t) = truncate_chars(&"長".repeat(120), 100);
        assert!(t);
        assert!(s.ends_with("..."));
        assert_eq!(s.chars().count(), 103);
    }

    #[test]
    fn distances_round_to_two_decimals() {
        let p = ServicePoint {
            title: "點".into(),
            address: "某路".into(),
            tel: None,
            lat: Some(23.0),
            lon: Some(120.2),
        };
        let payload = nearby_points("台南市東區", &[(&p, 1.23456)]);
        match payload {
            ResponsePayload::XinPoints(np) => {
                assert_eq!(np.points[0].distance_km, 1.23);
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }
}
