//! Query normalization: tokenize, classify, filter. Returns a fresh
//! [`TermSet`]; never mutates shared state.

use xinbot_core::taxonomy::Taxonomy;
use xinbot_core::types::TermSet;

/// Words that express media-type intent rather than topic. Stripped from
/// the working query so they never contribute to scoring.
pub const FUNCTIONAL_WORDS: &[&str] = &[
    "只想看", "只要", "只看", "就好", "給我", "文章", "影片", "影音", "show me", "articles",
    "article", "videos", "video", "only",
];

/// Token delimiters: CJK and ASCII sentence punctuation. Whitespace is
/// handled separately.
const DELIMITERS: &[char] = &[
    '，', '。', '！', '!', '？', '?', '、', '；', ';', ':', '：', ',', '.',
];

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || DELIMITERS.contains(&c)
}

fn push_unique(terms: &mut Vec<String>, term: &str) {
    if !terms.iter().any(|t| t == term) {
        terms.push(term.to_string());
    }
}

/// Collapse delimiter runs to single spaces and trim.
fn collapse(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for c in text.chars() {
        if is_delimiter(c) {
            pending_space = !out.is_empty();
        } else {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(c);
        }
    }
    out
}

/// Turn a raw query into three disjoint term lists.
///
/// - taxonomy keywords found as substrings become `user_core`;
/// - siblings of matched categories become `expanded`;
/// - residual tokens of char-length >= 2 that are neither stop words nor
///   already collected become `other`;
/// - a query with no taxonomy hit falls back to the whole cleaned query
///   as its single core term, so short taxonomy-miss queries still search.
pub fn normalize(query: &str, taxonomy: &Taxonomy) -> TermSet {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return TermSet::default();
    }

    let mut user_core: Vec<String> = Vec::new();
    let mut matched_categories: Vec<usize> = Vec::new();
    for (ci, cat) in taxonomy.categories().iter().enumerate() {
        for kw in &cat.keywords {
            if q.contains(kw.as_str()) {
                push_unique(&mut user_core, kw);
                if !matched_categories.contains(&ci) {
                    matched_categories.push(ci);
                }
            }
        }
    }

    let mut expanded: Vec<String> = Vec::new();
    for &ci in &matched_categories {
        for kw in &taxonomy.categories()[ci].keywords {
            if !user_core.iter().any(|t| t == kw) {
                push_unique(&mut expanded, kw);
            }
        }
    }

    // Working copy: drop matched keywords and media-intent words before
    // collecting residual tokens.
    let mut cleaned = q.clone();
    for kw in &user_core {
        cleaned = cleaned.replace(kw.as_str(), " ");
    }
    for w in FUNCTIONAL_WORDS {
        cleaned = cleaned.replace(w, " ");
    }

    let mut other: Vec<String> = Vec::new();
    for token in cleaned.split(is_delimiter) {
        if token.chars().count() < 2 {
            continue;
        }
        if taxonomy.is_stop_word(token) {
            continue;
        }
        if user_core.iter().any(|t| t == token) || expanded.iter().any(|t| t == token) {
            continue;
        }
        push_unique(&mut other, token);
    }

    if user_core.is_empty() {
        let fallback = collapse(&cleaned);
        if fallback.chars().count() >= 2 {
            other.retain(|t| *t != fallback);
            user_core.push(fallback);
        }
    }

    TermSet {
        user_core,
        expanded,
        other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tax() -> Taxonomy {
        Taxonomy::builtin()
    }

    fn assert_disjoint(terms: &TermSet) {
        for t in &terms.user_core {
            assert!(!terms.expanded.contains(t), "{t} in core and expanded");
            assert!(!terms.other.contains(t), "{t} in core and other");
        }
        for t in &terms.expanded {
            assert!(!terms.other.contains(t), "{t} in expanded and other");
        }
    }

    #[test]
    fn empty_query_yields_empty_set() {
        assert!(normalize("", &tax()).is_empty());
        assert!(normalize("   ", &tax()).is_empty());
    }

    #[test]
    fn taxonomy_hit_fills_core_and_expanded() {
        let terms = normalize("最近壓力很大睡不著", &tax());
        assert!(terms.user_core.iter().any(|t| t == "壓力"));
        assert!(terms.user_core.iter().any(|t| t == "睡不著"));
        // Sibling of 壓力 in the anxiety category, not typed by the user.
        assert!(terms.expanded.iter().any(|t| t == "焦慮"));
        assert_disjoint(&terms);
    }

    #[test]
    fn sets_are_disjoint_for_varied_inputs() {
        for q in [
            "婆媳相處好難",
            "小孩一直哭鬧怎麼辦",
            "insomnia and stress at work",
            "只要文章 壓力",
            "失眠",
        ] {
            assert_disjoint(&normalize(q, &tax()));
        }
    }

    #[test]
    fn functional_words_never_reach_terms() {
        let terms = normalize("只要文章 壓力", &tax());
        assert!(terms.user_core.iter().any(|t| t == "壓力"));
        assert!(!terms.contains("文章"));
        assert!(!terms.contains("只要"));
    }

    #[test]
    fn taxonomy_miss_falls_back_to_cleaned_query() {
        let terms = normalize("正念冥想", &tax());
        assert_eq!(terms.user_core, vec!["正念冥想".to_string()]);
        assert!(terms.expanded.is_empty());
        assert!(!terms.other.contains(&"正念冥想".to_string()));
    }

    #[test]
    fn residual_tokens_keep_length_and_stop_word_rules() {
        let terms = normalize("壓力 好大 嗎", &tax());
        // "嗎" is a stop word and single tokens under two chars are dropped.
        assert!(!terms.other.iter().any(|t| t == "嗎"));
        assert!(terms.other.iter().any(|t| t == "好大"));
    }
}
