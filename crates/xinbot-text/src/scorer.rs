//! Weighted lexical scoring of a unit against a [`TermSet`], including
//! the best-segment scan and the subtitle continuity bonus.

use xinbot_core::catalog::Catalog;
use xinbot_core::types::{ContentUnit, ScoredResult, TermSet};
use xinbot_core::weights::{
    CONTINUITY_BONUS, CONTINUITY_WINDOW, CORE_BODY_WEIGHT, CORE_TITLE_WEIGHT,
    EXPANDED_BODY_WEIGHT, EXPANDED_TITLE_WEIGHT, OTHER_BODY_WEIGHT, OTHER_TITLE_WEIGHT,
    SEGMENT_CORE_WEIGHT, SEGMENT_EXPANDED_WEIGHT,
};

fn occurrences(text: &str, term: &str) -> usize {
    if term.is_empty() {
        return 0;
    }
    text.matches(term).count()
}

fn term_group_score(title: &str, body: &str, terms: &[String], title_w: f32, body_w: f32) -> f32 {
    let mut score = 0.0;
    for term in terms {
        if title.contains(term.as_str()) {
            score += title_w;
        }
        score += occurrences(body, term) as f32 * body_w;
    }
    score
}

/// Score one unit. Returns `(0.0, None)` when the unit has neither title
/// nor body text; a total of zero means the unit is excluded from results.
pub fn score_unit(unit: &ContentUnit, terms: &TermSet) -> (f32, Option<usize>) {
    if unit.title_text.is_empty() && unit.body_text.is_empty() {
        return (0.0, None);
    }

    let title = unit.title_text.as_str();
    let body = unit.body_text.as_str();

    let mut total = term_group_score(title, body, &terms.user_core, CORE_TITLE_WEIGHT, CORE_BODY_WEIGHT)
        + term_group_score(title, body, &terms.expanded, EXPANDED_TITLE_WEIGHT, EXPANDED_BODY_WEIGHT)
        + term_group_score(title, body, &terms.other, OTHER_TITLE_WEIGHT, OTHER_BODY_WEIGHT);

    let mut best_segment: Option<usize> = None;
    let mut best_segment_score = 0.0f32;
    let mut core_hit = vec![false; unit.subtitles.len()];
    for (i, seg) in unit.subtitles.iter().enumerate() {
        let seg_text = seg.text.to_lowercase();
        let core_hits: usize = terms
            .user_core
            .iter()
            .map(|t| occurrences(&seg_text, t))
            .sum();
        let seg_score = if core_hits > 0 {
            core_hit[i] = true;
            core_hits as f32 * SEGMENT_CORE_WEIGHT
        } else {
            let expanded_hits: usize = terms
                .expanded
                .iter()
                .map(|t| occurrences(&seg_text, t))
                .sum();
            expanded_hits as f32 * SEGMENT_EXPANDED_WEIGHT
        };
        if seg_score > best_segment_score {
            best_segment_score = seg_score;
            best_segment = Some(i);
        }
    }

    // Sustained on-topic narration: every run of three consecutive
    // core-hit segments earns the bonus once per window.
    if core_hit.len() >= CONTINUITY_WINDOW {
        for w in core_hit.windows(CONTINUITY_WINDOW) {
            if w.iter().all(|&h| h) {
                total += CONTINUITY_BONUS;
            }
        }
    }

    (total, best_segment)
}

/// Score the whole catalog; units with zero score are excluded (hard
/// cutoff, not a tie-break). Result order follows catalog order until the
/// hybrid merger sorts by score.
pub fn lexical_search(catalog: &Catalog, terms: &TermSet) -> Vec<ScoredResult> {
    if terms.is_empty() {
        return Vec::new();
    }
    let mut results = Vec::new();
    for (i, unit) in catalog.units().iter().enumerate() {
        let (score, best_segment) = score_unit(unit, terms);
        if score > 0.0 {
            results.push(ScoredResult {
                unit_index: i,
                score,
                best_segment,
            });
        }
    }
    tracing::debug!(
        hits = results.len(),
        core = terms.user_core.len(),
        expanded = terms.expanded.len(),
        other = terms.other.len(),
        "lexical search"
    );
    results
}
