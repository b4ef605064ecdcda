//! Combine lexical and vector-similarity result sets into one ranked list.

use std::collections::HashMap;

use xinbot_core::catalog::Catalog;
use xinbot_core::types::ScoredResult;
use xinbot_core::weights::{SIMILARITY_FLOOR, VECTOR_ADMIT_WEIGHT, VECTOR_BOOST_WEIGHT};

use crate::episode::base_key;

/// Merge rules:
/// - a base key present in both sets boosts the lexical score by
///   `similarity * VECTOR_BOOST_WEIGHT`;
/// - a vector-only key above the floor is admitted at
///   `similarity * VECTOR_ADMIT_WEIGHT`;
/// - the final list sorts by descending score with stable ties, so the
///   same inputs always produce the same ordering.
pub fn merge_vector_hits(
    catalog: &Catalog,
    lexical: Vec<ScoredResult>,
    vector: &[(String, f32)],
) -> Vec<ScoredResult> {
    let mut merged = lexical;
    let mut index_by_key: HashMap<String, usize> = HashMap::new();
    for (i, r) in merged.iter().enumerate() {
        let unit = catalog.get(r.unit_index);
        index_by_key
            .entry(base_key(&unit.section_title, &unit.title))
            .or_insert(i);
    }

    for (id, similarity) in vector {
        let Some(unit_index) = catalog.index_of(id) else {
            tracing::warn!(%id, "similarity hit for unknown unit id");
            continue;
        };
        let unit = catalog.get(unit_index);
        let key = base_key(&unit.section_title, &unit.title);
        match index_by_key.get(&key) {
            Some(&i) => merged[i].score += similarity * VECTOR_BOOST_WEIGHT,
            None if *similarity > SIMILARITY_FLOOR => {
                index_by_key.insert(key, merged.len());
                merged.push(ScoredResult {
                    unit_index,
                    score: similarity * VECTOR_ADMIT_WEIGHT,
                    best_segment: None,
                });
            }
            None => {}
        }
    }

    merged.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    merged
}
