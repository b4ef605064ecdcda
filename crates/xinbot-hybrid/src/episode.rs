//! Multi-part episode grouping: "part 1"/"part 2" units stay adjacent and
//! groups are ordered by their best score.

use std::collections::HashMap;

use xinbot_core::catalog::Catalog;
use xinbot_core::types::ScoredResult;

/// Recognized "part 1" tags, longest first so composite forms strip cleanly.
const PART_ONE_MARKERS: &[&str] = &[
    "（上）", "(上)", "【上】", "上集", "上篇", "part 1", "part1", "第一集",
];
/// Recognized "part 2" tags.
const PART_TWO_MARKERS: &[&str] = &[
    "（下）", "(下)", "【下】", "下集", "下篇", "part 2", "part2", "第二集",
];

/// Rank inside a group: part-1 before part-2 before unmarked.
pub fn part_rank(title: &str) -> u8 {
    let t = title.to_lowercase();
    if PART_ONE_MARKERS.iter().any(|m| t.contains(m)) {
        0
    } else if PART_TWO_MARKERS.iter().any(|m| t.contains(m)) {
        1
    } else {
        2
    }
}

/// Canonical series key: section + title with all part tags and whitespace
/// stripped. Two halves of one series share a key.
pub fn base_key(section_title: &str, title: &str) -> String {
    let mut key = format!("{section_title}{title}").to_lowercase();
    for m in PART_ONE_MARKERS.iter().chain(PART_TWO_MARKERS) {
        key = key.replace(m, "");
    }
    key.chars().filter(|c| !c.is_whitespace()).collect()
}

struct EpisodeGroup {
    items: Vec<ScoredResult>,
    best_score: f32,
    first_seen_index: usize,
}

/// Group scored results by base key, order parts inside each group, order
/// groups by best score (ties by first appearance), and flatten.
///
/// Within-group adjacency is preserved: a part-1 item is never separated
/// from its part-2 counterpart by an unrelated result.
pub fn group_and_flatten(catalog: &Catalog, results: Vec<ScoredResult>) -> Vec<ScoredResult> {
    let mut groups: Vec<EpisodeGroup> = Vec::new();
    let mut index_by_key: HashMap<String, usize> = HashMap::new();

    for (i, r) in results.into_iter().enumerate() {
        let unit = catalog.get(r.unit_index);
        let key = base_key(&unit.section_title, &unit.title);
        match index_by_key.get(&key) {
            Some(&gi) => {
                let group = &mut groups[gi];
                if r.score > group.best_score {
                    group.best_score = r.score;
                }
                group.items.push(r);
            }
            None => {
                index_by_key.insert(key, groups.len());
                groups.push(EpisodeGroup {
                    best_score: r.score,
                    first_seen_index: i,
                    items: vec![r],
                });
            }
        }
    }

    for group in &mut groups {
        group.items.sort_by(|a, b| {
            let ra = part_rank(&catalog.get(a.unit_index).title);
            let rb = part_rank(&catalog.get(b.unit_index).title);
            ra.cmp(&rb).then(
                b.score
                    .partial_cmp(&a.score)
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
        });
    }

    groups.sort_by(|a, b| {
        b.best_score
            .partial_cmp(&a.best_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.first_seen_index.cmp(&b.first_seen_index))
    });

    groups.into_iter().flat_map(|g| g.items).collect()
}
