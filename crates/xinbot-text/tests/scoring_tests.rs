use xinbot_core::catalog::Catalog;
use xinbot_core::taxonomy::Taxonomy;
use xinbot_core::types::{ContentUnit, Subtitle, TermSet};
use xinbot_text::{lexical_search, normalize, score_unit};

fn video(id: &str, title: &str, subtitles: &[&str]) -> ContentUnit {
    ContentUnit {
        id: id.into(),
        section_title: "照顧自己".into(),
        title: title.into(),
        content_text: String::new(),
        is_article: false,
        media_url: format!("https://youtube.com/watch?v={id}"),
        subtitles: subtitles
            .iter()
            .enumerate()
            .map(|(i, t)| Subtitle {
                text: (*t).to_string(),
                start_sec: i as f32 * 10.0,
            })
            .collect(),
        title_text: String::new(),
        body_text: String::new(),
    }
}

#[test]
fn empty_term_set_scores_zero_for_all_units() {
    let catalog = Catalog::from_units(vec![
        video("a", "失眠的夜", &["失眠很常見"]),
        video("b", "壓力調適", &["壓力來的時候"]),
    ]);
    let empty = TermSet::default();
    for unit in catalog.units() {
        assert_eq!(score_unit(unit, &empty), (0.0, None));
    }
    assert!(lexical_search(&catalog, &empty).is_empty());
}

#[test]
fn insomnia_title_unit_outranks_the_rest() {
    // Three units; only one carries 失眠 (three times) in its title.
    let catalog = Catalog::from_units(vec![
        video("a", "好好睡覺", &["睡不著的時候試試這些"]),
        video("b", "失眠、失眠、還是失眠", &["怎麼辦呢"]),
        video("c", "放鬆練習", &["睡不著可以深呼吸"]),
    ]);
    let terms = normalize("失眠", &Taxonomy::builtin());
    let results = lexical_search(&catalog, &terms);

    assert_eq!(results.len(), 3, "expanded hits keep the other units in");
    let best = results
        .iter()
        .max_by(|a, b| a.score.partial_cmp(&b.score).expect("finite"))
        .expect("non-empty");
    assert_eq!(catalog.get(best.unit_index).id, "b");
    for r in &results {
        if r.unit_index != best.unit_index {
            assert!(best.score > r.score, "title-hit unit must strictly win");
        }
    }
}

#[test]
fn continuity_bonus_rewards_three_consecutive_core_segments() {
    let sustained = video(
        "s",
        "壓力週記",
        &["壓力好大", "壓力讓人睡不好", "面對壓力的方法", "結尾"],
    );
    let scattered = video(
        "t",
        "壓力週記",
        &["壓力好大", "今天天氣不錯", "面對壓力的方法", "壓力結尾"],
    );
    let catalog = Catalog::from_units(vec![sustained, scattered]);
    let terms = normalize("壓力", &Taxonomy::builtin());

    let (s_score, _) = score_unit(catalog.get(0), &terms);
    let (t_score, _) = score_unit(catalog.get(1), &terms);
    // Same core occurrences overall, but only the first unit has three
    // consecutive core-hit segments (0..=2), so it alone earns the bonus.
    assert!(s_score > t_score);
}

#[test]
fn best_segment_prefers_core_hits_and_earliest_on_ties() {
    let unit = video(
        "v",
        "夜晚的心情",
        &["今天還不錯", "失眠了一整夜", "又失眠了一整夜"],
    );
    let catalog = Catalog::from_units(vec![unit]);
    let terms = normalize("失眠", &Taxonomy::builtin());
    let (_, best) = score_unit(catalog.get(0), &terms);
    // Segments 1 and 2 both contain one core hit; the earliest wins.
    assert_eq!(best, Some(1));
}

#[test]
fn unit_without_any_text_scores_zero() {
    let mut bare = video("z", "", &[]);
    bare.section_title = String::new();
    let catalog = Catalog::from_units(vec![bare]);
    let terms = normalize("失眠", &Taxonomy::builtin());
    assert_eq!(score_unit(catalog.get(0), &terms), (0.0, None));
}
