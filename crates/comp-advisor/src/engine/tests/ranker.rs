use std::collections::BTreeSet;

use super::common::*;
use crate::catalog::SelectionState;
use crate::engine::Ranker;

#[test]
fn blended_ranking_merges_external_stats_first() {
    let ranker = Ranker::default();
    let snapshot = snapshot(vec![
        composition("mage", "Mage Carry", &["shojin"]),
        composition("duelist", "Duelists", &["ie"]),
    ])
    .with_external(vec![external("Duelist Fast 8", Some(55.0), Some(3.9))], None);

    let ranked = ranker.rank_blended(&snapshot, &inventory(&[("bf", 1), ("glove", 1)]));

    assert_eq!(ranked[0].composition.id, "duelist");
    assert_eq!(ranked[0].result.score, 100);
    assert_eq!(ranked[0].composition.tactics_name.as_deref(), Some("Duelist Fast 8"));
    // bf is held so shojin earns partial credit only
    assert_eq!(ranked[1].result.score, 5);
}

#[test]
fn ties_keep_catalog_order() {
    let ranker = Ranker::default();
    let snapshot = snapshot(vec![
        composition("a", "Alpha", &["rabadon"]),
        composition("b", "Bravo", &["bramble"]),
        composition("c", "Charlie", &["shojin"]),
    ]);
    let selection = SelectionState {
        selected_components: inventory(&[("bf", 1), ("tear", 1)]),
        ..SelectionState::default()
    };

    let ranked = ranker.rank_weighted(&snapshot, &selection);

    let order: Vec<&str> = ranked.iter().map(|entry| entry.composition.id.as_str()).collect();
    assert_eq!(order, vec!["c", "a", "b"]);
}

#[test]
fn repeated_ranking_is_identical() {
    let ranker = Ranker::default();
    let snapshot = snapshot(vec![
        composition("a", "Alpha", &["shojin", "ie"]),
        composition("b", "Bravo", &["ie"]),
        composition("c", "Charlie", &["bt"]),
    ]);
    let held = inventory(&[("bf", 2), ("glove", 1), ("chain", 1)]);

    let first = ranker.rank_blended(&snapshot, &held);
    let second = ranker.rank_blended(&snapshot, &held);

    assert_eq!(first, second);
}

#[test]
fn item_match_ranks_external_compositions_by_their_own_bis() {
    let ranker = Ranker::default();
    let mut jinx = external("Jinx Reroll", Some(55.0), Some(3.7));
    jinx.bis_items = vec!["ie".to_string(), "bt".to_string()];
    let mut mages = external("Mages", Some(50.0), None);
    mages.bis_items = vec!["shojin".to_string(), "ie".to_string()];
    let snapshot = snapshot(vec![composition("sorc", "Sorcerers", &["rabadon"])])
        .with_external(vec![mages, jinx], None);
    let owned: BTreeSet<String> = ["ie".to_string(), "bt".to_string()].into_iter().collect();

    let ranked = ranker.rank_item_match(&snapshot, &owned);

    let order: Vec<&str> = ranked.iter().map(|entry| entry.composition.name.as_str()).collect();
    assert_eq!(order, vec!["Jinx Reroll", "Mages"]);
    assert_eq!(ranked[0].result.score, 120.0);
    assert_eq!(ranked[0].composition.tactics_name.as_deref(), Some("Jinx Reroll"));
    assert_eq!(ranked[1].result.match_percent, 50);
    assert_eq!(ranked[1].result.score, 60.0);
}

#[test]
fn item_match_scores_local_catalog_without_external_data() {
    let ranker = Ranker::default();
    let snapshot = snapshot(vec![
        composition("a", "Alpha", &["shojin", "ie"]),
        composition("b", "Bravo", &["ie"]),
    ]);
    let owned: BTreeSet<String> = ["ie".to_string()].into_iter().collect();

    let ranked = ranker.rank_item_match(&snapshot, &owned);

    assert_eq!(ranked[0].composition.id, "b");
    assert_eq!(ranked[0].result.score, 100.0);
    assert_eq!(ranked[1].result.match_percent, 50);
    assert_eq!(ranked[1].result.score, 50.0);
}
