use super::common::*;
use crate::catalog::{ItemCatalog, ItemType};
use crate::engine::BlendedScorer;

#[test]
fn single_craftable_bis_without_winrate_scores_sixty() {
    let scorer = BlendedScorer::default();
    let items = ItemCatalog::new(vec![
        component("bf"),
        component("tear"),
        crafted("itemX", "Item X", ItemType::Ap, "bf", "tear"),
    ]);
    let comp = composition("x", "X Comp", &["itemX"]);

    let result = scorer.score(&inventory(&[("bf", 1), ("tear", 1)]), &comp, &items);

    assert_eq!(result.bis_score, 60);
    assert_eq!(result.winrate_score, 0);
    assert_eq!(result.score, 60);
    assert_eq!(result.match_percent, 100);
    assert_eq!(result.bis_total, 1);
}

#[test]
fn empty_bis_list_scores_zero_regardless_of_inputs() {
    let scorer = BlendedScorer::default();
    let mut comp = composition("flex", "Flex", &[]);
    comp.winrate = Some(60.0);

    let result = scorer.score(&inventory(&[("bf", 9), ("tear", 9)]), &comp, &catalog());

    assert_eq!(result.score, 0);
    assert_eq!(result.winrate_score, 0);
    assert_eq!(result.details.len(), 1);
}

#[test]
fn winrate_maps_linearly_and_clamps() {
    let scorer = BlendedScorer::default();
    assert_eq!(scorer.winrate_score(Some(45.0)), 0);
    assert_eq!(scorer.winrate_score(Some(55.0)), 40);
    assert_eq!(scorer.winrate_score(Some(40.0)), 0);
    assert_eq!(scorer.winrate_score(Some(60.0)), 40);
    assert_eq!(scorer.winrate_score(Some(50.1)), 20);
    assert_eq!(scorer.winrate_score(None), 0);
}

#[test]
fn partial_matches_add_an_uncapped_bonus() {
    let scorer = BlendedScorer::default();
    let mut comp = composition("hybrid", "Hybrid", &["shojin", "ie"]);
    comp.winrate = Some(52.5);

    let result = scorer.score(&inventory(&[("bf", 1), ("tear", 1)]), &comp, &catalog());

    assert_eq!(result.bis_match, 1);
    assert_eq!(result.match_percent, 50);
    assert_eq!(result.bis_craftable.len(), 1);
    assert_eq!(result.bis_partial.len(), 1);
    assert_eq!(result.bis_partial[0].missing, "glove");
    assert_eq!(result.bis_score, 30 + 5);
    assert_eq!(result.winrate_score, 30);
    assert_eq!(result.score, 65);
    assert_eq!(result.match_percent, 50);
}

#[test]
fn bis_pass_leaves_caller_inventory_untouched() {
    let scorer = BlendedScorer::default();
    let held = inventory(&[("bf", 1), ("tear", 1)]);
    let comp = composition("mage", "Mage", &["shojin"]);

    scorer.score(&held, &comp, &catalog());

    assert_eq!(held.count("bf"), 1);
    assert_eq!(held.count("tear"), 1);
}
