use std::collections::BTreeMap;
use std::io::Cursor;

use super::common::*;
use crate::catalog::{
    parse_compositions, Augment, Inventory, ItemType, SelectionState, Tier, TierTable,
};
use crate::engine::{ScoreFactor, WeightedScorer};

fn selection(components: Inventory) -> SelectionState {
    SelectionState {
        selected_components: components,
        ..SelectionState::default()
    }
}

fn flags(units: &[&str]) -> BTreeMap<String, bool> {
    units.iter().map(|unit| (unit.to_string(), true)).collect()
}

#[test]
fn each_satisfiable_bis_entry_adds_the_fixed_bonus() {
    let scorer = WeightedScorer::default();
    let state = selection(inventory(&[("bf", 1), ("tear", 1), ("rod", 2)]));
    let tiers = TierTable::default();

    let single = composition("mage", "Mage", &["shojin"]);
    let mut double = single.clone();
    double.bis_items.push("rabadon".to_string());

    let one = scorer.score(&single, &state, &catalog(), &tiers);
    let two = scorer.score(&double, &state, &catalog(), &tiers);

    assert_eq!(one.score, 25);
    assert_eq!(two.score, one.score + 25);
    assert_eq!(two.crafted_bis, vec!["Spear of Shojin", "Rabadon's Deathcap"]);
}

#[test]
fn partial_credit_uses_pre_pass_components() {
    let scorer = WeightedScorer::default();
    let state = selection(inventory(&[("bf", 1), ("tear", 1)]));
    let comp = composition("hybrid", "Hybrid", &["shojin", "ie"]);

    let result = scorer.score(&comp, &state, &catalog(), &TierTable::default());

    assert_eq!(result.score, 25 + 8);
    let partial = result
        .components
        .iter()
        .find(|component| component.factor == ScoreFactor::BisPartial)
        .expect("partial component");
    assert!(partial.notes.contains("missing glove"));
}

#[test]
fn partial_reports_first_slot_when_only_second_is_held() {
    let scorer = WeightedScorer::default();
    let state = selection(inventory(&[("glove", 1)]));
    let comp = composition("crit", "Crit", &["ie"]);

    let result = scorer.score(&comp, &state, &catalog(), &TierTable::default());

    assert_eq!(result.score, 8);
    assert!(result.details[0].contains("missing bf"));
}

#[test]
fn serialized_result_carries_trace_lines() {
    let scorer = WeightedScorer::default();
    let state = selection(inventory(&[("bf", 1), ("tear", 1)]));
    let comp = composition("caster", "Caster", &["shojin"]);

    let result = scorer.score(&comp, &state, &catalog(), &TierTable::default());
    let json = serde_json::to_value(&result).expect("score serializes");

    assert_eq!(json["score"], 25);
    assert_eq!(json["craftedBis"][0], "Spear of Shojin");
    assert_eq!(json["details"][0], "BIS Spear of Shojin craftable: +25 pts");
}

#[test]
fn no_credit_without_either_component() {
    let scorer = WeightedScorer::default();
    let state = selection(inventory(&[("rod", 1)]));
    let comp = composition("crit", "Crit", &["ie", "unknown-item"]);

    let result = scorer.score(&comp, &state, &catalog(), &TierTable::default());

    assert_eq!(result.score, 0);
    assert!(result.components.is_empty());
}

#[test]
fn other_items_are_tried_by_descending_weight() {
    let scorer = WeightedScorer::default();
    let state = selection(inventory(&[("bf", 1), ("chain", 1), ("glove", 1)]));
    let mut comp = composition("bruiser", "Bruiser", &[]);
    comp.items = weights(&[("ie", 10), ("bt", 20)]);

    let result = scorer.score(&comp, &state, &catalog(), &TierTable::default());

    assert_eq!(result.score, 16);
    assert_eq!(result.components.len(), 1);
    assert!(result.components[0].notes.starts_with("Bloodthirster"));
}

#[test]
fn other_items_skip_ids_already_in_bis() {
    let scorer = WeightedScorer::default();
    let state = selection(inventory(&[("bf", 2), ("tear", 1), ("glove", 1)]));
    let mut comp = composition("caster", "Caster", &["shojin"]);
    comp.items = weights(&[("shojin", 30), ("ie", 10)]);

    let result = scorer.score(&comp, &state, &catalog(), &TierTable::default());

    assert_eq!(result.score, 25 + 8);
    assert_eq!(
        result
            .components
            .iter()
            .filter(|component| component.factor == ScoreFactor::ItemCraftable)
            .count(),
        1
    );
}

#[test]
fn equal_weights_follow_catalog_document_order() {
    let scorer = WeightedScorer::default();
    let state = selection(inventory(&[("bf", 1), ("chain", 1), ("glove", 1)]));
    let (comps, tiers) = parse_compositions(Cursor::new(
        r#"{"comps": [{"id": "bruiser", "name": "Bruiser", "items": {"ie": 10, "bt": 10}}]}"#,
    ))
    .expect("comps parse");

    let result = scorer.score(&comps[0], &state, &catalog(), &tiers);

    assert_eq!(result.score, 8);
    assert_eq!(result.components.len(), 1);
    assert!(result.components[0].notes.starts_with("Infinity Edge"));
}

#[test]
fn owned_and_contested_units_both_apply() {
    let scorer = WeightedScorer::default();
    let mut state = selection(Inventory::new());
    state.selected_units = flags(&["jinx"]);
    state.contested_units = flags(&["jinx", "vi"]);
    let mut comp = composition("jinx", "Jinx Reroll", &[]);
    comp.units = weights(&[("jinx", 5), ("vi", 3)]);

    let result = scorer.score(&comp, &state, &catalog(), &TierTable::default());

    // +5 owned, -3 contested jinx (2.5 rounds up), -2 contested vi (1.5 rounds up)
    assert_eq!(result.score, 0);
    assert_eq!(result.components.len(), 3);
}

#[test]
fn tier_multiplier_scales_the_accumulated_score() {
    let scorer = WeightedScorer::default();
    let state = selection(inventory(&[("bf", 1), ("tear", 1), ("rod", 2)]));
    let comp = composition("mage", "Mage", &["shojin", "rabadon"]);
    let mut tiers = TierTable::default();
    tiers.defaults.insert("mage".to_string(), Tier::S);

    let result = scorer.score(&comp, &state, &catalog(), &tiers);

    assert_eq!(result.score, 65);
    let tier = result
        .components
        .iter()
        .find(|component| component.factor == ScoreFactor::TierMultiplier)
        .expect("tier component");
    assert_eq!(tier.points, 15);
}

#[test]
fn neutral_tier_adds_no_trace_line() {
    let scorer = WeightedScorer::default();
    let state = selection(inventory(&[("bf", 1), ("tear", 1)]));
    let comp = composition("mage", "Mage", &["shojin"]);

    let result = scorer.score(&comp, &state, &catalog(), &TierTable::default());

    assert!(result
        .components
        .iter()
        .all(|component| component.factor != ScoreFactor::TierMultiplier));
}

#[test]
fn augments_match_bis_type_and_tag() {
    let scorer = WeightedScorer::default();
    let mut state = selection(Inventory::new());
    state.augments = [Augment::Ap, Augment::Ad, Augment::Reroll, Augment::Fast8]
        .into_iter()
        .collect();
    let mut comp = composition("sorc", "Sorcerer", &[]);
    comp.bis_type = Some(ItemType::Ap);
    comp.tag = "AP Reroll".to_string();

    let result = scorer.score(&comp, &state, &catalog(), &TierTable::default());

    assert_eq!(result.score, 10 + 8);
    assert!(result
        .components
        .iter()
        .all(|component| component.factor == ScoreFactor::Augment));
}

#[test]
fn augment_bonus_is_added_after_the_multiplier() {
    let scorer = WeightedScorer::default();
    let mut state = selection(inventory(&[("bf", 1), ("tear", 1)]));
    state.augments = [Augment::Lose].into_iter().collect();
    let mut comp = composition("lose", "Lose Streak", &["shojin"]);
    comp.tag = "lose-streak".to_string();
    let mut tiers = TierTable::default();
    tiers.defaults.insert("lose".to_string(), Tier::D);

    let result = scorer.score(&comp, &state, &catalog(), &tiers);

    // round(25 * 0.8) = 20, then +8
    assert_eq!(result.score, 28);
    assert_eq!(
        result.components.last().map(|component| component.factor),
        Some(ScoreFactor::Augment)
    );
}

#[test]
fn scoring_leaves_the_selection_untouched() {
    let scorer = WeightedScorer::default();
    let state = selection(inventory(&[("bf", 1), ("tear", 1)]));
    let before = state.clone();
    let comp = composition("mage", "Mage", &["shojin"]);

    scorer.score(&comp, &state, &catalog(), &TierTable::default());

    assert_eq!(state, before);
}
