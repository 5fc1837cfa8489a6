use serde::{Deserialize, Serialize};
use tracing::debug;

use super::allocator::craft_once;
use super::bis::{bis_pass, BisOutcome};
use super::config::WeightedScoringConfig;
use super::round_half_up;
use crate::catalog::{
    Augment, Composition, ItemCatalog, ItemType, SelectionState, TierTable,
};

/// Source of a single score contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    BisCraftable,
    BisPartial,
    ItemCraftable,
    UnitOwned,
    UnitContested,
    TierMultiplier,
    Augment,
}

/// Discrete contribution to a weighted score, kept for explainability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub points: i32,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightedScore {
    pub score: i32,
    pub components: Vec<ScoreComponent>,
    /// Names of the BIS items that could be crafted, in BIS order.
    pub crafted_bis: Vec<String>,
    /// Human-readable trace lines in application order.
    pub details: Vec<String>,
}

/// Scores a composition against the full selection state.
#[derive(Debug, Clone, Default)]
pub struct WeightedScorer {
    config: WeightedScoringConfig,
}

impl WeightedScorer {
    pub fn new(config: WeightedScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WeightedScoringConfig {
        &self.config
    }

    pub fn score(
        &self,
        composition: &Composition,
        selection: &SelectionState,
        items: &ItemCatalog,
        tiers: &TierTable,
    ) -> WeightedScore {
        let original = &selection.selected_components;
        let mut available = original.clone();
        let mut components = Vec::new();
        let mut crafted_bis = Vec::new();
        let mut base: i32 = 0;

        for outcome in bis_pass(&composition.bis_items, items, original, &mut available) {
            let component = match outcome {
                BisOutcome::Crafted(craft) => {
                    let notes = format!(
                        "BIS {} craftable: +{} pts",
                        craft.name, self.config.bis_bonus
                    );
                    crafted_bis.push(craft.name);
                    ScoreComponent {
                        factor: ScoreFactor::BisCraftable,
                        points: self.config.bis_bonus,
                        notes,
                    }
                }
                BisOutcome::Partial(partial) => ScoreComponent {
                    factor: ScoreFactor::BisPartial,
                    points: self.config.partial_bis_bonus,
                    notes: format!(
                        "BIS {} partial (missing {}): +{} pts",
                        partial.name, partial.missing, self.config.partial_bis_bonus
                    ),
                },
            };
            base += component.points;
            components.push(component);
        }

        let mut others: Vec<(&String, i32)> = composition
            .items
            .iter()
            .filter(|(id, _)| !composition.bis_items.contains(*id))
            .map(|(id, weight)| (id, *weight))
            .collect();
        others.sort_by(|a, b| b.1.cmp(&a.1));

        for (item_id, weight) in others {
            let Some(item) = items.get(item_id) else {
                continue;
            };
            let Some(recipe) = &item.recipe else {
                continue;
            };
            if !craft_once(&mut available, recipe) {
                continue;
            }

            let bonus = round_half_up(f64::from(weight) * self.config.item_weight_factor);
            base += bonus;
            components.push(ScoreComponent {
                factor: ScoreFactor::ItemCraftable,
                points: bonus,
                notes: format!("{} craftable: +{} pts", item.name, bonus),
            });
        }

        for (unit, weight) in &composition.units {
            if selection.owns(unit) {
                base += weight;
                components.push(ScoreComponent {
                    factor: ScoreFactor::UnitOwned,
                    points: *weight,
                    notes: format!("{unit} owned: +{weight} pts"),
                });
            }
            if selection.is_contested(unit) {
                let penalty =
                    round_half_up(f64::from(*weight) * self.config.contested_penalty_factor);
                base -= penalty;
                components.push(ScoreComponent {
                    factor: ScoreFactor::UnitContested,
                    points: -penalty,
                    notes: format!("{unit} contested: -{penalty} pts"),
                });
            }
        }

        let tier = tiers.tier_for(&composition.id);
        let multiplier = tiers.multiplier(tier);
        let mut score = round_half_up(f64::from(base) * multiplier);
        if multiplier != 1.0 {
            components.push(ScoreComponent {
                factor: ScoreFactor::TierMultiplier,
                points: score - base,
                notes: format!(
                    "Tier {} (x{}): {} x {} = {}",
                    tier.label(),
                    multiplier,
                    base,
                    multiplier,
                    score
                ),
            });
        }

        for (augment, bonus, label) in self.augment_bonuses(composition, selection) {
            score += bonus;
            components.push(ScoreComponent {
                factor: ScoreFactor::Augment,
                points: bonus,
                notes: format!("Augment {label}: +{bonus} pts"),
            });
            debug!(?augment, composition = %composition.id, "augment bonus applied");
        }

        let details = components
            .iter()
            .map(|component| component.notes.clone())
            .collect();
        WeightedScore {
            score,
            components,
            crafted_bis,
            details,
        }
    }

    fn augment_bonuses(
        &self,
        composition: &Composition,
        selection: &SelectionState,
    ) -> Vec<(Augment, i32, &'static str)> {
        let tag = composition.tag.to_lowercase();
        let type_bonus = self.config.type_augment_bonus;
        let style_bonus = self.config.style_augment_bonus;

        let rules = [
            (Augment::Ap, composition.bis_type == Some(ItemType::Ap), type_bonus, "AP"),
            (Augment::Ad, composition.bis_type == Some(ItemType::Ad), type_bonus, "AD"),
            (Augment::Tank, composition.bis_type == Some(ItemType::Tank), type_bonus, "Tank"),
            (Augment::Reroll, tag.contains("reroll"), style_bonus, "Reroll"),
            (Augment::Fast8, tag.contains("fast"), style_bonus, "Fast8"),
            (Augment::Lose, tag.contains("lose"), style_bonus, "Lose"),
        ];

        rules
            .into_iter()
            .filter(|(augment, applies, _, _)| *applies && selection.has_augment(*augment))
            .map(|(augment, _, bonus, label)| (augment, bonus, label))
            .collect()
    }
}
