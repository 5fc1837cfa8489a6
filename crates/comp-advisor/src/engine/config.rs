use serde::{Deserialize, Serialize};

/// Bonus weights for the weighted (selection-driven) model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedScoringConfig {
    pub bis_bonus: i32,
    pub partial_bis_bonus: i32,
    pub item_weight_factor: f64,
    pub contested_penalty_factor: f64,
    /// Applied when an `ap`/`ad`/`tank` augment matches the composition's BIS type.
    pub type_augment_bonus: i32,
    /// Applied for `reroll`/`fast8`/`lose` augments matching the composition tag.
    pub style_augment_bonus: i32,
}

impl Default for WeightedScoringConfig {
    fn default() -> Self {
        Self {
            bis_bonus: 25,
            partial_bis_bonus: 8,
            item_weight_factor: 0.8,
            contested_penalty_factor: 0.5,
            type_augment_bonus: 10,
            style_augment_bonus: 8,
        }
    }
}

/// Weights for the BIS/win-rate blended model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendedScoringConfig {
    /// Points for crafting every BIS item.
    pub bis_weight: f64,
    pub partial_bonus: i32,
    /// Win rate (percent) that earns zero points.
    pub winrate_floor: f64,
    pub winrate_slope: f64,
    pub winrate_cap: f64,
}

impl Default for BlendedScoringConfig {
    fn default() -> Self {
        Self {
            bis_weight: 60.0,
            partial_bonus: 5,
            winrate_floor: 45.0,
            winrate_slope: 4.0,
            winrate_cap: 40.0,
        }
    }
}

/// Weights for matching finished items against BIS lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemMatchConfig {
    pub winrate_floor: f64,
    pub winrate_slope: f64,
    pub winrate_cap: f64,
}

impl Default for ItemMatchConfig {
    fn default() -> Self {
        Self {
            winrate_floor: 45.0,
            winrate_slope: 2.0,
            winrate_cap: 20.0,
        }
    }
}
