use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::config::ItemMatchConfig;
use super::round_half_up;
use crate::catalog::Composition;

/// Match of finished items against a composition's BIS list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemMatchScore {
    pub score: f64,
    pub match_percent: i32,
    pub matched: Vec<String>,
    pub winrate_bonus: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ItemMatchScorer {
    config: ItemMatchConfig,
}

impl ItemMatchScorer {
    pub fn new(config: ItemMatchConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, owned: &BTreeSet<String>, composition: &Composition) -> ItemMatchScore {
        let matched: Vec<String> = composition
            .bis_items
            .iter()
            .filter(|id| owned.contains(*id))
            .cloned()
            .collect();

        let match_percent = if composition.bis_items.is_empty() {
            0
        } else {
            round_half_up(matched.len() as f64 / composition.bis_items.len() as f64 * 100.0)
        };

        let winrate = composition.winrate.unwrap_or(0.0);
        let winrate_bonus = ((winrate - self.config.winrate_floor) * self.config.winrate_slope)
            .clamp(0.0, self.config.winrate_cap);

        ItemMatchScore {
            score: f64::from(match_percent) + winrate_bonus,
            match_percent,
            matched,
            winrate_bonus,
        }
    }
}
