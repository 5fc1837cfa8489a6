use serde::{Deserialize, Serialize};
use tracing::debug;

use super::bis::{bis_pass, BisCraft, BisOutcome, BisPartial};
use super::config::BlendedScoringConfig;
use super::round_half_up;
use crate::catalog::{Composition, Inventory, ItemCatalog};

/// Result of the BIS/win-rate blended model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlendedScore {
    pub score: i32,
    /// Number of BIS items craftable.
    pub bis_match: usize,
    pub bis_craftable: Vec<BisCraft>,
    pub bis_partial: Vec<BisPartial>,
    pub bis_total: usize,
    pub match_percent: i32,
    pub winrate: Option<f64>,
    pub winrate_score: i32,
    pub bis_score: i32,
    pub details: Vec<String>,
}

impl BlendedScore {
    fn without_bis(composition: &Composition) -> Self {
        Self {
            score: 0,
            bis_match: 0,
            bis_craftable: Vec::new(),
            bis_partial: Vec::new(),
            bis_total: 0,
            match_percent: 0,
            winrate: composition.winrate,
            winrate_score: 0,
            bis_score: 0,
            details: vec![format!("{} has no BIS items defined", composition.name)],
        }
    }
}

/// Scores a composition from components and external win rate only.
#[derive(Debug, Clone, Default)]
pub struct BlendedScorer {
    config: BlendedScoringConfig,
}

impl BlendedScorer {
    pub fn new(config: BlendedScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BlendedScoringConfig {
        &self.config
    }

    pub fn score(
        &self,
        components: &Inventory,
        composition: &Composition,
        items: &ItemCatalog,
    ) -> BlendedScore {
        if composition.bis_items.is_empty() {
            return BlendedScore::without_bis(composition);
        }

        let mut available = components.clone();
        let mut bis_craftable = Vec::new();
        let mut bis_partial = Vec::new();
        for outcome in bis_pass(&composition.bis_items, items, components, &mut available) {
            match outcome {
                BisOutcome::Crafted(craft) => bis_craftable.push(craft),
                BisOutcome::Partial(partial) => bis_partial.push(partial),
            }
        }

        let bis_total = composition.bis_items.len();
        let bis_match = bis_craftable.len();
        let ratio = bis_match as f64 / bis_total as f64;
        let partial_count = i32::try_from(bis_partial.len()).unwrap_or(i32::MAX);
        let bis_score = round_half_up(ratio * self.config.bis_weight)
            + self.config.partial_bonus.saturating_mul(partial_count);
        let winrate_score = self.winrate_score(composition.winrate);
        let match_percent = round_half_up(ratio * 100.0);

        let mut details = vec![format!(
            "BIS: {}/{} craftable ({}%): +{} pts",
            bis_match,
            bis_total,
            match_percent,
            bis_score
        )];
        details.extend(bis_craftable.iter().map(|craft| format!("  {} ready", craft.name)));
        details.extend(
            bis_partial
                .iter()
                .map(|partial| format!("  {} partial (missing {})", partial.name, partial.missing)),
        );
        match composition.winrate {
            Some(winrate) => details.push(format!(
                "Win rate {winrate:.2}%: +{winrate_score} pts"
            )),
            None => details.push("Win rate unknown: +0 pts".to_string()),
        }

        let score = bis_score + winrate_score;
        debug!(
            composition = %composition.id,
            score,
            bis_score,
            winrate_score,
            "blended score computed"
        );

        BlendedScore {
            score,
            bis_match,
            bis_craftable,
            bis_partial,
            bis_total,
            match_percent,
            winrate: composition.winrate,
            winrate_score,
            bis_score,
            details,
        }
    }

    /// Linear map of win rate onto `0..=winrate_cap`, zero when absent.
    pub fn winrate_score(&self, winrate: Option<f64>) -> i32 {
        let Some(winrate) = winrate else {
            return 0;
        };
        let raw = (winrate - self.config.winrate_floor) * self.config.winrate_slope;
        round_half_up(raw.clamp(0.0, self.config.winrate_cap))
    }
}
