use serde::Serialize;

use crate::catalog::Tier;
use crate::engine::{BlendedScore, ItemMatchScore, RankScore, RankedComposition, WeightedScore};

/// Coarse rating shown next to a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 40.0 {
            Self::High
        } else if score >= 20.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Trace lines explaining a score, in application order.
pub trait ScoreTrace {
    fn trace(&self) -> Vec<String>;
}

impl ScoreTrace for WeightedScore {
    fn trace(&self) -> Vec<String> {
        self.details.clone()
    }
}

impl ScoreTrace for BlendedScore {
    fn trace(&self) -> Vec<String> {
        self.details.clone()
    }
}

impl ScoreTrace for ItemMatchScore {
    fn trace(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "BIS items held: {} ({}%)",
            self.matched.len(),
            self.match_percent
        )];
        if self.winrate_bonus > 0.0 {
            lines.push(format!("Win rate bonus: +{:.1} pts", self.winrate_bonus));
        }
        lines
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationView<S> {
    pub rank: usize,
    pub composition_id: String,
    pub name: String,
    pub tag: String,
    pub tier: Tier,
    pub tier_label: &'static str,
    pub winrate: Option<f64>,
    pub avg_place: Option<f64>,
    pub tactics_name: Option<String>,
    pub score: f64,
    pub band: ScoreBand,
    pub band_label: &'static str,
    pub trace: Vec<String>,
    pub result: S,
}

impl<S: RankScore + ScoreTrace> RecommendationView<S> {
    pub fn from_ranked(rank: usize, ranked: RankedComposition<S>) -> Self {
        let score = ranked.result.rank_score();
        let band = ScoreBand::from_score(score);
        let composition = ranked.composition;
        Self {
            rank,
            composition_id: composition.id,
            name: composition.name,
            tag: composition.tag,
            tier: composition.tier,
            tier_label: composition.tier.label(),
            winrate: composition.winrate,
            avg_place: composition.avg_place,
            tactics_name: composition.tactics_name,
            score,
            band,
            band_label: band.label(),
            trace: ranked.result.trace(),
            result: ranked.result,
        }
    }
}

/// Truncated ranking returned to callers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationList<S> {
    pub model: &'static str,
    /// Number of compositions ranked before truncation.
    pub ranked: usize,
    pub recommendations: Vec<RecommendationView<S>>,
}

impl<S: RankScore + ScoreTrace> RecommendationList<S> {
    pub fn top(model: &'static str, ranked: Vec<RankedComposition<S>>, top_n: usize) -> Self {
        let total = ranked.len();
        let recommendations = ranked
            .into_iter()
            .take(top_n)
            .enumerate()
            .map(|(index, entry)| RecommendationView::from_ranked(index + 1, entry))
            .collect();
        Self {
            model,
            ranked: total,
            recommendations,
        }
    }
}
