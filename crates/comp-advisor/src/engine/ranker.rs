use std::collections::BTreeSet;

use serde::Serialize;

use super::blended::{BlendedScore, BlendedScorer};
use super::item_match::{ItemMatchScore, ItemMatchScorer};
use super::merge::{CompositionMerger, PrefixSubstringMatcher};
use super::weighted::{WeightedScore, WeightedScorer};
use crate::catalog::{CatalogSnapshot, Composition, Inventory, SelectionState};

/// Value a result is ordered by.
pub trait RankScore {
    fn rank_score(&self) -> f64;
}

impl RankScore for WeightedScore {
    fn rank_score(&self) -> f64 {
        f64::from(self.score)
    }
}

impl RankScore for BlendedScore {
    fn rank_score(&self) -> f64 {
        f64::from(self.score)
    }
}

impl RankScore for ItemMatchScore {
    fn rank_score(&self) -> f64 {
        self.score
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedComposition<S> {
    pub composition: Composition,
    pub result: S,
}

/// Scores every composition of a snapshot and orders them best first.
/// Ties keep catalog order. The full ranking is returned; callers truncate.
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    pub weighted: WeightedScorer,
    pub blended: BlendedScorer,
    pub item_match: ItemMatchScorer,
    pub merger: CompositionMerger<PrefixSubstringMatcher>,
}

impl Ranker {
    /// Merges external statistics, then applies the blended model.
    pub fn rank_blended(
        &self,
        snapshot: &CatalogSnapshot,
        components: &Inventory,
    ) -> Vec<RankedComposition<BlendedScore>> {
        let merged = self.merger.merge(&snapshot.compositions, &snapshot.external);
        sort_ranked(
            merged
                .into_iter()
                .map(|composition| {
                    let result = self.blended.score(components, &composition, &snapshot.items);
                    RankedComposition {
                        composition,
                        result,
                    }
                })
                .collect(),
        )
    }

    /// Weighted model over the local catalog, no merge.
    pub fn rank_weighted(
        &self,
        snapshot: &CatalogSnapshot,
        selection: &SelectionState,
    ) -> Vec<RankedComposition<WeightedScore>> {
        sort_ranked(
            snapshot
                .compositions
                .iter()
                .map(|composition| RankedComposition {
                    composition: composition.clone(),
                    result: self.weighted.score(
                        composition,
                        selection,
                        &snapshot.items,
                        &snapshot.tiers,
                    ),
                })
                .collect(),
        )
    }

    /// Finished-item match over the external compositions, each scored by its
    /// own BIS list and win rate. Without external data the local catalog is
    /// scored instead.
    pub fn rank_item_match(
        &self,
        snapshot: &CatalogSnapshot,
        owned: &BTreeSet<String>,
    ) -> Vec<RankedComposition<ItemMatchScore>> {
        let candidates: Vec<Composition> = if snapshot.external.is_empty() {
            snapshot.compositions.clone()
        } else {
            snapshot.external.iter().map(Composition::from).collect()
        };
        sort_ranked(
            candidates
                .into_iter()
                .map(|composition| {
                    let result = self.item_match.score(owned, &composition);
                    RankedComposition {
                        composition,
                        result,
                    }
                })
                .collect(),
        )
    }
}

/// Stable descending sort by [`RankScore::rank_score`].
pub fn sort_ranked<S: RankScore>(
    mut ranked: Vec<RankedComposition<S>>,
) -> Vec<RankedComposition<S>> {
    ranked.sort_by(|a, b| b.result.rank_score().total_cmp(&a.result.rank_score()));
    ranked
}
