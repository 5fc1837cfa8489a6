//! Recommendation engine: crafting allocation, composition scoring, and
//! cross-source merging. Everything here is synchronous and side-effect free;
//! inventories are cloned per call.

mod allocator;
mod bis;
mod blended;
mod config;
mod item_match;
mod merge;
mod ranker;
mod weighted;

#[cfg(test)]
mod tests;

pub use allocator::{
    craft_once, find_craftable, prioritize, Allocation, CraftedItem, DEFAULT_CRAFT_PRIORITY,
};
pub use bis::{BisCraft, BisOutcome, BisPartial};
pub use blended::{BlendedScore, BlendedScorer};
pub use config::{BlendedScoringConfig, ItemMatchConfig, WeightedScoringConfig};
pub use item_match::{ItemMatchScore, ItemMatchScorer};
pub use merge::{CompositionMerger, ExternalLookup, NameMatcher, PrefixSubstringMatcher};
pub use ranker::{sort_ranked, RankScore, RankedComposition, Ranker};
pub use weighted::{ScoreComponent, ScoreFactor, WeightedScore, WeightedScorer};

/// Rounds halves toward positive infinity (`2.5 -> 3`, `-2.5 -> -2`).
pub(crate) fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}
