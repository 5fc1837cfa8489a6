use std::collections::BTreeSet;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use super::views::RecommendationList;
use crate::catalog::{
    CatalogLoadError, CatalogSnapshot, CatalogSource, CatalogStatus, Inventory, SelectionState,
};
use crate::engine::{
    find_craftable, Allocation, BlendedScore, ItemMatchScore, Ranker, WeightedScore,
    DEFAULT_CRAFT_PRIORITY,
};

/// Serves rankings from the current catalog snapshot.
///
/// Each call clones the `Arc` of the live snapshot, so a concurrent
/// [`refresh`](Self::refresh) never changes data under an in-flight request.
pub struct RecommendationService<S> {
    source: S,
    snapshot: RwLock<Arc<CatalogSnapshot>>,
    ranker: Ranker,
    top_n: usize,
}

impl<S: CatalogSource> RecommendationService<S> {
    /// Loads the first snapshot from `source`.
    pub fn new(source: S, ranker: Ranker, top_n: usize) -> Result<Self, ServiceError> {
        let snapshot = source.load()?;
        Ok(Self::with_snapshot(source, snapshot, ranker, top_n))
    }

    pub fn with_snapshot(
        source: S,
        snapshot: CatalogSnapshot,
        ranker: Ranker,
        top_n: usize,
    ) -> Self {
        Self {
            source,
            snapshot: RwLock::new(Arc::new(snapshot)),
            ranker,
            top_n,
        }
    }

    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    pub fn status(&self) -> CatalogStatus {
        self.snapshot().status()
    }

    /// Rebuilds the snapshot from the source and swaps it in.
    pub fn refresh(&self) -> Result<CatalogStatus, ServiceError> {
        let fresh = Arc::new(self.source.load()?);
        let status = fresh.status();
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = fresh;

        info!(
            items = status.items,
            compositions = status.compositions,
            external = status.external_compositions,
            "catalog refreshed"
        );
        Ok(status)
    }

    pub fn blended(&self, components: &Inventory) -> RecommendationList<BlendedScore> {
        let ranked = self.ranker.rank_blended(&self.snapshot(), components);
        RecommendationList::top("blended", ranked, self.top_n)
    }

    pub fn weighted(&self, selection: &SelectionState) -> RecommendationList<WeightedScore> {
        let ranked = self.ranker.rank_weighted(&self.snapshot(), selection);
        RecommendationList::top("weighted", ranked, self.top_n)
    }

    pub fn item_match(&self, owned: &BTreeSet<String>) -> RecommendationList<ItemMatchScore> {
        let ranked = self.ranker.rank_item_match(&self.snapshot(), owned);
        RecommendationList::top("items", ranked, self.top_n)
    }

    pub fn craftable(&self, components: &Inventory) -> Allocation {
        let snapshot = self.snapshot();
        find_craftable(components, snapshot.items.items(), DEFAULT_CRAFT_PRIORITY)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Catalog(#[from] CatalogLoadError),
}
