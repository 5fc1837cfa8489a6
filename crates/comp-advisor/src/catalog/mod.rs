//! Shared catalog shapes and the immutable snapshot threaded through the engine.

pub mod domain;
mod loader;
mod snapshot;

pub use domain::{
    Augment, Composition, Inventory, Item, ItemType, Recipe, SelectionState, Tier,
};
pub use loader::{
    parse_compositions, parse_items, CatalogLoadError, CatalogSource, FileCatalogSource,
};
pub use snapshot::{
    CatalogSnapshot, CatalogStatus, ItemCatalog, TierTable, DEFAULT_TIER_MULTIPLIERS,
};
