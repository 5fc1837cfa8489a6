use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{Composition, Item, Tier};
use crate::sources::ExternalComposition;

/// Item definitions searchable by id. Insertion order is preserved.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: Vec<Item>,
    index: HashMap<String, usize>,
}

impl ItemCatalog {
    pub fn new(items: Vec<Item>) -> Self {
        let mut index = HashMap::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            // first definition wins, later duplicates stay listed but unreachable by id
            index.entry(item.id.clone()).or_insert(position);
        }
        Self { items, index }
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.index.get(id).map(|position| &self.items[*position])
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

pub const DEFAULT_TIER_MULTIPLIERS: [(Tier, f64); 5] = [
    (Tier::S, 1.3),
    (Tier::A, 1.15),
    (Tier::B, 1.0),
    (Tier::C, 0.9),
    (Tier::D, 0.8),
];

/// Tier defaults per composition id plus the tier -> multiplier table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierTable {
    pub defaults: HashMap<String, Tier>,
    pub multipliers: BTreeMap<Tier, f64>,
    pub fallback: Tier,
}

impl TierTable {
    pub fn tier_for(&self, composition_id: &str) -> Tier {
        self.defaults
            .get(composition_id)
            .copied()
            .unwrap_or(self.fallback)
    }

    /// Tiers missing from the table do not scale the score.
    pub fn multiplier(&self, tier: Tier) -> f64 {
        self.multipliers.get(&tier).copied().unwrap_or(1.0)
    }
}

impl Default for TierTable {
    fn default() -> Self {
        Self {
            defaults: HashMap::new(),
            multipliers: DEFAULT_TIER_MULTIPLIERS.into_iter().collect(),
            fallback: Tier::B,
        }
    }
}

/// Immutable view of everything the engine reads. A refresh builds a new one.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub items: ItemCatalog,
    pub compositions: Vec<Composition>,
    pub tiers: TierTable,
    pub external: Vec<ExternalComposition>,
    pub loaded_at: DateTime<Utc>,
    pub external_updated_at: Option<DateTime<Utc>>,
}

impl CatalogSnapshot {
    pub fn new(items: Vec<Item>, compositions: Vec<Composition>, tiers: TierTable) -> Self {
        Self {
            items: ItemCatalog::new(items),
            compositions,
            tiers,
            external: Vec::new(),
            loaded_at: Utc::now(),
            external_updated_at: None,
        }
    }

    pub fn with_external(
        mut self,
        external: Vec<ExternalComposition>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        self.external = external;
        self.external_updated_at = updated_at;
        self
    }

    pub fn status(&self) -> CatalogStatus {
        CatalogStatus {
            items: self.items.len(),
            compositions: self.compositions.len(),
            external_compositions: self.external.len(),
            loaded_at: self.loaded_at,
            external_updated_at: self.external_updated_at,
        }
    }
}

/// Counters and timestamps describing the live snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStatus {
    pub items: usize,
    pub compositions: usize,
    pub external_compositions: usize,
    pub loaded_at: DateTime<Utc>,
    pub external_updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::domain::{ItemType, Recipe};

    fn item(id: &str, name: &str) -> Item {
        Item {
            id: id.to_string(),
            name: name.to_string(),
            item_type: ItemType::Ad,
            recipe: Some(Recipe::new("bf", "glove")),
        }
    }

    #[test]
    fn item_lookup_keeps_first_definition() {
        let catalog = ItemCatalog::new(vec![item("ie", "Infinity Edge"), item("ie", "Shadow IE")]);
        assert_eq!(catalog.get("ie").map(|item| item.name.as_str()), Some("Infinity Edge"));
        assert_eq!(catalog.len(), 2);
        assert!(catalog.get("bt").is_none());
    }

    #[test]
    fn tier_table_falls_back_to_b() {
        let mut tiers = TierTable::default();
        tiers.defaults.insert("sniper".to_string(), Tier::S);
        assert_eq!(tiers.tier_for("sniper"), Tier::S);
        assert_eq!(tiers.tier_for("unknown"), Tier::B);
        assert_eq!(tiers.multiplier(Tier::B), 1.0);

        tiers.multipliers.remove(&Tier::D);
        assert_eq!(tiers.multiplier(Tier::D), 1.0);
    }
}
