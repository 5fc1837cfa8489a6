use indexmap::IndexMap;

use crate::catalog::{
    CatalogSnapshot, Composition, Inventory, Item, ItemCatalog, ItemType, Recipe, Tier, TierTable,
};
use crate::sources::ExternalComposition;

pub(super) fn component(id: &str) -> Item {
    Item {
        id: id.to_string(),
        name: id.to_uppercase(),
        item_type: ItemType::Util,
        recipe: None,
    }
}

pub(super) fn crafted(id: &str, name: &str, item_type: ItemType, a: &str, b: &str) -> Item {
    Item {
        id: id.to_string(),
        name: name.to_string(),
        item_type,
        recipe: Some(Recipe::new(a, b)),
    }
}

pub(super) fn items() -> Vec<Item> {
    vec![
        component("bf"),
        component("tear"),
        component("rod"),
        component("glove"),
        component("chain"),
        component("bow"),
        crafted("shojin", "Spear of Shojin", ItemType::Ap, "bf", "tear"),
        crafted("ie", "Infinity Edge", ItemType::Ad, "bf", "glove"),
        crafted("bt", "Bloodthirster", ItemType::Ad, "bf", "chain"),
        crafted("rabadon", "Rabadon's Deathcap", ItemType::Ap, "rod", "rod"),
        crafted("deathblade", "Deathblade", ItemType::Ad, "bf", "bf"),
        crafted("guinsoo", "Guinsoo's Rageblade", ItemType::Ad, "bow", "rod"),
        crafted("bramble", "Bramble Vest", ItemType::Tank, "chain", "chain"),
    ]
}

pub(super) fn catalog() -> ItemCatalog {
    ItemCatalog::new(items())
}

pub(super) fn inventory(pairs: &[(&str, u32)]) -> Inventory {
    pairs.iter().map(|(id, count)| (*id, *count)).collect()
}

pub(super) fn weights(pairs: &[(&str, i32)]) -> IndexMap<String, i32> {
    pairs
        .iter()
        .map(|(id, weight)| (id.to_string(), *weight))
        .collect()
}

pub(super) fn composition(id: &str, name: &str, bis: &[&str]) -> Composition {
    Composition {
        id: id.to_string(),
        name: name.to_string(),
        tag: String::new(),
        tier: Tier::B,
        winrate: None,
        avg_place: None,
        tactics_name: None,
        bis_type: None,
        bis_items: bis.iter().map(|id| id.to_string()).collect(),
        items: IndexMap::new(),
        units: IndexMap::new(),
    }
}

pub(super) fn external(name: &str, winrate: Option<f64>, avg_place: Option<f64>) -> ExternalComposition {
    ExternalComposition {
        id: name.to_lowercase().replace(' ', "-"),
        name: name.to_string(),
        tier: Tier::B,
        winrate,
        avg_place,
        units: Vec::new(),
        bis_items: Vec::new(),
    }
}

pub(super) fn snapshot(compositions: Vec<Composition>) -> CatalogSnapshot {
    CatalogSnapshot::new(items(), compositions, TierTable::default())
}
