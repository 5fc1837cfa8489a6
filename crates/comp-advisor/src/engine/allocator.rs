use serde::Serialize;
use tracing::debug;

use crate::catalog::{Inventory, Item, ItemType, Recipe};

/// Items that claim shared components first when allocating freely.
pub const DEFAULT_CRAFT_PRIORITY: &[&str] =
    &["shojin", "jg", "guinsoo", "ie", "bt", "archangel", "void"];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CraftedItem {
    pub id: String,
    pub name: String,
    pub item_type: ItemType,
    pub used_components: Recipe,
}

/// Outcome of a free allocation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Allocation {
    pub crafted: Vec<CraftedItem>,
    pub remaining: Inventory,
}

/// Attempts a single craft, decrementing `inventory` only on success.
pub fn craft_once(inventory: &mut Inventory, recipe: &Recipe) -> bool {
    if recipe.is_double() {
        return inventory.take(recipe.first(), 2);
    }

    if inventory.has(recipe.first()) && inventory.has(recipe.second()) {
        inventory.take(recipe.first(), 1);
        inventory.take(recipe.second(), 1);
        return true;
    }

    false
}

/// Listed ids first in `priority` order; everything else keeps its position.
pub fn prioritize<'a>(items: &'a [Item], priority: &[&str]) -> Vec<&'a Item> {
    let mut ordered: Vec<&Item> = items.iter().collect();
    ordered.sort_by_key(|item| {
        priority
            .iter()
            .position(|id| *id == item.id)
            .unwrap_or(usize::MAX)
    });
    ordered
}

/// Crafts every item of `items` as many times as the inventory allows.
///
/// Allocation is order-sensitive: an item earlier in the (prioritized) list
/// can starve a later one sharing a component.
pub fn find_craftable(inventory: &Inventory, items: &[Item], priority: &[&str]) -> Allocation {
    let mut available = inventory.clone();
    let mut crafted = Vec::new();

    for item in prioritize(items, priority) {
        let Some(recipe) = &item.recipe else {
            continue;
        };

        while craft_once(&mut available, recipe) {
            crafted.push(CraftedItem {
                id: item.id.clone(),
                name: item.name.clone(),
                item_type: item.item_type,
                used_components: recipe.clone(),
            });
        }
    }

    debug!(
        crafted = crafted.len(),
        remaining = available.total(),
        "allocated components"
    );

    Allocation {
        crafted,
        remaining: available,
    }
}
