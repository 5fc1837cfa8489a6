use serde::{Deserialize, Serialize};

use super::allocator::craft_once;
use crate::catalog::{Inventory, ItemCatalog, Recipe};

/// BIS item that could be built from the remaining components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BisCraft {
    pub id: String,
    pub name: String,
    pub recipe: Recipe,
}

/// BIS item with only one half of its recipe held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BisPartial {
    pub id: String,
    pub name: String,
    pub has: String,
    pub missing: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BisOutcome {
    Crafted(BisCraft),
    Partial(BisPartial),
}

/// Walks `bis_ids` in priority order, crafting each at most once from
/// `available`. Partial credit looks at `original`, the pre-pass selection.
/// Unknown ids, recipe-less items, and items with neither component yield
/// no outcome.
pub(crate) fn bis_pass(
    bis_ids: &[String],
    items: &ItemCatalog,
    original: &Inventory,
    available: &mut Inventory,
) -> Vec<BisOutcome> {
    let mut outcomes = Vec::new();

    for bis_id in bis_ids {
        let Some(item) = items.get(bis_id) else {
            continue;
        };
        let Some(recipe) = &item.recipe else {
            continue;
        };

        if craft_once(available, recipe) {
            outcomes.push(BisOutcome::Crafted(BisCraft {
                id: item.id.clone(),
                name: item.name.clone(),
                recipe: recipe.clone(),
            }));
            continue;
        }

        let has_first = original.has(recipe.first());
        let has_second = original.has(recipe.second());
        if !has_first && !has_second {
            continue;
        }

        let (has, missing) = if has_first {
            (recipe.first(), recipe.second())
        } else {
            (recipe.second(), recipe.first())
        };
        outcomes.push(BisOutcome::Partial(BisPartial {
            id: item.id.clone(),
            name: item.name.clone(),
            has: has.to_string(),
            missing: missing.to_string(),
        }));
    }

    outcomes
}
