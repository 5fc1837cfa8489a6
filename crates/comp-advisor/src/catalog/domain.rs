use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Item family, used for catalog grouping and type-matching augments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Ad,
    Ap,
    Tank,
    Util,
}

impl ItemType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "ad" => Some(Self::Ad),
            "ap" => Some(Self::Ap),
            "tank" => Some(Self::Tank),
            "util" => Some(Self::Util),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Ad => "AD",
            Self::Ap => "AP",
            Self::Tank => "Tank",
            Self::Util => "Util",
        }
    }
}

/// Two-slot crafting recipe. Equal slots mean two units of one component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Recipe(pub String, pub String);

impl Recipe {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self(first.into(), second.into())
    }

    pub fn first(&self) -> &str {
        &self.0
    }

    pub fn second(&self) -> &str {
        &self.1
    }

    pub fn is_double(&self) -> bool {
        self.0 == self.1
    }
}

/// Catalog item. Items without a recipe are components and never crafted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe: Option<Recipe>,
}

impl Item {
    pub fn is_component(&self) -> bool {
        self.recipe.is_none()
    }
}

/// Meta tier of a composition. Parsing is lenient: unknown labels fall back to `B`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(from = "String")]
pub enum Tier {
    S,
    A,
    #[default]
    B,
    C,
    D,
}

impl Tier {
    pub const ALL: [Tier; 5] = [Tier::S, Tier::A, Tier::B, Tier::C, Tier::D];

    pub fn parse(raw: &str) -> Self {
        let value = raw.trim().to_ascii_uppercase();
        match value.as_str() {
            "S" => Self::S,
            "A" => Self::A,
            "B" => Self::B,
            "C" => Self::C,
            "D" => Self::D,
            _ if value.starts_with('S') => Self::S,
            _ if value.starts_with('A') => Self::A,
            _ => Self::B,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::S => "S",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

impl From<String> for Tier {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

/// Known team composition, optionally enriched with external statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Composition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub tier: Tier,
    /// Win rate on a 0-100 scale.
    #[serde(default)]
    pub winrate: Option<f64>,
    #[serde(default)]
    pub avg_place: Option<f64>,
    /// Name of the external record this composition was matched to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tactics_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bis_type: Option<ItemType>,
    /// Best-in-slot item ids in priority order.
    #[serde(default)]
    pub bis_items: Vec<String>,
    /// Desired non-BIS items and their weights, in catalog order.
    #[serde(default)]
    pub items: IndexMap<String, i32>,
    #[serde(default)]
    pub units: IndexMap<String, i32>,
}

/// Component counts held by the player.
///
/// Scoring passes always work on a clone; the caller's value is never touched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory(BTreeMap<String, u32>);

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, component: impl Into<String>, count: u32) -> Self {
        self.0.insert(component.into(), count);
        self
    }

    pub fn count(&self, component: &str) -> u32 {
        self.0.get(component).copied().unwrap_or(0)
    }

    pub fn has(&self, component: &str) -> bool {
        self.count(component) > 0
    }

    pub fn set(&mut self, component: impl Into<String>, count: u32) {
        self.0.insert(component.into(), count);
    }

    /// Removes `amount` units if available; otherwise leaves the count untouched.
    pub fn take(&mut self, component: &str, amount: u32) -> bool {
        match self.0.get_mut(component) {
            Some(count) if *count >= amount => {
                *count -= amount;
                true
            }
            _ => false,
        }
    }

    pub fn total(&self) -> u64 {
        self.0.values().map(|count| u64::from(*count)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(id, count)| (id.as_str(), *count))
    }
}

impl<K: Into<String>> FromIterator<(K, u32)> for Inventory {
    fn from_iter<T: IntoIterator<Item = (K, u32)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(id, count)| (id.into(), count)).collect())
    }
}

/// Player-chosen augment tags. Unrecognized tags are kept as `Other` and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Augment {
    Ap,
    Ad,
    Tank,
    Reroll,
    Fast8,
    Lose,
    #[serde(other)]
    Other,
}

impl Augment {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "ap" => Self::Ap,
            "ad" => Self::Ad,
            "tank" => Self::Tank,
            "reroll" => Self::Reroll,
            "fast8" => Self::Fast8,
            "lose" => Self::Lose,
            _ => Self::Other,
        }
    }
}

/// Transient selections made in the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    #[serde(default)]
    pub selected_components: Inventory,
    #[serde(default)]
    pub selected_units: BTreeMap<String, bool>,
    #[serde(default)]
    pub contested_units: BTreeMap<String, bool>,
    #[serde(default)]
    pub augments: BTreeSet<Augment>,
}

impl SelectionState {
    pub fn owns(&self, unit: &str) -> bool {
        self.selected_units.get(unit).copied().unwrap_or(false)
    }

    pub fn is_contested(&self, unit: &str) -> bool {
        self.contested_units.get(unit).copied().unwrap_or(false)
    }

    pub fn has_augment(&self, augment: Augment) -> bool {
        self.augments.contains(&augment)
    }
}
