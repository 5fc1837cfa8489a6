use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use super::domain::{Composition, Item, ItemType, Recipe, Tier};
use super::snapshot::{CatalogSnapshot, TierTable};
use crate::config::CatalogConfig;
use crate::sources::{ExternalImportError, ExternalImporter};

/// Errors raised while reading the static catalog files.
#[derive(Debug, thiserror::Error)]
pub enum CatalogLoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog json: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    External(#[from] ExternalImportError),
}

/// Anything able to produce a fresh catalog snapshot.
pub trait CatalogSource: Send + Sync {
    fn load(&self) -> Result<CatalogSnapshot, CatalogLoadError>;
}

/// Reads items, compositions and (optionally) external statistics from disk.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    items_path: PathBuf,
    comps_path: PathBuf,
    external_path: Option<PathBuf>,
}

impl FileCatalogSource {
    pub fn new(items_path: impl Into<PathBuf>, comps_path: impl Into<PathBuf>) -> Self {
        Self {
            items_path: items_path.into(),
            comps_path: comps_path.into(),
            external_path: None,
        }
    }

    pub fn with_external(mut self, external_path: impl Into<PathBuf>) -> Self {
        self.external_path = Some(external_path.into());
        self
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(&config.items_path, &config.comps_path).with_external(&config.external_path)
    }
}

impl CatalogSource for FileCatalogSource {
    fn load(&self) -> Result<CatalogSnapshot, CatalogLoadError> {
        let items = parse_items(open(&self.items_path)?)?;
        let (compositions, tiers) = parse_compositions(open(&self.comps_path)?)?;
        let snapshot = CatalogSnapshot::new(items, compositions, tiers);

        let Some(external_path) = self.external_path.as_deref() else {
            return Ok(snapshot);
        };
        if !external_path.exists() {
            debug!(path = %external_path.display(), "no external statistics on disk");
            return Ok(snapshot);
        }

        let import = ExternalImporter::from_path(external_path)?;
        Ok(snapshot.with_external(import.compositions, import.updated_at))
    }
}

fn open(path: &Path) -> Result<std::fs::File, CatalogLoadError> {
    std::fs::File::open(path).map_err(|source| CatalogLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug, Deserialize)]
struct ItemsFile {
    #[serde(default)]
    items: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    id: String,
    name: String,
    #[serde(rename = "type", default)]
    item_type: String,
    #[serde(default)]
    recipe: Option<Vec<String>>,
}

/// Parses an items file. Unknown item types are skipped; malformed recipes
/// degrade to "not craftable".
pub fn parse_items<R: Read>(reader: R) -> Result<Vec<Item>, CatalogLoadError> {
    let file: ItemsFile = serde_json::from_reader(reader)?;
    let mut items = Vec::with_capacity(file.items.len());

    for raw in file.items {
        let Some(item_type) = ItemType::parse(&raw.item_type) else {
            warn!(item = %raw.id, kind = %raw.item_type, "skipping item with unknown type");
            continue;
        };

        let recipe = match raw.recipe {
            Some(slots) if slots.len() == 2 => {
                let mut slots = slots.into_iter();
                match (slots.next(), slots.next()) {
                    (Some(first), Some(second)) => Some(Recipe(first, second)),
                    _ => None,
                }
            }
            _ => None,
        };

        items.push(Item {
            id: raw.id,
            name: raw.name,
            item_type,
            recipe,
        });
    }

    Ok(items)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompositionsFile {
    #[serde(default)]
    tier_defaults: HashMap<String, Tier>,
    #[serde(default)]
    tier_multipliers: BTreeMap<Tier, f64>,
    #[serde(default)]
    comps: Vec<Composition>,
}

/// Parses the local composition catalog and its tier tables.
pub fn parse_compositions<R: Read>(
    reader: R,
) -> Result<(Vec<Composition>, TierTable), CatalogLoadError> {
    let file: CompositionsFile = serde_json::from_reader(reader)?;

    let mut tiers = TierTable {
        defaults: file.tier_defaults,
        ..TierTable::default()
    };
    for (tier, multiplier) in file.tier_multipliers {
        if multiplier.is_finite() {
            tiers.multipliers.insert(tier, multiplier);
        }
    }

    Ok((file.comps, tiers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parse_items_skips_unknown_types_and_bad_recipes() {
        let items = parse_items(Cursor::new(
            r#"{"items": [
                {"id": "bf", "name": "B.F. Sword", "type": "ad"},
                {"id": "ie", "name": "Infinity Edge", "type": "AD", "recipe": ["bf", "glove"]},
                {"id": "odd", "name": "Odd", "type": "ad", "recipe": ["bf"]},
                {"id": "emblem", "name": "Emblem", "type": "trait", "recipe": ["spat", "bf"]}
            ]}"#,
        ))
        .expect("items parse");

        assert_eq!(items.len(), 3);
        assert!(items[0].is_component());
        assert_eq!(items[1].recipe, Some(Recipe::new("bf", "glove")));
        assert!(items[2].recipe.is_none());
    }

    #[test]
    fn parse_compositions_merges_tier_overrides() {
        let (comps, tiers) = parse_compositions(Cursor::new(
            r#"{
                "tierDefaults": {"sniper": "S"},
                "tierMultipliers": {"S": 1.5},
                "comps": [{"id": "sniper", "name": "Snipers", "bisItems": ["ie"]}]
            }"#,
        ))
        .expect("comps parse");

        assert_eq!(comps.len(), 1);
        assert_eq!(tiers.tier_for("sniper"), Tier::S);
        assert_eq!(tiers.multiplier(Tier::S), 1.5);
        assert_eq!(tiers.multiplier(Tier::A), 1.15);
    }

    #[test]
    fn file_source_reports_missing_files() {
        let source = FileCatalogSource::new("./missing-items.json", "./missing-comps.json");
        match source.load() {
            Err(CatalogLoadError::Io { path, .. }) => {
                assert_eq!(path, PathBuf::from("./missing-items.json"))
            }
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
