//! Ordered field candidates for heterogeneous external records.
//!
//! Each list is tried front to back; the first path whose value has the
//! requested shape wins. Dotted entries descend into nested objects.

use serde_json::Value;

pub(crate) const NAME: &[&str] = &[
    "name",
    "compName",
    "compositionName",
    "title",
    "metaName",
    "comp.name",
    "composition.name",
];

pub(crate) const WINRATE: &[&str] = &[
    "winrate",
    "winRate",
    "win_rate",
    "stats.winrate",
    "stats.winRate",
    "avgWinrate",
];

pub(crate) const AVG_PLACE: &[&str] = &[
    "avgPlace",
    "avgPlacement",
    "avg_position",
    "stats.avgPlacement",
    "stats.avgPlace",
    "averagePlacement",
];

pub(crate) const TIER: &[&str] = &["tier", "rank", "tierRank", "stats.tier", "meta.tier", "rating"];

pub(crate) const UNITS: &[&str] = &[
    "units",
    "champions",
    "board",
    "finalUnits",
    "composition.units",
    "coreUnits",
    "championsIds",
];

pub(crate) const BIS_ITEMS: &[&str] = &[
    "bisItems",
    "items",
    "coreItems",
    "bestItems",
    "itemIds",
    "itemIdsCore",
    "items.core",
    "items.bis",
];

/// Keys probed on object entries inside unit/item lists.
pub(crate) const ENTRY_ID: &[&str] = &[
    "id",
    "itemId",
    "unitId",
    "championId",
    "apiName",
    "name",
    "displayName",
];

/// Narrower lists used when deciding whether an object looks like a composition.
pub(crate) const PROBE_NAME: &[&str] = &["name", "compName", "compositionName", "title"];
pub(crate) const PROBE_WINRATE: &[&str] = &["winrate", "winRate", "win_rate", "stats.winrate"];
pub(crate) const PROBE_AVG_PLACE: &[&str] = &["avgPlace", "avgPlacement", "stats.avgPlacement"];

pub(crate) fn lookup<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(record, |node, part| node.as_object()?.get(part))
}

pub(crate) fn resolve_number(record: &Value, candidates: &[&str]) -> Option<f64> {
    candidates
        .iter()
        .filter_map(|path| lookup(record, path))
        .find_map(|value| value.as_f64().filter(|number| number.is_finite()))
}

pub(crate) fn resolve_string(record: &Value, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .filter_map(|path| lookup(record, path))
        .find_map(|value| {
            value
                .as_str()
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(str::to_string)
        })
}

/// First candidate holding an array, flattened into ids.
pub(crate) fn resolve_list(record: &Value, candidates: &[&str]) -> Vec<String> {
    candidates
        .iter()
        .filter_map(|path| lookup(record, path))
        .find_map(Value::as_array)
        .map(|entries| entries.iter().filter_map(entry_id).collect())
        .unwrap_or_default()
}

fn entry_id(entry: &Value) -> Option<String> {
    let id = match entry {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Object(_) => ENTRY_ID
            .iter()
            .filter_map(|key| entry.get(*key))
            .find_map(|value| value.as_str().filter(|text| !text.is_empty()))
            .map(str::to_string)?,
        _ => return None,
    };
    (!id.is_empty()).then_some(id)
}
