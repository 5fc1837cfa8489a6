use std::collections::HashSet;
use std::io::Read;

use serde_json::{Map, Number, Value};

use super::normalizer::is_composition_like;

/// Picks the composition records out of a JSON payload.
///
/// A top-level `comps` array is taken as-is. Otherwise the whole tree is
/// searched for the longest array of objects where at least `min(5, len)`
/// entries look like compositions.
pub(crate) fn discover_records(payload: &Value) -> Vec<&Value> {
    if let Some(comps) = payload.get("comps").and_then(Value::as_array) {
        return comps.iter().collect();
    }

    let mut candidates: Vec<&Vec<Value>> = Vec::new();
    collect_candidates(payload, &mut candidates);

    // stable: the first array found wins among equally long ones
    candidates.sort_by(|a, b| b.len().cmp(&a.len()));
    candidates
        .first()
        .map(|entries| entries.iter().collect())
        .unwrap_or_default()
}

fn collect_candidates<'a>(node: &'a Value, found: &mut Vec<&'a Vec<Value>>) {
    match node {
        Value::Array(entries) => {
            if !entries.is_empty() && entries.iter().all(Value::is_object) {
                let comp_like = entries
                    .iter()
                    .filter(|entry| is_composition_like(entry))
                    .count();
                if comp_like >= entries.len().min(5) {
                    found.push(entries);
                }
            }
            for entry in entries {
                collect_candidates(entry, found);
            }
        }
        Value::Object(map) => {
            for value in map.values() {
                collect_candidates(value, found);
            }
        }
        _ => {}
    }
}

/// Reads a CSV export into JSON objects keyed by header so the same field
/// candidates apply. Numeric-looking cells become numbers; blank cells are dropped.
pub(crate) fn parse_csv_records<R: Read>(reader: R) -> Result<Vec<Value>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut records = Vec::new();

    for row in csv_reader.records() {
        let row = row?;
        let mut object = Map::new();
        for (header, cell) in headers.iter().zip(row.iter()) {
            let header = header.trim_start_matches('\u{feff}');
            if header.is_empty() || cell.is_empty() {
                continue;
            }
            object.insert(header.to_string(), cell_value(cell));
        }
        records.push(Value::Object(object));
    }

    Ok(records)
}

fn cell_value(cell: &str) -> Value {
    cell.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(cell.to_string()))
}

/// Keeps the first record per id.
pub(crate) fn dedupe_by_id<T>(records: Vec<T>, id: impl Fn(&T) -> &str) -> Vec<T> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(id(record).to_string()))
        .collect()
}
