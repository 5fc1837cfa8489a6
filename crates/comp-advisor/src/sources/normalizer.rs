use serde_json::Value;

use super::fields;
use super::ExternalComposition;
use crate::catalog::Tier;

/// Lower-cases and keeps ASCII alphanumerics only.
pub(crate) fn normalize_name(value: &str) -> String {
    value
        .chars()
        .flat_map(char::to_lowercase)
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// URL-style id: accents folded, non-alphanumeric runs collapsed to `-`.
pub(crate) fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;

    for ch in value.chars().map(fold_accent).flat_map(char::to_lowercase) {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }

    slug
}

fn fold_accent(ch: char) -> char {
    match ch {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'A',
        'ç' => 'c',
        'Ç' => 'C',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'È' | 'É' | 'Ê' | 'Ë' => 'E',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'Ì' | 'Í' | 'Î' | 'Ï' => 'I',
        'ñ' => 'n',
        'Ñ' => 'N',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'Ù' | 'Ú' | 'Û' | 'Ü' => 'U',
        'ý' | 'ÿ' => 'y',
        'Ý' => 'Y',
        other => other,
    }
}

/// Builds an external composition from an arbitrarily shaped record.
/// `index` only feeds the placeholder name for unnamed records.
pub(crate) fn normalize_record(record: &Value, index: usize) -> ExternalComposition {
    let name = fields::resolve_string(record, fields::NAME)
        .unwrap_or_else(|| format!("Compo {}", index + 1));
    let winrate = fields::resolve_number(record, fields::WINRATE).map(scale_winrate);
    let avg_place = fields::resolve_number(record, fields::AVG_PLACE).map(scale_avg_place);

    let tier = match fields::resolve_string(record, fields::TIER) {
        Some(label) => Tier::parse(&label),
        None => infer_tier(winrate),
    };

    ExternalComposition {
        id: slugify(&name),
        name,
        tier,
        winrate,
        avg_place,
        units: fields::resolve_list(record, fields::UNITS),
        bis_items: fields::resolve_list(record, fields::BIS_ITEMS),
    }
}

/// Name plus at least one of win rate / average placement.
pub(crate) fn is_composition_like(record: &Value) -> bool {
    if !record.is_object() {
        return false;
    }
    fields::resolve_string(record, fields::PROBE_NAME).is_some()
        && (fields::resolve_number(record, fields::PROBE_WINRATE).is_some()
            || fields::resolve_number(record, fields::PROBE_AVG_PLACE).is_some())
}

fn scale_winrate(value: f64) -> f64 {
    let percent = if value <= 1.0 { value * 100.0 } else { value };
    round_to_hundredths(percent)
}

fn scale_avg_place(value: f64) -> f64 {
    let place = if value <= 1.0 { value * 10.0 } else { value };
    round_to_hundredths(place)
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn infer_tier(winrate: Option<f64>) -> Tier {
    match winrate {
        Some(rate) if rate >= 54.0 => Tier::S,
        Some(rate) if rate >= 51.0 => Tier::A,
        _ => Tier::B,
    }
}
