//! Normalization of externally sourced composition statistics.
//!
//! External datasets arrive with inconsistent field names; every record is
//! reduced to an [`ExternalComposition`] before it reaches the merger.

mod fields;
mod normalizer;
mod parser;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Read;
use std::path::Path;

use crate::catalog::{Composition, Tier};

pub(crate) use normalizer::normalize_name;

#[derive(Debug)]
pub enum ExternalImportError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for ExternalImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExternalImportError::Io(err) => write!(f, "failed to read external dataset: {}", err),
            ExternalImportError::Json(err) => write!(f, "invalid external JSON payload: {}", err),
            ExternalImportError::Csv(err) => write!(f, "invalid external CSV data: {}", err),
        }
    }
}

impl std::error::Error for ExternalImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExternalImportError::Io(err) => Some(err),
            ExternalImportError::Json(err) => Some(err),
            ExternalImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ExternalImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for ExternalImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<csv::Error> for ExternalImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Composition statistics from an external source, normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalComposition {
    pub id: String,
    pub name: String,
    pub tier: Tier,
    pub winrate: Option<f64>,
    pub avg_place: Option<f64>,
    #[serde(default)]
    pub units: Vec<String>,
    #[serde(default)]
    pub bis_items: Vec<String>,
}

impl From<&ExternalComposition> for Composition {
    /// Standalone composition scored by its own BIS list and win rate.
    fn from(external: &ExternalComposition) -> Self {
        Self {
            id: external.id.clone(),
            name: external.name.clone(),
            tag: String::new(),
            tier: external.tier,
            winrate: external.winrate,
            avg_place: external.avg_place,
            tactics_name: Some(external.name.clone()),
            bis_type: None,
            bis_items: external.bis_items.clone(),
            items: IndexMap::new(),
            units: external.units.iter().map(|unit| (unit.clone(), 1)).collect(),
        }
    }
}

/// Result of one import: normalized records plus the payload timestamp.
#[derive(Debug, Clone, Default)]
pub struct ExternalImport {
    pub compositions: Vec<ExternalComposition>,
    pub updated_at: Option<DateTime<Utc>>,
}

pub struct ExternalImporter;

impl ExternalImporter {
    /// Chooses CSV or JSON parsing from the file extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ExternalImport, ExternalImportError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);

        if is_csv {
            Self::from_csv_reader(file)
        } else {
            Self::from_json_reader(file)
        }
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<ExternalImport, ExternalImportError> {
        let payload: Value = serde_json::from_reader(reader)?;
        Ok(Self::from_payload(&payload))
    }

    pub fn from_payload(payload: &Value) -> ExternalImport {
        let records = parser::discover_records(payload);
        let updated_at = payload
            .get("timestamp")
            .and_then(Value::as_str)
            .and_then(|raw| DateTime::parse_from_rfc3339(raw.trim()).ok())
            .map(|stamp| stamp.with_timezone(&Utc));

        ExternalImport {
            compositions: normalize_all(records.into_iter()),
            updated_at,
        }
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<ExternalImport, ExternalImportError> {
        let records = parser::parse_csv_records(reader)?;
        Ok(ExternalImport {
            compositions: normalize_all(records.iter()),
            ..ExternalImport::default()
        })
    }
}

fn normalize_all<'a>(records: impl Iterator<Item = &'a Value>) -> Vec<ExternalComposition> {
    let normalized = records
        .enumerate()
        .map(|(index, record)| normalizer::normalize_record(record, index))
        .filter(|composition| !composition.id.is_empty())
        .collect();
    parser::dedupe_by_id(normalized, |composition: &ExternalComposition| {
        composition.id.as_str()
    })
}
