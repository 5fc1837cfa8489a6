use comp_advisor::catalog::{Augment, Inventory};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Parses `bf=1,tear=2`; a bare id counts as one unit and repeats accumulate.
pub(crate) fn parse_components(raw: &str) -> Result<Inventory, String> {
    let mut inventory = Inventory::new();
    for entry in raw.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
        let (id, count) = match entry.split_once('=') {
            Some((id, count)) => {
                let count = count
                    .trim()
                    .parse::<u32>()
                    .map_err(|err| format!("invalid count in '{entry}' ({err})"))?;
                (id.trim(), count)
            }
            None => (entry, 1),
        };
        if id.is_empty() {
            return Err(format!("missing component id in '{entry}'"));
        }
        let total = inventory.count(id).saturating_add(count);
        inventory.set(id, total);
    }
    Ok(inventory)
}

pub(crate) fn parse_augment(raw: &str) -> Result<Augment, String> {
    match Augment::parse(raw) {
        Augment::Other => Err(format!(
            "unknown augment '{raw}' (expected ap, ad, tank, reroll, fast8 or lose)"
        )),
        augment => Ok(augment),
    }
}
