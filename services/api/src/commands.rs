use crate::cli::DataArgs;
use crate::infra::{parse_augment, parse_components};
use clap::{Args, ValueEnum};
use comp_advisor::catalog::{
    Augment, CatalogSource, CatalogStatus, FileCatalogSource, Inventory, SelectionState,
};
use comp_advisor::config::AppConfig;
use comp_advisor::engine::{Allocation, Ranker};
use comp_advisor::error::AppError;
use comp_advisor::recommend::{RecommendationList, RecommendationService};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ScoringModel {
    /// BIS craftability blended with external win rate
    Blended,
    /// Bonuses for BIS, items, units, tier and augments
    Weighted,
    /// Finished items matched against BIS lists
    Items,
}

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    /// Held components, e.g. `bf=1,tear=2`
    #[arg(long, value_parser = parse_components, default_value = "")]
    pub(crate) components: Inventory,
    /// Units already on the board (weighted model)
    #[arg(long, value_delimiter = ',')]
    pub(crate) units: Vec<String>,
    /// Units other players are building (weighted model)
    #[arg(long, value_delimiter = ',')]
    pub(crate) contested: Vec<String>,
    /// Chosen augments: ap, ad, tank, reroll, fast8, lose (weighted model)
    #[arg(long, value_delimiter = ',', value_parser = parse_augment)]
    pub(crate) augments: Vec<Augment>,
    /// Finished item ids held (items model)
    #[arg(long = "owned", value_delimiter = ',')]
    pub(crate) owned: Vec<String>,
    #[arg(long, value_enum, default_value_t = ScoringModel::Blended)]
    pub(crate) model: ScoringModel,
    /// Number of compositions to print (defaults to APP_TOP_N)
    #[arg(long)]
    pub(crate) top: Option<usize>,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

#[derive(Args, Debug)]
pub(crate) struct CraftableArgs {
    /// Held components, e.g. `bf=1,tear=2`
    #[arg(long, value_parser = parse_components)]
    pub(crate) components: Inventory,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

#[derive(Args, Debug)]
pub(crate) struct CatalogArgs {
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

pub(crate) fn load_config(data: &DataArgs) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::load()?;
    if let Some(items) = &data.items {
        config.catalog.items_path = items.clone();
    }
    if let Some(comps) = &data.comps {
        config.catalog.comps_path = comps.clone();
    }
    if let Some(external) = &data.external {
        config.catalog.external_path = external.clone();
    }
    Ok(config)
}

pub(crate) fn build_service(
    config: &AppConfig,
    top_n: Option<usize>,
) -> Result<RecommendationService<FileCatalogSource>, AppError> {
    let source = FileCatalogSource::from_config(&config.catalog);
    let snapshot = source.load()?;
    let top_n = top_n.filter(|n| *n > 0).unwrap_or(config.catalog.top_n);
    Ok(RecommendationService::with_snapshot(
        source,
        snapshot,
        Ranker::default(),
        top_n,
    ))
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let config = load_config(&args.data)?;
    let service = build_service(&config, args.top)?;

    let output = match args.model {
        ScoringModel::Blended => render_recommendations(&service.blended(&args.components)),
        ScoringModel::Weighted => {
            let selection = SelectionState {
                selected_components: args.components,
                selected_units: flags(&args.units),
                contested_units: flags(&args.contested),
                augments: args.augments.into_iter().collect(),
            };
            render_recommendations(&service.weighted(&selection))
        }
        ScoringModel::Items => {
            let owned = args.owned.into_iter().collect();
            render_recommendations(&service.item_match(&owned))
        }
    };

    print!("{output}");
    Ok(())
}

pub(crate) fn run_craftable(args: CraftableArgs) -> Result<(), AppError> {
    let config = load_config(&args.data)?;
    let service = build_service(&config, None)?;
    print!("{}", render_allocation(&service.craftable(&args.components)));
    Ok(())
}

pub(crate) fn run_catalog_status(args: CatalogArgs) -> Result<(), AppError> {
    let config = load_config(&args.data)?;
    let service = build_service(&config, None)?;
    print!("{}", render_status(&service.status()));
    Ok(())
}

fn flags(units: &[String]) -> BTreeMap<String, bool> {
    units.iter().map(|unit| (unit.clone(), true)).collect()
}

fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{score:.0}")
    } else {
        format!("{score:.1}")
    }
}

pub(crate) fn render_recommendations<S>(list: &RecommendationList<S>) -> String {
    let mut out = format!(
        "Top {} of {} compositions ({} model)\n",
        list.recommendations.len(),
        list.ranked,
        list.model
    );
    if list.recommendations.is_empty() {
        out.push_str("No compositions in the catalog.\n");
        return out;
    }

    for view in &list.recommendations {
        let winrate = view
            .winrate
            .map(|value| format!("{value:.1}%"))
            .unwrap_or_else(|| "n/a".to_string());
        out.push_str(&format!(
            "{:>2}. {} [{}] score {} ({}) | win rate {}\n",
            view.rank,
            view.name,
            view.tier_label,
            format_score(view.score),
            view.band_label,
            winrate
        ));
        for line in &view.trace {
            out.push_str(&format!("      {}\n", line.trim_start()));
        }
    }
    out
}

pub(crate) fn render_allocation(allocation: &Allocation) -> String {
    let mut out = String::new();
    if allocation.crafted.is_empty() {
        out.push_str("Nothing craftable from these components.\n");
    } else {
        out.push_str("Craftable items:\n");
        for craft in &allocation.crafted {
            out.push_str(&format!(
                "- {} ({} + {})\n",
                craft.name,
                craft.used_components.first(),
                craft.used_components.second()
            ));
        }
    }

    let leftover: Vec<String> = allocation
        .remaining
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|(id, count)| format!("{id}={count}"))
        .collect();
    if !leftover.is_empty() {
        out.push_str(&format!("Remaining components: {}\n", leftover.join(", ")));
    }
    out
}

pub(crate) fn render_status(status: &CatalogStatus) -> String {
    let external_updated = status
        .external_updated_at
        .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "never".to_string());
    format!(
        "Catalog status\n- {} items\n- {} compositions\n- {} external compositions (updated {})\n- loaded at {}\n",
        status.items,
        status.compositions,
        status.external_compositions,
        external_updated,
        status.loaded_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}
