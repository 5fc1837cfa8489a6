use crate::commands::{
    run_catalog_status, run_craftable, run_recommend, CatalogArgs, CraftableArgs, RecommendArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use comp_advisor::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Composition Advisor",
    about = "Rank team compositions against the components and units you hold",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Rank compositions for a set of held components
    Recommend(RecommendArgs),
    /// List the items buildable from held components
    Craftable(CraftableArgs),
    /// Inspect the loaded catalog
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// Print item, composition and external record counts
    Status(CatalogArgs),
}

/// Overrides for the configured catalog files.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct DataArgs {
    /// Item definitions (JSON)
    #[arg(long)]
    pub(crate) items: Option<PathBuf>,
    /// Composition catalog (JSON)
    #[arg(long)]
    pub(crate) comps: Option<PathBuf>,
    /// External statistics export (JSON or CSV)
    #[arg(long)]
    pub(crate) external: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Recommend(args) => run_recommend(args),
        Command::Craftable(args) => run_craftable(args),
        Command::Catalog {
            command: CatalogCommand::Status(args),
        } => run_catalog_status(args),
    }
}
