use crate::cli::ServeArgs;
use crate::commands::load_config;
use crate::infra::AppState;
use crate::routes::with_recommendation_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use comp_advisor::catalog::FileCatalogSource;
use comp_advisor::engine::Ranker;
use comp_advisor::error::AppError;
use comp_advisor::recommend::RecommendationService;
use comp_advisor::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = load_config(&args.data)?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let source = FileCatalogSource::from_config(&config.catalog);
    let service = Arc::new(RecommendationService::new(
        source,
        Ranker::default(),
        config.catalog.top_n,
    )?);
    let status = service.status();
    info!(
        items = status.items,
        compositions = status.compositions,
        external = status.external_compositions,
        "catalog loaded"
    );

    let app = with_recommendation_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "composition advisor ready");

    axum::serve(listener, app).await?;
    Ok(())
}
