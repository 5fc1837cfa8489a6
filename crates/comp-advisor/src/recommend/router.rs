use std::collections::BTreeSet;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::service::RecommendationService;
use crate::catalog::{CatalogSource, Inventory, SelectionState};

#[derive(Debug, Default, Deserialize)]
pub struct ComponentsRequest {
    #[serde(default)]
    pub components: Inventory,
}

#[derive(Debug, Default, Deserialize)]
pub struct ItemsRequest {
    #[serde(default)]
    pub items: BTreeSet<String>,
}

/// Catalog inspection and recommendation endpoints.
pub fn recommendation_router<S>(service: Arc<RecommendationService<S>>) -> Router
where
    S: CatalogSource + 'static,
{
    Router::new()
        .route("/api/v1/catalog", get(catalog_handler::<S>))
        .route("/api/v1/catalog/status", get(status_handler::<S>))
        .route("/api/v1/catalog/refresh", post(refresh_handler::<S>))
        .route("/api/v1/external", get(external_handler::<S>))
        .route("/api/v1/recommendations", post(blended_handler::<S>))
        .route(
            "/api/v1/recommendations/weighted",
            post(weighted_handler::<S>),
        )
        .route("/api/v1/recommendations/items", post(items_handler::<S>))
        .route("/api/v1/craftable", post(craftable_handler::<S>))
        .with_state(service)
}

pub(crate) async fn catalog_handler<S>(
    State(service): State<Arc<RecommendationService<S>>>,
) -> Response
where
    S: CatalogSource + 'static,
{
    let snapshot = service.snapshot();
    let payload = json!({
        "items": snapshot.items.items(),
        "compositions": snapshot.compositions,
        "loadedAt": snapshot.loaded_at,
    });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn status_handler<S>(
    State(service): State<Arc<RecommendationService<S>>>,
) -> Response
where
    S: CatalogSource + 'static,
{
    (StatusCode::OK, Json(service.status())).into_response()
}

pub(crate) async fn refresh_handler<S>(
    State(service): State<Arc<RecommendationService<S>>>,
) -> Response
where
    S: CatalogSource + 'static,
{
    let outcome = tokio::task::spawn_blocking(move || service.refresh()).await;
    match outcome {
        Ok(Ok(status)) => (StatusCode::OK, Json(status)).into_response(),
        Ok(Err(error)) => {
            warn!(%error, "catalog refresh failed");
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
        Err(join_error) => {
            let payload = json!({ "error": join_error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn external_handler<S>(
    State(service): State<Arc<RecommendationService<S>>>,
) -> Response
where
    S: CatalogSource + 'static,
{
    let snapshot = service.snapshot();
    let payload = json!({
        "updatedAt": snapshot.external_updated_at,
        "compositions": snapshot.external,
    });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn blended_handler<S>(
    State(service): State<Arc<RecommendationService<S>>>,
    Json(request): Json<ComponentsRequest>,
) -> Response
where
    S: CatalogSource + 'static,
{
    (StatusCode::OK, Json(service.blended(&request.components))).into_response()
}

pub(crate) async fn weighted_handler<S>(
    State(service): State<Arc<RecommendationService<S>>>,
    Json(selection): Json<SelectionState>,
) -> Response
where
    S: CatalogSource + 'static,
{
    (StatusCode::OK, Json(service.weighted(&selection))).into_response()
}

pub(crate) async fn items_handler<S>(
    State(service): State<Arc<RecommendationService<S>>>,
    Json(request): Json<ItemsRequest>,
) -> Response
where
    S: CatalogSource + 'static,
{
    (StatusCode::OK, Json(service.item_match(&request.items))).into_response()
}

pub(crate) async fn craftable_handler<S>(
    State(service): State<Arc<RecommendationService<S>>>,
    Json(request): Json<ComponentsRequest>,
) -> Response
where
    S: CatalogSource + 'static,
{
    (StatusCode::OK, Json(service.craftable(&request.components))).into_response()
}
