use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use comp_advisor::catalog::CatalogSource;
use comp_advisor::recommend::{recommendation_router, RecommendationService};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_recommendation_routes<S>(service: Arc<RecommendationService<S>>) -> axum::Router
where
    S: CatalogSource + 'static,
{
    recommendation_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "loading catalog" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use comp_advisor::catalog::{
        CatalogLoadError, CatalogSnapshot, Composition, Item, ItemType, Recipe, TierTable,
    };
    use comp_advisor::engine::Ranker;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    struct FixedSource;

    impl CatalogSource for FixedSource {
        fn load(&self) -> Result<CatalogSnapshot, CatalogLoadError> {
            let items = vec![
                Item {
                    id: "bf".to_string(),
                    name: "B.F. Sword".to_string(),
                    item_type: ItemType::Ad,
                    recipe: None,
                },
                Item {
                    id: "deathblade".to_string(),
                    name: "Deathblade".to_string(),
                    item_type: ItemType::Ad,
                    recipe: Some(Recipe::new("bf", "bf")),
                },
            ];
            let compositions: Vec<Composition> = serde_json::from_value(json!([
                { "id": "blade", "name": "Bladestorm", "bisItems": ["deathblade"] }
            ]))
            .expect("fixture compositions");
            Ok(CatalogSnapshot::new(items, compositions, TierTable::default()))
        }
    }

    fn app(ready: bool) -> axum::Router {
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        let service = Arc::new(
            RecommendationService::new(FixedSource, Ranker::default(), 5).expect("fixture loads"),
        );
        with_recommendation_routes(service).layer(Extension(state))
    }

    #[tokio::test]
    async fn readiness_reflects_flag() {
        let response = app(false)
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = app(true)
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn recommendation_routes_are_mounted() {
        let response = app(true)
            .oneshot(
                Request::post("/api/v1/craftable")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"components":{"bf":2}}"#))
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("read body");
        let body: serde_json::Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(body["crafted"][0]["id"], "deathblade");
        assert_eq!(body["remaining"]["bf"], 0);
    }

    #[tokio::test]
    async fn healthcheck_is_static() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }
}
