use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use college_predictor::workflows::prediction::{prediction_router, PredictionService};
use college_predictor::workflows::results::PredictionSession;
use college_predictor::workflows::selection::{
    selection_router, SelectionPersistence, SelectionRoutes, SelectionStore,
};
use serde_json::json;
use std::sync::{Arc, Mutex};

pub(crate) fn with_predictor_routes<P>(
    service: PredictionService,
    store: SelectionStore<P>,
) -> axum::Router
where
    P: SelectionPersistence + 'static,
{
    let session = Arc::new(PredictionSession::new());
    let selection = Arc::new(SelectionRoutes {
        store: Arc::new(Mutex::new(store)),
        session: session.clone(),
        service: service.clone(),
    });

    prediction_router(service, session)
        .merge(selection_router(selection))
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
        json!({ "status": "initializing" })
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
