use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::service::{PredictionError, PredictionService};
use super::validation::{validate_submission, ProfileSubmission};
use crate::error::AppError;
use crate::workflows::results::{
    available_states, region_counts, states_by_region, FilterState, PredictionSession,
    SortDirection, SortKey, SortState, PAGE_SIZE,
};

/// Shared state behind the prediction routes.
#[derive(Debug, Clone)]
pub struct PredictionRoutes {
    pub service: PredictionService,
    pub session: Arc<PredictionSession>,
}

/// Router builder exposing prediction submission and result browsing.
pub fn prediction_router(service: PredictionService, session: Arc<PredictionSession>) -> Router {
    let state = Arc::new(PredictionRoutes { service, session });
    Router::new()
        .route("/api/v1/predictions", post(submit_handler))
        .route("/api/v1/predictions/results", get(results_handler))
        .route("/api/v1/predictions/regions", get(regions_handler))
        .route("/api/v1/predictions/backend-health", get(backend_health_handler))
        .with_state(state)
}

pub(crate) async fn submit_handler(
    State(routes): State<Arc<PredictionRoutes>>,
    axum::Json(submission): axum::Json<ProfileSubmission>,
) -> Response {
    let profile = match validate_submission(&submission) {
        Ok(profile) => profile,
        Err(err) => return AppError::from(PredictionError::from(err)).into_response(),
    };

    let pending = routes.session.begin();
    let outcome = routes.service.predict_profile(&profile).await;
    pending.complete(outcome.clone());

    (StatusCode::OK, axum::Json(outcome)).into_response()
}

/// Query string accepted by the results route.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResultsQuery {
    pub region: Option<String>,
    pub state: Option<String>,
    pub sort: Option<SortKey>,
    pub direction: Option<SortDirection>,
    pub page: Option<usize>,
}

impl ResultsQuery {
    fn filter(&self) -> FilterState {
        FilterState::new(self.region.clone(), self.state.clone())
    }

    fn sort(&self) -> SortState {
        SortState::new(
            self.sort.unwrap_or_default(),
            self.direction.unwrap_or_default(),
        )
    }
}

pub(crate) async fn results_handler(
    State(routes): State<Arc<PredictionRoutes>>,
    Query(query): Query<ResultsQuery>,
) -> Response {
    let filter = query.filter();
    let page = query.page.unwrap_or(1);
    routes
        .session
        .with_view(&filter, query.sort(), page, PAGE_SIZE, |view| {
            (StatusCode::OK, axum::Json(view)).into_response()
        })
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegionsQuery {
    pub region: Option<String>,
}

pub(crate) async fn regions_handler(
    State(routes): State<Arc<PredictionRoutes>>,
    Query(query): Query<RegionsQuery>,
) -> Response {
    let records = routes.session.records();
    let filter = FilterState::new(query.region, None);
    let payload = json!({
        "states_by_region": states_by_region(&records),
        "region_counts": region_counts(&records),
        "available_states": available_states(&records, &filter),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn backend_health_handler(
    State(routes): State<Arc<PredictionRoutes>>,
) -> Response {
    let healthy = routes.service.backend_healthy().await;
    (StatusCode::OK, axum::Json(json!({ "healthy": healthy }))).into_response()
}
