use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Router,
};
use serde::{Deserialize, Serialize};

use super::compare::comparison_table;
use super::domain::SelectionEntry;
use super::persistence::SelectionPersistence;
use super::store::{MutationOutcome, SelectionError, SelectionStore, COMPARE_CAPACITY};
use crate::error::AppError;
use crate::workflows::prediction::PredictionService;
use crate::workflows::results::PredictionSession;

/// Shared state behind the selection routes. Entries are resolved from the
/// latest prediction run first and the catalogue second.
#[derive(Debug)]
pub struct SelectionRoutes<P> {
    pub store: Arc<Mutex<SelectionStore<P>>>,
    pub session: Arc<PredictionSession>,
    pub service: PredictionService,
}

impl<P: SelectionPersistence> SelectionRoutes<P> {
    fn store(&self) -> MutexGuard<'_, SelectionStore<P>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn resolve(&self, id: &str) -> Result<SelectionEntry, SelectionError> {
        if let Some(record) = self
            .session
            .records()
            .iter()
            .find(|record| record.id == id)
        {
            return Ok(SelectionEntry::from(record));
        }
        self.service
            .catalogue()
            .find(id)
            .map(SelectionEntry::from)
            .ok_or_else(|| SelectionError::UnknownOffering(id.to_string()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectionRequest {
    pub id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectionView {
    pub favorites: Vec<SelectionEntry>,
    pub compare: Vec<SelectionEntry>,
    pub compare_capacity: usize,
    pub compare_full: bool,
}

impl SelectionView {
    fn of<P: SelectionPersistence>(store: &SelectionStore<P>) -> Self {
        Self {
            favorites: store.favorites().to_vec(),
            compare: store.compare_list().to_vec(),
            compare_capacity: COMPARE_CAPACITY,
            compare_full: store.compare_list().len() >= COMPARE_CAPACITY,
        }
    }
}

fn respond(outcome: MutationOutcome, view: SelectionView) -> Response {
    let status = match outcome {
        MutationOutcome::Changed => StatusCode::CREATED,
        MutationOutcome::Unchanged => StatusCode::OK,
    };
    (status, axum::Json(view)).into_response()
}

/// Router builder exposing favorites and the comparison shortlist.
pub fn selection_router<P>(routes: Arc<SelectionRoutes<P>>) -> Router
where
    P: SelectionPersistence + 'static,
{
    Router::new()
        .route("/api/v1/selection", get(list_handler::<P>))
        .route(
            "/api/v1/selection/favorites",
            axum::routing::post(add_favorite_handler::<P>),
        )
        .route(
            "/api/v1/selection/favorites/:id",
            delete(remove_favorite_handler::<P>),
        )
        .route(
            "/api/v1/selection/compare",
            axum::routing::post(add_compare_handler::<P>).delete(clear_compare_handler::<P>),
        )
        .route(
            "/api/v1/selection/compare/:id",
            delete(remove_compare_handler::<P>),
        )
        .route(
            "/api/v1/selection/compare/table",
            get(compare_table_handler::<P>),
        )
        .with_state(routes)
}

pub(crate) async fn list_handler<P>(State(routes): State<Arc<SelectionRoutes<P>>>) -> Response
where
    P: SelectionPersistence + 'static,
{
    let view = SelectionView::of(&routes.store());
    (StatusCode::OK, axum::Json(view)).into_response()
}

pub(crate) async fn add_favorite_handler<P>(
    State(routes): State<Arc<SelectionRoutes<P>>>,
    axum::Json(request): axum::Json<SelectionRequest>,
) -> Response
where
    P: SelectionPersistence + 'static,
{
    let entry = match routes.resolve(&request.id) {
        Ok(entry) => entry,
        Err(err) => return AppError::from(err).into_response(),
    };
    let mut store = routes.store();
    let outcome = store.add_favorite(entry);
    respond(outcome, SelectionView::of(&store))
}

pub(crate) async fn remove_favorite_handler<P>(
    State(routes): State<Arc<SelectionRoutes<P>>>,
    Path(id): Path<String>,
) -> Response
where
    P: SelectionPersistence + 'static,
{
    let mut store = routes.store();
    store.remove_favorite(&id);
    (StatusCode::OK, axum::Json(SelectionView::of(&store))).into_response()
}

pub(crate) async fn add_compare_handler<P>(
    State(routes): State<Arc<SelectionRoutes<P>>>,
    axum::Json(request): axum::Json<SelectionRequest>,
) -> Response
where
    P: SelectionPersistence + 'static,
{
    let entry = match routes.resolve(&request.id) {
        Ok(entry) => entry,
        Err(err) => return AppError::from(err).into_response(),
    };
    let mut store = routes.store();
    match store.add_to_compare(entry) {
        Ok(outcome) => respond(outcome, SelectionView::of(&store)),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn remove_compare_handler<P>(
    State(routes): State<Arc<SelectionRoutes<P>>>,
    Path(id): Path<String>,
) -> Response
where
    P: SelectionPersistence + 'static,
{
    let mut store = routes.store();
    store.remove_from_compare(&id);
    (StatusCode::OK, axum::Json(SelectionView::of(&store))).into_response()
}

pub(crate) async fn clear_compare_handler<P>(
    State(routes): State<Arc<SelectionRoutes<P>>>,
) -> Response
where
    P: SelectionPersistence + 'static,
{
    let mut store = routes.store();
    store.clear_compare();
    (StatusCode::OK, axum::Json(SelectionView::of(&store))).into_response()
}

pub(crate) async fn compare_table_handler<P>(
    State(routes): State<Arc<SelectionRoutes<P>>>,
) -> Response
where
    P: SelectionPersistence + 'static,
{
    let table = comparison_table(routes.store().compare_list());
    (StatusCode::OK, axum::Json(table)).into_response()
}
