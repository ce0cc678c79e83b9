use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use college_predictor::config::AppConfig;
use college_predictor::error::AppError;
use college_predictor::workflows::prediction::{
    Catalogue, HttpPredictionBackend, OfflineBackend, PredictionBackend, PredictionService,
    ScoringEngine,
};
use college_predictor::workflows::selection::{JsonFilePersistence, SelectionStore};
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Which backend the prediction service should talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BackendMode {
    Configured,
    Offline,
}

pub(crate) fn build_backend(config: &AppConfig, mode: BackendMode) -> Arc<dyn PredictionBackend> {
    let base_url = match (mode, config.predictor.base_url.as_deref()) {
        (BackendMode::Configured, Some(base_url)) => base_url,
        _ => {
            info!("remote prediction service disabled, using local catalogue only");
            return Arc::new(OfflineBackend);
        }
    };

    match HttpPredictionBackend::new(base_url, config.predictor.timeout()) {
        Ok(backend) => {
            info!(base_url = backend.base_url(), "remote prediction service configured");
            Arc::new(backend)
        }
        Err(err) => {
            warn!(error = %err, "could not build prediction client, using local catalogue only");
            Arc::new(OfflineBackend)
        }
    }
}

pub(crate) fn load_catalogue(config: &AppConfig) -> Result<Catalogue, AppError> {
    match &config.storage.catalogue_csv {
        Some(path) => {
            let catalogue = Catalogue::from_path(path)?;
            info!(path = %path.display(), offerings = catalogue.len(), "loaded catalogue");
            Ok(catalogue)
        }
        None => Ok(Catalogue::builtin()),
    }
}

pub(crate) fn build_prediction_service(
    config: &AppConfig,
    mode: BackendMode,
) -> Result<PredictionService, AppError> {
    Ok(PredictionService::new(
        build_backend(config, mode),
        ScoringEngine::from_config(&config.scoring),
        load_catalogue(config)?,
    ))
}

pub(crate) fn open_selection_store(config: &AppConfig) -> SelectionStore<JsonFilePersistence> {
    SelectionStore::load(JsonFilePersistence::new(&config.storage.selection_path))
}
