use crate::cli::ServeArgs;
use crate::infra::{build_prediction_service, open_selection_store, AppState, BackendMode};
use crate::routes::with_predictor_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use college_predictor::config::AppConfig;
use college_predictor::error::AppError;
use college_predictor::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

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

    let mode = if args.offline {
        BackendMode::Offline
    } else {
        BackendMode::Configured
    };
    let service = build_prediction_service(&config, mode)?;
    let store = open_selection_store(&config);

    let app = with_predictor_routes(service, store)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "college predictor ready");

    axum::serve(listener, app).await?;
    Ok(())
}
