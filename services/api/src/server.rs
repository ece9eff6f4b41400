use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_estimator_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use house_price::config::AppConfig;
use house_price::error::AppError;
use house_price::estimator::{ModelSlot, PriceEstimator};
use house_price::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(model_path) = args.model_path.take() {
        config.model.path = model_path;
    }

    telemetry::init(&config.telemetry)?;

    let slot = ModelSlot::shared(&config.model.path).clone();
    let model_loaded = slot.is_ready();
    if !model_loaded {
        warn!(path = %config.model.path.display(), "serving form without a model; predictions disabled");
    }
    let estimator = Arc::new(PriceEstimator::new(slot));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        model_loaded,
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_estimator_routes(estimator)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, model_loaded, "house price form host ready");

    axum::serve(listener, app).await?;
    Ok(())
}
