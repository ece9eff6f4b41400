use house_price::config::AppConfig;
use house_price::error::AppError;
use house_price::estimator::FurnishingStatus;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) model_loaded: bool,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// An explicit `--model-path` wins over `APP_MODEL_PATH` and the default.
pub(crate) fn resolve_model_path(override_path: Option<PathBuf>) -> Result<PathBuf, AppError> {
    match override_path {
        Some(path) => Ok(path),
        None => Ok(AppConfig::load()?.model.path),
    }
}

pub(crate) fn parse_furnishing(raw: &str) -> Result<FurnishingStatus, String> {
    raw.parse::<FurnishingStatus>().map_err(|_| {
        let choices: Vec<&str> = FurnishingStatus::ordered()
            .into_iter()
            .map(FurnishingStatus::label)
            .collect();
        format!("'{raw}' is not one of {}", choices.join(", "))
    })
}
