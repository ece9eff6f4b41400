use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tracing::{error, info, warn};

use super::provider::{verify_schema, LinearRegressionModel, ModelLoadError, ModelProvider};

/// User-facing reason the predict action is disabled.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ModelUnavailable {
    pub message: String,
}

impl From<ModelLoadError> for ModelUnavailable {
    fn from(value: ModelLoadError) -> Self {
        Self {
            message: value.to_string(),
        }
    }
}

/// A model that loaded successfully, shared read-only by every request.
#[derive(Clone)]
pub struct LoadedModel {
    pub provider: Arc<dyn ModelProvider>,
    pub source: Option<PathBuf>,
    pub loaded_at: DateTime<Utc>,
}

impl fmt::Debug for LoadedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedModel")
            .field("source", &self.source)
            .field("loaded_at", &self.loaded_at)
            .finish_non_exhaustive()
    }
}

/// Result of the one-time model load. Failures are kept as values so the
/// form host can render an error state instead of exiting.
#[derive(Debug, Clone)]
pub enum ModelSlot {
    Ready(LoadedModel),
    Unavailable(ModelUnavailable),
}

static SHARED_MODEL: OnceLock<ModelSlot> = OnceLock::new();

impl ModelSlot {
    /// Process-wide model, loaded on first access. Later calls ignore `path`.
    pub fn shared(path: &Path) -> &'static ModelSlot {
        SHARED_MODEL.get_or_init(|| Self::load(path))
    }

    pub fn load(path: &Path) -> Self {
        match LinearRegressionModel::from_path(path) {
            Ok(model) => {
                info!(path = %path.display(), "house price model loaded");
                let mut slot = Self::from_provider(Arc::new(model));
                if let Self::Ready(loaded) = &mut slot {
                    loaded.source = Some(path.to_path_buf());
                }
                slot
            }
            Err(err) => {
                error!(path = %path.display(), error = %err, "house price model unavailable");
                Self::Unavailable(err.into())
            }
        }
    }

    pub fn from_provider(provider: Arc<dyn ModelProvider>) -> Self {
        if let Some(features) = provider.describe_features() {
            if let Err(err) = verify_schema(&features) {
                warn!(error = %err, "model schema differs from encoder column order");
            }
        }

        Self::Ready(LoadedModel {
            provider,
            source: None,
            loaded_at: Utc::now(),
        })
    }

    pub fn unavailable(reason: impl Into<ModelUnavailable>) -> Self {
        Self::Unavailable(reason.into())
    }

    pub fn provider(&self) -> Result<&Arc<dyn ModelProvider>, ModelUnavailable> {
        match self {
            Self::Ready(loaded) => Ok(&loaded.provider),
            Self::Unavailable(reason) => Err(reason.clone()),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn status(&self) -> ModelStatus {
        match self {
            Self::Ready(loaded) => ModelStatus {
                loaded: true,
                message: "Model loaded successfully".to_string(),
                source: loaded
                    .source
                    .as_ref()
                    .map(|path| path.display().to_string()),
                loaded_at: Some(loaded.loaded_at),
                features: loaded.provider.describe_features(),
            },
            Self::Unavailable(reason) => ModelStatus {
                loaded: false,
                message: reason.message.clone(),
                source: None,
                loaded_at: None,
                features: None,
            },
        }
    }
}

/// Diagnostic snapshot rendered in the side panel and `/api/v1/model`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelStatus {
    pub loaded: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
}
