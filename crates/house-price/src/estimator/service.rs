use serde::Serialize;
use tracing::{info, warn};

use super::classifier::{classify, AdvisorySeverity, Classification, PriceTier};
use super::domain::{FeatureRecord, RawInput, FEATURE_NAMES};
use super::encoder::encode;
use super::provider::InferenceError;
use super::registry::{ModelSlot, ModelStatus, ModelUnavailable};

/// Hint shown next to inference failures.
pub const INFERENCE_HINT: &str =
    "Please check that your model expects the same feature names and data types.";

/// Runs encode → predict → classify against the loaded model.
#[derive(Debug, Clone)]
pub struct PriceEstimator {
    slot: ModelSlot,
}

impl PriceEstimator {
    pub fn new(slot: ModelSlot) -> Self {
        Self { slot }
    }

    pub fn is_ready(&self) -> bool {
        self.slot.is_ready()
    }

    pub fn model_status(&self) -> ModelStatus {
        self.slot.status()
    }

    /// Estimate a price for an already validated submission.
    pub fn estimate(&self, raw: &RawInput) -> Result<PriceEstimate, EstimateError> {
        let provider = self.slot.provider()?;
        let features = encode(raw);

        let prediction = provider.predict(&features).map_err(|err| {
            warn!(error = %err, "inference failed");
            err
        })?;
        let classification = classify(prediction);

        info!(
            prediction,
            tier = classification.tier.label(),
            "estimate complete"
        );

        Ok(PriceEstimate {
            features,
            prediction,
            classification,
        })
    }
}

/// Everything the form host needs to render one result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceEstimate {
    pub features: FeatureRecord,
    pub prediction: f64,
    pub classification: Classification,
}

impl PriceEstimate {
    pub fn tier(&self) -> PriceTier {
        self.classification.tier
    }

    pub fn band(&self) -> f64 {
        self.classification.band
    }

    pub fn view(&self) -> EstimateView {
        let tier = self.tier();
        EstimateView {
            prediction: self.prediction,
            band: self.band(),
            tier,
            tier_label: tier.label(),
            advisory: tier.advisory(),
            severity: tier.severity(),
            features: self.features,
            feature_order: FEATURE_NAMES.to_vec(),
        }
    }
}

/// JSON body returned by the estimate endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct EstimateView {
    pub prediction: f64,
    pub band: f64,
    pub tier: PriceTier,
    pub tier_label: &'static str,
    pub advisory: &'static str,
    pub severity: AdvisorySeverity,
    pub features: FeatureRecord,
    pub feature_order: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EstimateError {
    #[error(transparent)]
    ModelUnavailable(#[from] ModelUnavailable),
    #[error("Error making prediction: {0}")]
    Inference(#[from] InferenceError),
}
