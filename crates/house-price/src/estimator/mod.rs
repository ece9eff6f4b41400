//! House price estimation: form inputs are encoded into the model's training
//! columns, scored by the loaded model, and bucketed into an advisory tier.

pub mod classifier;
pub mod domain;
pub mod encoder;
pub mod form;
pub mod provider;
pub mod registry;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use classifier::{classify, AdvisorySeverity, Classification, PriceTier};
pub use domain::{
    FeatureRecord, FormFields, FurnishingStatus, InputError, RawInput, FEATURE_COUNT,
    FEATURE_NAMES, NO, YES,
};
pub use encoder::encode;
pub use form::{format_currency, FormOutcome, FormPage};
pub use provider::{
    verify_schema, InferenceError, LinearModelArtifact, LinearRegressionModel, ModelLoadError,
    ModelProvider,
};
pub use registry::{LoadedModel, ModelSlot, ModelStatus, ModelUnavailable};
pub use router::estimator_router;
pub use service::{EstimateError, EstimateView, PriceEstimate, PriceEstimator, INFERENCE_HINT};
