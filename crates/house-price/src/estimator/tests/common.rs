use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::estimator::domain::{FeatureRecord, FurnishingStatus, RawInput, FEATURE_NAMES};
use crate::estimator::provider::{InferenceError, ModelProvider};
use crate::estimator::registry::{ModelSlot, ModelUnavailable};
use crate::estimator::router::estimator_router;
use crate::estimator::service::PriceEstimator;

const BODY_LIMIT: usize = 64 * 1024;

/// Provider returning a fixed prediction and advertising the encoder's schema.
pub(super) struct FixedProvider(pub(super) f64);

impl ModelProvider for FixedProvider {
    fn predict(&self, _features: &FeatureRecord) -> Result<f64, InferenceError> {
        Ok(self.0)
    }

    fn describe_features(&self) -> Option<Vec<String>> {
        Some(FEATURE_NAMES.iter().map(|name| name.to_string()).collect())
    }
}

pub(super) struct MismatchedProvider;

impl ModelProvider for MismatchedProvider {
    fn predict(&self, _features: &FeatureRecord) -> Result<f64, InferenceError> {
        Err(InferenceError::FeatureCountMismatch {
            expected: 13,
            actual: 12,
        })
    }
}

pub(super) fn sample_input() -> RawInput {
    RawInput {
        area: 1500.0,
        bedrooms: 3,
        bathrooms: 2.0,
        stories: 2,
        mainroad: "Yes".to_string(),
        guestroom: "No".to_string(),
        basement: "No".to_string(),
        hotwaterheating: "No".to_string(),
        airconditioning: "Yes".to_string(),
        parking: 2,
        prefarea: "No".to_string(),
        furnishing_status: FurnishingStatus::Semi,
    }
}

pub(super) const SAMPLE_FORM: &str = "area=1500&bedrooms=3&bathrooms=2.0&stories=2\
&mainroad=Yes&guestroom=No&basement=No&hotwaterheating=No&airconditioning=Yes\
&parking=2&prefarea=No&furnishing_status=Semi";

pub(super) fn estimator_with(provider: impl ModelProvider + 'static) -> Arc<PriceEstimator> {
    Arc::new(PriceEstimator::new(ModelSlot::from_provider(Arc::new(
        provider,
    ))))
}

pub(super) fn unavailable_estimator() -> Arc<PriceEstimator> {
    Arc::new(PriceEstimator::new(ModelSlot::unavailable(ModelUnavailable {
        message: "Model file 'Model/house_price_model.json' not found.".to_string(),
    })))
}

pub(super) fn router_with(provider: impl ModelProvider + 'static) -> axum::Router {
    estimator_router(estimator_with(provider))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 payload")
}
