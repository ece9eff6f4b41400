use serde::{Deserialize, Serialize};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use super::domain::{FeatureRecord, FEATURE_COUNT, FEATURE_NAMES};

/// Artifact tag accepted by [`LinearRegressionModel`].
pub const LINEAR_REGRESSION: &str = "linear_regression";

/// Inference seam so the estimator can run against the shipped artifact or a stub.
pub trait ModelProvider: Send + Sync {
    fn predict(&self, features: &FeatureRecord) -> Result<f64, InferenceError>;

    /// Column names the model was trained on, when the backend records them.
    fn describe_features(&self) -> Option<Vec<String>> {
        None
    }
}

/// Failure to bring the model artifact into memory at startup.
#[derive(Debug, thiserror::Error)]
pub enum ModelLoadError {
    #[error(
        "Model file '{}' not found. Please ensure the file is in the configured location.",
        .path.display()
    )]
    NotFound { path: PathBuf },
    #[error("Error loading model: unable to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Error loading model: {source}")]
    Deserialize {
        #[source]
        source: serde_json::Error,
    },
    #[error("Error loading model: {0}")]
    Invalid(String),
}

/// Failure raised while scoring a single feature record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InferenceError {
    #[error("model expects {expected} features but received {actual}")]
    FeatureCountMismatch { expected: usize, actual: usize },
    #[error("feature {position} should be '{expected}' but the encoder produced '{actual}'")]
    FeatureOrderMismatch {
        position: usize,
        expected: String,
        actual: String,
    },
    #[error("model produced a non-finite prediction ({0})")]
    NonFinite(f64),
    #[error("model backend failed: {0}")]
    Backend(String),
}

/// Compare a model's reported training columns against the encoder's order.
pub fn verify_schema(expected: &[String]) -> Result<(), InferenceError> {
    if expected.len() != FEATURE_COUNT {
        return Err(InferenceError::FeatureCountMismatch {
            expected: expected.len(),
            actual: FEATURE_COUNT,
        });
    }

    for (position, (trained, produced)) in expected.iter().zip(FEATURE_NAMES).enumerate() {
        if trained != produced {
            return Err(InferenceError::FeatureOrderMismatch {
                position,
                expected: trained.clone(),
                actual: produced.to_string(),
            });
        }
    }

    Ok(())
}

/// On-disk JSON export of a fitted linear regression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModelArtifact {
    pub model_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names_in: Option<Vec<String>>,
    pub coef: Vec<f64>,
    pub intercept: f64,
}

/// Ordinary least squares model evaluated as `intercept + coef · x`.
#[derive(Debug, Clone)]
pub struct LinearRegressionModel {
    feature_names: Option<Vec<String>>,
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearRegressionModel {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ModelLoadError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ModelLoadError::NotFound {
                path: path.to_path_buf(),
            },
            _ => ModelLoadError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;
        Self::from_reader(io::BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ModelLoadError> {
        let artifact: LinearModelArtifact = serde_json::from_reader(reader)
            .map_err(|source| ModelLoadError::Deserialize { source })?;
        Self::from_artifact(artifact)
    }

    pub fn from_artifact(artifact: LinearModelArtifact) -> Result<Self, ModelLoadError> {
        let LinearModelArtifact {
            model_type,
            feature_names_in,
            coef,
            intercept,
        } = artifact;

        if model_type != LINEAR_REGRESSION {
            return Err(ModelLoadError::Invalid(format!(
                "unsupported model_type '{model_type}', expected '{LINEAR_REGRESSION}'"
            )));
        }
        if coef.is_empty() {
            return Err(ModelLoadError::Invalid(
                "artifact carries no coefficients".to_string(),
            ));
        }
        if let Some(names) = &feature_names_in {
            if names.len() != coef.len() {
                return Err(ModelLoadError::Invalid(format!(
                    "{} feature names but {} coefficients",
                    names.len(),
                    coef.len()
                )));
            }
        }
        if !intercept.is_finite() || coef.iter().any(|value| !value.is_finite()) {
            return Err(ModelLoadError::Invalid(
                "coefficients must be finite numbers".to_string(),
            ));
        }

        Ok(Self {
            feature_names: feature_names_in,
            coefficients: coef,
            intercept,
        })
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl ModelProvider for LinearRegressionModel {
    fn predict(&self, features: &FeatureRecord) -> Result<f64, InferenceError> {
        if let Some(names) = &self.feature_names {
            verify_schema(names)?;
        }

        let values = features.values();
        if self.coefficients.len() != values.len() {
            return Err(InferenceError::FeatureCountMismatch {
                expected: self.coefficients.len(),
                actual: values.len(),
            });
        }

        let prediction = self
            .coefficients
            .iter()
            .zip(values)
            .fold(self.intercept, |acc, (weight, value)| acc + weight * value);

        if prediction.is_finite() {
            Ok(prediction)
        } else {
            Err(InferenceError::NonFinite(prediction))
        }
    }

    fn describe_features(&self) -> Option<Vec<String>> {
        self.feature_names.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::domain::RawInput;
    use crate::estimator::encoder::encode;
    use std::io::Cursor;

    fn names() -> Vec<String> {
        FEATURE_NAMES.iter().map(|name| name.to_string()).collect()
    }

    fn artifact() -> LinearModelArtifact {
        LinearModelArtifact {
            model_type: LINEAR_REGRESSION.to_string(),
            feature_names_in: Some(names()),
            coef: vec![100.0, 10_000.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            intercept: 50_000.0,
        }
    }

    #[test]
    fn predicts_intercept_plus_weighted_sum() {
        let model = LinearRegressionModel::from_artifact(artifact()).expect("artifact valid");
        let prediction = model
            .predict(&encode(&RawInput::default()))
            .expect("prediction succeeds");
        assert_eq!(prediction, 50_000.0 + 100.0 * 1500.0 + 10_000.0 * 3.0);
    }

    #[test]
    fn reports_trained_feature_names() {
        let model = LinearRegressionModel::from_artifact(artifact()).expect("artifact valid");
        assert_eq!(model.describe_features(), Some(names()));

        let anonymous = LinearRegressionModel::from_artifact(LinearModelArtifact {
            feature_names_in: None,
            ..artifact()
        })
        .expect("names are optional");
        assert_eq!(anonymous.describe_features(), None);
    }

    #[test]
    fn reordered_training_columns_fail_inference() {
        let mut swapped = names();
        swapped.swap(4, 5);
        let model = LinearRegressionModel::from_artifact(LinearModelArtifact {
            feature_names_in: Some(swapped),
            ..artifact()
        })
        .expect("artifact itself is consistent");

        let err = model
            .predict(&encode(&RawInput::default()))
            .expect_err("schema differs from encoder order");
        assert_eq!(
            err,
            InferenceError::FeatureOrderMismatch {
                position: 4,
                expected: "guestroom".to_string(),
                actual: "mainroad".to_string(),
            }
        );
    }

    #[test]
    fn shorter_models_report_count_mismatch() {
        let model = LinearRegressionModel::from_artifact(LinearModelArtifact {
            feature_names_in: None,
            coef: vec![1.0; 11],
            ..artifact()
        })
        .expect("artifact itself is consistent");

        let err = model
            .predict(&encode(&RawInput::default()))
            .expect_err("eleven coefficients cannot score twelve features");
        assert_eq!(
            err,
            InferenceError::FeatureCountMismatch {
                expected: 11,
                actual: 12
            }
        );
    }

    #[test]
    fn missing_file_is_reported_as_not_found() {
        let err = LinearRegressionModel::from_path("does/not/exist/house_price_model.json")
            .expect_err("file is absent");
        assert!(matches!(err, ModelLoadError::NotFound { .. }));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn malformed_json_is_a_deserialize_error() {
        let err = LinearRegressionModel::from_reader(Cursor::new(b"{\"coef\": [1.0".to_vec()))
            .expect_err("truncated artifact");
        assert!(matches!(err, ModelLoadError::Deserialize { .. }));
        assert!(err.to_string().starts_with("Error loading model"));
    }

    #[test]
    fn artifact_validation_rejects_inconsistent_exports() {
        let wrong_type = LinearModelArtifact {
            model_type: "random_forest".to_string(),
            ..artifact()
        };
        assert!(matches!(
            LinearRegressionModel::from_artifact(wrong_type),
            Err(ModelLoadError::Invalid(_))
        ));

        let mismatched = LinearModelArtifact {
            coef: vec![1.0; 3],
            ..artifact()
        };
        assert!(matches!(
            LinearRegressionModel::from_artifact(mismatched),
            Err(ModelLoadError::Invalid(_))
        ));
    }

    #[test]
    fn reads_artifact_from_json() {
        let json = serde_json::to_vec(&artifact()).expect("artifact serializes");
        let model = LinearRegressionModel::from_reader(Cursor::new(json)).expect("loads");
        assert_eq!(model.coefficients().len(), FEATURE_COUNT);
        assert_eq!(model.intercept(), 50_000.0);
    }
}
