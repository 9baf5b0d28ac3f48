use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use super::error::PredictorError;
use super::utils::{sigmoid, softmax};
use crate::models::ModelSlot;

/// On-disk artifact schema, one JSON document per model slot, exported by the
/// offline training pipeline from the fitted standardizer and
/// logistic-regression estimator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactFile {
    pub tag: ModelSlot,
    pub features: Vec<String>,
    pub classes: Vec<String>,
    pub scaler: ScalerParams,
    /// One coefficient row per class; a single row is accepted for
    /// two-class artifacts (sigmoid parameterization).
    pub coefficients: Vec<Vec<f32>>,
    pub intercepts: Vec<f32>,
}

/// Per-feature standardization statistics of the fitted scaler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerParams {
    pub mean: Vec<f32>,
    pub scale: Vec<f32>,
}

/// One class probability emitted by one model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCondition {
    pub condition: String,
    pub confidence: f32,
    pub model: ModelSlot,
}

/// A frozen trained classifier for one slot: the ordered feature list its
/// input vectors are built over, the class labels it can emit, and the linear
/// pipeline parameters. Immutable after load.
#[derive(Debug)]
pub struct ClassifierArtifact {
    tag: ModelSlot,
    features: Vec<String>,
    classes: Vec<String>,
    mean: Array1<f32>,
    scale: Array1<f32>,
    coefficients: Array2<f32>,
    intercepts: Array1<f32>,
}

impl ClassifierArtifact {
    /// Validates a raw artifact document and freezes it into scoring form.
    ///
    /// Shape rules: scaler statistics must cover every feature; coefficients
    /// must be one row per class, each row as wide as the feature list, with
    /// one intercept per row. Two-class artifacts may instead ship a single
    /// row, matching the binary serialization of the training library.
    pub fn from_file(file: ArtifactFile) -> Result<Self, PredictorError> {
        let n_features = file.features.len();
        let n_classes = file.classes.len();
        let n_rows = file.coefficients.len();

        if n_features == 0 {
            return Err(PredictorError::BuildError(
                "artifact declares no features".into(),
            ));
        }
        if n_classes < 2 {
            return Err(PredictorError::BuildError(format!(
                "artifact declares {} class(es), need at least 2",
                n_classes
            )));
        }
        if file.scaler.mean.len() != n_features || file.scaler.scale.len() != n_features {
            return Err(PredictorError::BuildError(format!(
                "scaler statistics cover {} mean / {} scale entries for {} features",
                file.scaler.mean.len(),
                file.scaler.scale.len(),
                n_features
            )));
        }
        let binary_single_row = n_classes == 2 && n_rows == 1;
        if n_rows != n_classes && !binary_single_row {
            return Err(PredictorError::BuildError(format!(
                "{} coefficient rows for {} classes",
                n_rows, n_classes
            )));
        }
        if file.intercepts.len() != n_rows {
            return Err(PredictorError::BuildError(format!(
                "{} intercepts for {} coefficient rows",
                file.intercepts.len(),
                n_rows
            )));
        }
        if let Some(row) = file.coefficients.iter().find(|row| row.len() != n_features) {
            return Err(PredictorError::BuildError(format!(
                "coefficient row of width {} for {} features",
                row.len(),
                n_features
            )));
        }

        let flat: Vec<f32> = file.coefficients.into_iter().flatten().collect();
        let coefficients = Array2::from_shape_vec((n_rows, n_features), flat)
            .map_err(|e| PredictorError::BuildError(e.to_string()))?;

        Ok(Self {
            tag: file.tag,
            features: file.features,
            classes: file.classes,
            mean: Array1::from(file.scaler.mean),
            scale: Array1::from(file.scaler.scale),
            coefficients,
            intercepts: Array1::from(file.intercepts),
        })
    }

    pub fn tag(&self) -> ModelSlot {
        self.tag
    }

    /// The fixed feature order this model's input vectors are built over.
    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Scores every declared class for the given feature vector, returning
    /// exactly one entry per class, unfiltered. Confidence filtering is the
    /// aggregator's job, which keeps this contract independently testable.
    ///
    /// A vector whose length disagrees with the model's feature order is an
    /// internal invariant breach between vectorizer and adapter and panics;
    /// silently truncating or padding would misalign every feature.
    pub fn score(&self, vector: &Array1<f32>) -> Result<Vec<ScoredCondition>, PredictorError> {
        assert_eq!(
            vector.len(),
            self.features.len(),
            "feature vector length {} does not match {} model feature order ({})",
            vector.len(),
            self.tag,
            self.features.len()
        );

        let mut scaled = Array1::zeros(vector.len());
        for (i, &x) in vector.iter().enumerate() {
            // Zero-variance features pass through unscaled, as the fitted
            // scaler itself handles them.
            let denom = if self.scale[i] == 0.0 { 1.0 } else { self.scale[i] };
            scaled[i] = (x - self.mean[i]) / denom;
        }

        let z = self.coefficients.dot(&scaled) + &self.intercepts;
        let probabilities = if self.classes.len() == 2 && self.coefficients.nrows() == 1 {
            let p = sigmoid(z[0]);
            Array1::from(vec![1.0 - p, p])
        } else {
            softmax(&z)
        };

        if probabilities.iter().any(|p| !p.is_finite()) {
            return Err(PredictorError::InferenceError(format!(
                "{} model produced a non-finite probability",
                self.tag
            )));
        }

        Ok(self
            .classes
            .iter()
            .zip(probabilities.iter())
            .map(|(condition, &confidence)| ScoredCondition {
                condition: condition.clone(),
                confidence,
                model: self.tag,
            })
            .collect())
    }
}
