use super::error::PredictorError;
use super::model::ClassifierArtifact;
use super::predictor::Predictor;
use crate::models::ModelSlot;

/// Default minimum posterior probability for a condition to appear in results.
pub const DEFAULT_CONFIDENCE_FLOOR: f32 = 0.05;

/// Default maximum number of ranked predictions per request.
pub const DEFAULT_RESULT_CAP: usize = 5;

/// A builder for constructing a Predictor with a fluent interface.
///
/// Artifacts are routed to their slot by tag; both slots are optional so the
/// service can start degraded when a model is unavailable. The confidence
/// floor and result cap are configuration, not constants, and are validated
/// as they are set.
///
/// # Example
/// ```rust
/// use symtriage::PredictorBuilder;
///
/// let predictor = PredictorBuilder::new()
///     .with_confidence_floor(0.01)
///     .unwrap()
///     .with_result_cap(3)
///     .unwrap()
///     .build();
/// assert!(!predictor.is_ready());
/// ```
#[derive(Default, Debug)]
pub struct PredictorBuilder {
    acute: Option<ClassifierArtifact>,
    chronic: Option<ClassifierArtifact>,
    confidence_floor: Option<f32>,
    result_cap: Option<usize>,
}

impl PredictorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a loaded artifact into the slot its tag names.
    ///
    /// # Errors
    /// Returns a `BuildError` if that slot already holds an artifact; two
    /// models for the same slot indicates a deployment mistake rather than
    /// something to resolve silently.
    pub fn with_artifact(mut self, artifact: ClassifierArtifact) -> Result<Self, PredictorError> {
        let slot = match artifact.tag() {
            ModelSlot::Acute => &mut self.acute,
            ModelSlot::Chronic => &mut self.chronic,
        };
        if slot.is_some() {
            return Err(PredictorError::BuildError(format!(
                "{} slot already holds an artifact",
                artifact.tag()
            )));
        }
        *slot = Some(artifact);
        Ok(self)
    }

    /// Sets the confidence floor.
    ///
    /// # Errors
    /// Returns a `BuildError` unless the floor lies in [0, 1).
    pub fn with_confidence_floor(mut self, floor: f32) -> Result<Self, PredictorError> {
        if !(0.0..1.0).contains(&floor) {
            return Err(PredictorError::BuildError(format!(
                "confidence floor {} outside [0, 1)",
                floor
            )));
        }
        self.confidence_floor = Some(floor);
        Ok(self)
    }

    /// Sets the result cap.
    ///
    /// # Errors
    /// Returns a `BuildError` for a cap of zero.
    pub fn with_result_cap(mut self, cap: usize) -> Result<Self, PredictorError> {
        if cap == 0 {
            return Err(PredictorError::BuildError(
                "result cap must be at least 1".into(),
            ));
        }
        self.result_cap = Some(cap);
        Ok(self)
    }

    /// Builds the final Predictor. Infallible: an empty predictor is legal
    /// and reports itself not ready until a process restart supplies models.
    pub fn build(self) -> Predictor {
        Predictor::from_parts(
            self.acute,
            self.chronic,
            self.confidence_floor.unwrap_or(DEFAULT_CONFIDENCE_FLOOR),
            self.result_cap.unwrap_or(DEFAULT_RESULT_CAP),
        )
    }
}
