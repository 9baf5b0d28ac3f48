use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::error::PredictorError;
use super::features::{validate_observation, vectorize, SymptomObservation};
use super::model::{ClassifierArtifact, ScoredCondition};
use super::PredictorInfo;

/// Caller-selected scope of inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Acute,
    Chronic,
    NotSure,
}

/// The response payload: ranked predictions plus an advisory message.
/// Recomputed fresh per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedResult {
    pub predictions: Vec<ScoredCondition>,
    pub message: String,
}

/// Top confidence below this yields the low-confidence advisory.
const LOW_CONFIDENCE: f32 = 0.3;

const NO_MATCH_MESSAGE: &str =
    "The reported symptoms do not match any condition clearly. Please consult a general physician.";
const LOW_CONFIDENCE_MESSAGE: &str =
    "Low confidence match. Treat these results as indicative only and consult a general physician.";

/// The prediction aggregator: holds the loaded model artifacts and the
/// ranking policy, and answers symptom queries.
///
/// Artifacts are injected at construction and immutable for the process
/// lifetime, so a `Predictor` can be shared across request handler tasks
/// behind an `Arc` without locking.
///
/// # Example
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use std::collections::HashMap;
/// use symtriage::{ArtifactFile, ClassifierArtifact, Mode, ModelSlot, PredictorBuilder, ScalerParams};
///
/// let artifact = ClassifierArtifact::from_file(ArtifactFile {
///     tag: ModelSlot::Acute,
///     features: vec!["fever".into(), "cough".into()],
///     classes: vec!["common cold".into(), "flu".into()],
///     scaler: ScalerParams { mean: vec![0.5, 0.5], scale: vec![0.5, 0.5] },
///     coefficients: vec![vec![-1.2, 0.4], vec![1.2, -0.4]],
///     intercepts: vec![0.1, -0.1],
/// })?;
///
/// let predictor = PredictorBuilder::new().with_artifact(artifact)?.build();
///
/// let mut symptoms = HashMap::new();
/// symptoms.insert("fever".to_string(), 3);
/// let result = predictor.predict(&symptoms, Mode::Acute)?;
/// assert!(result.predictions.len() <= 5);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Predictor {
    acute: Option<ClassifierArtifact>,
    chronic: Option<ClassifierArtifact>,
    confidence_floor: f32,
    result_cap: usize,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<Predictor>();
    }
};

impl Predictor {
    /// Creates a new PredictorBuilder for fluent construction
    pub fn builder() -> super::builder::PredictorBuilder {
        super::builder::PredictorBuilder::new()
    }

    pub(crate) fn from_parts(
        acute: Option<ClassifierArtifact>,
        chronic: Option<ClassifierArtifact>,
        confidence_floor: f32,
        result_cap: usize,
    ) -> Self {
        Self {
            acute,
            chronic,
            confidence_floor,
            result_cap,
        }
    }

    /// True when at least one model slot is populated.
    pub fn is_ready(&self) -> bool {
        self.acute.is_some() || self.chronic.is_some()
    }

    /// Returns information about the predictor's current state
    pub fn info(&self) -> PredictorInfo {
        PredictorInfo {
            acute_loaded: self.acute.is_some(),
            chronic_loaded: self.chronic.is_some(),
            acute_classes: self.acute.as_ref().map_or(0, |a| a.classes().len()),
            chronic_classes: self.chronic.as_ref().map_or(0, |a| a.classes().len()),
            confidence_floor: self.confidence_floor,
            result_cap: self.result_cap,
        }
    }

    /// Answers one symptom query.
    ///
    /// Validates the observation, invokes the models the mode selects
    /// (skipping empty slots so the service degrades rather than erroring),
    /// merges the floor-filtered scores, ranks them descending with a stable
    /// acute-before-chronic tie-break, truncates to the result cap and derives
    /// the advisory message.
    ///
    /// # Errors
    /// * `NotReady` when no model slot is populated at all — distinct from a
    ///   well-formed empty result, so callers can tell "no matches" from
    ///   "service not initialized".
    /// * `ValidationError` for an empty symptoms map or out-of-range severity.
    ///
    /// A model that fails internally during scoring is logged and dropped
    /// from the request; the other model's contribution still returns.
    pub fn predict(
        &self,
        symptoms: &SymptomObservation,
        mode: Mode,
    ) -> Result<RankedResult, PredictorError> {
        if !self.is_ready() {
            return Err(PredictorError::NotReady);
        }
        validate_observation(symptoms)?;

        let mut candidates = Vec::new();
        for artifact in self.invoked(mode) {
            let vector = vectorize(symptoms, artifact.features());
            match artifact.score(&vector) {
                Ok(scored) => candidates
                    .extend(scored.into_iter().filter(|s| s.confidence >= self.confidence_floor)),
                Err(e) => {
                    log::error!("{} model dropped from this request: {}", artifact.tag(), e)
                }
            }
        }

        Ok(self.rank(candidates))
    }

    /// Models to invoke for a mode, in tie-break order: acute before chronic.
    /// A slot the mode asks for but which holds no artifact is skipped.
    fn invoked(&self, mode: Mode) -> Vec<&ClassifierArtifact> {
        let (acute, chronic) = match mode {
            Mode::Acute => (self.acute.as_ref(), None),
            Mode::Chronic => (None, self.chronic.as_ref()),
            Mode::NotSure => (self.acute.as_ref(), self.chronic.as_ref()),
        };
        acute.into_iter().chain(chronic).collect()
    }

    /// Ranking policy over already floor-filtered candidates. `sort_by` is
    /// stable, so equal confidences keep invocation order.
    fn rank(&self, mut candidates: Vec<ScoredCondition>) -> RankedResult {
        candidates.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        });
        candidates.truncate(self.result_cap);
        let message = advisory(&candidates);
        RankedResult {
            predictions: candidates,
            message,
        }
    }
}

/// Total and mutually exclusive: empty results get the no-match advisory, a
/// weak top result the low-confidence advisory, anything else no message.
fn advisory(predictions: &[ScoredCondition]) -> String {
    match predictions.first() {
        None => NO_MATCH_MESSAGE.to_string(),
        Some(top) if top.confidence < LOW_CONFIDENCE => LOW_CONFIDENCE_MESSAGE.to_string(),
        Some(_) => String::new(),
    }
}
