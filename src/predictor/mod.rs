pub mod builder;
mod error;
mod features;
mod model;
mod predictor;
mod utils;

pub use builder::{PredictorBuilder, DEFAULT_CONFIDENCE_FLOOR, DEFAULT_RESULT_CAP};
pub use error::PredictorError;
pub use features::{validate_observation, vectorize, SymptomObservation, MAX_SEVERITY};
pub use model::{ArtifactFile, ClassifierArtifact, ScalerParams, ScoredCondition};
pub use predictor::{Mode, Predictor, RankedResult};

/// Information about the current state and configuration of a predictor
#[derive(Debug, Clone)]
pub struct PredictorInfo {
    /// Whether the acute slot holds a loaded model
    pub acute_loaded: bool,
    /// Whether the chronic slot holds a loaded model
    pub chronic_loaded: bool,
    /// Number of conditions the acute model can emit (0 when empty)
    pub acute_classes: usize,
    /// Number of conditions the chronic model can emit (0 when empty)
    pub chronic_classes: usize,
    /// Minimum posterior probability for a condition to appear in results
    pub confidence_floor: f32,
    /// Maximum number of ranked predictions per request
    pub result_cap: usize,
}
