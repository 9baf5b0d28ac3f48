use std::fmt;

/// Represents the different types of errors that can occur in the prediction engine.
#[derive(Debug)]
pub enum PredictorError {
    /// Error occurred due to invalid input parameters
    ValidationError(String),
    /// Error occurred while scoring a single model; recoverable, the request
    /// continues with the remaining model's output
    InferenceError(String),
    /// Error occurred while constructing a predictor or an artifact
    BuildError(String),
    /// No model slot is populated; the service cannot answer any request
    NotReady,
}

impl fmt::Display for PredictorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            Self::InferenceError(msg) => write!(f, "Inference error: {}", msg),
            Self::BuildError(msg) => write!(f, "Build error: {}", msg),
            Self::NotReady => write!(f, "No model loaded; service not ready"),
        }
    }
}

impl std::error::Error for PredictorError {}
