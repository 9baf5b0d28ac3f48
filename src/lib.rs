//! A symptom-to-disease inference library: two pre-trained linear classifiers
//! (acute and chronic) are loaded once, queried with sparse symptom-severity
//! maps, and their class probabilities merged into a ranked top-N answer.
//!
//! # Basic Usage
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::collections::HashMap;
//! use symtriage::{ArtifactFile, ClassifierArtifact, Mode, ModelSlot, Predictor, ScalerParams};
//!
//! let acute = ClassifierArtifact::from_file(ArtifactFile {
//!     tag: ModelSlot::Acute,
//!     features: vec!["fever".into(), "cough".into()],
//!     classes: vec!["common cold".into(), "flu".into()],
//!     scaler: ScalerParams { mean: vec![0.5, 0.5], scale: vec![0.5, 0.5] },
//!     coefficients: vec![vec![-1.2, 0.4], vec![1.2, -0.4]],
//!     intercepts: vec![0.1, -0.1],
//! })?;
//!
//! let predictor = Predictor::builder()
//!     .with_artifact(acute)?
//!     .with_confidence_floor(0.05)?
//!     .build();
//!
//! let mut symptoms = HashMap::new();
//! symptoms.insert("fever".to_string(), 3);
//! symptoms.insert("cough".to_string(), 2);
//!
//! let result = predictor.predict(&symptoms, Mode::Acute)?;
//! for p in &result.predictions {
//!     println!("{}: {:.1}% ({})", p.condition, p.confidence * 100.0, p.model);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! A `Predictor` and its artifacts are immutable after construction and
//! `Send + Sync`, so one instance is shared across request handler tasks
//! behind an `Arc` with no locking.

pub mod artifact_store;
pub mod models;
pub mod predictor;
pub mod server;

pub use artifact_store::{ArtifactStore, StoreError, CHECKSUMS_FILE};
pub use models::ModelSlot;
pub use predictor::{
    validate_observation, vectorize, ArtifactFile, ClassifierArtifact, Mode, Predictor,
    PredictorBuilder, PredictorError, PredictorInfo, RankedResult, ScalerParams, ScoredCondition,
    SymptomObservation, DEFAULT_CONFIDENCE_FLOOR, DEFAULT_RESULT_CAP, MAX_SEVERITY,
};
pub use server::{router, AppState};

pub fn init_logger() {
    env_logger::init();
}
