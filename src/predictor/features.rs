use ndarray::Array1;
use std::collections::HashMap;

use super::error::PredictorError;

/// A sparse symptom-severity report: symptom identifier to severity in 0-4.
/// Zero or absent means "not reported". Severities arrive as signed integers
/// so out-of-range values can be rejected with the offending key named
/// instead of dying opaquely in deserialization.
pub type SymptomObservation = HashMap<String, i64>;

/// Upper bound of the self-reported severity scale.
pub const MAX_SEVERITY: i64 = 4;

/// Checks an observation before it reaches any numeric step.
///
/// An empty map is rejected (distinct from a map of explicit zeros, which is
/// legal and vectorizes to all zeros). Out-of-range severities are reported
/// with their keys, sorted so the message is deterministic.
pub fn validate_observation(observation: &SymptomObservation) -> Result<(), PredictorError> {
    if observation.is_empty() {
        return Err(PredictorError::ValidationError(
            "symptoms map cannot be empty".into(),
        ));
    }

    let mut offending: Vec<&str> = observation
        .iter()
        .filter(|(_, &severity)| !(0..=MAX_SEVERITY).contains(&severity))
        .map(|(key, _)| key.as_str())
        .collect();

    if !offending.is_empty() {
        offending.sort_unstable();
        return Err(PredictorError::ValidationError(format!(
            "severity must be an integer in 0-{} for: {}",
            MAX_SEVERITY,
            offending.join(", ")
        )));
    }

    Ok(())
}

/// Builds the dense binary input vector for one model.
///
/// Position i is 1.0 iff the observation reports `feature_order[i]` with a
/// severity above zero. Only the threshold is encoded, not the magnitude;
/// the models were trained on binary presence flags. Keys the model was not
/// trained on are ignored, missing keys count as severity 0.
pub fn vectorize(observation: &SymptomObservation, feature_order: &[String]) -> Array1<f32> {
    Array1::from_iter(feature_order.iter().map(|feature| {
        if observation.get(feature).copied().unwrap_or(0) > 0 {
            1.0
        } else {
            0.0
        }
    }))
}
