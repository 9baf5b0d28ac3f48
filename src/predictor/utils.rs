use ndarray::Array1;

/// Max-shifted for stability. Non-finite inputs propagate into the output so
/// the caller's finiteness check can catch corrupt weights.
pub(crate) fn softmax(z: &Array1<f32>) -> Array1<f32> {
    let max = z.fold(f32::NEG_INFINITY, |m, &v| m.max(v));
    let exp = z.mapv(|v| (v - max).exp());
    let sum = exp.sum();
    exp / sum
}

pub(crate) fn sigmoid(z: f32) -> f32 {
    1.0 / (1.0 + (-z).exp())
}
