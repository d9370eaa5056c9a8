use crate::error::{Error, Result};
use crate::math::matrix::Matrix;

pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Fraction of elements whose `>= threshold` classification agrees between
/// `predicted` and `expected`.
///
/// Fails with `ShapeMismatch` on differently shaped inputs; an empty pair
/// scores `0.0`.
pub fn accuracy(predicted: &Matrix, expected: &Matrix, threshold: f64) -> Result<f64> {
    if predicted.shape() != expected.shape() {
        return Err(Error::ShapeMismatch {
            op: "accuracy",
            left: predicted.shape(),
            right: expected.shape(),
        });
    }

    let total = predicted.len();
    if total == 0 {
        return Ok(0.0);
    }

    let correct = predicted
        .iter()
        .zip(expected.iter())
        .filter(|(p, e)| (**p >= threshold) == (**e >= threshold))
        .count();

    Ok(correct as f64 / total as f64)
}
