use crate::error::{Error, Result};
use crate::math::matrix::Matrix;

pub struct MseLoss;

impl MseLoss {
    /// Scalar MSE: mean((predicted - expected)²) over all rows×cols elements.
    pub fn calculate(predicted: &Matrix, expected: &Matrix) -> Result<f64> {
        let diff = predicted.subtract(expected)?;
        if diff.is_empty() {
            return Err(Error::EmptyInput);
        }
        let n = diff.len() as f64;
        Ok(diff.iter().map(|d| d * d).sum::<f64>() / n)
    }

    /// Gradient w.r.t. `predicted`: (predicted - expected) · 2/n
    pub fn derivative(predicted: &Matrix, expected: &Matrix) -> Result<Matrix> {
        let diff = predicted.subtract(expected)?;
        if diff.is_empty() {
            return Err(Error::EmptyInput);
        }
        let n = diff.len() as f64;
        Ok(diff.scale(2.0 / n))
    }
}
