use serde::{Serialize, Deserialize};

use crate::error::Result;
use crate::loss::mse::MseLoss;
use crate::math::matrix::Matrix;

/// Selects the loss a `Network` minimizes.
///
/// - `Mse` — mean-squared error over every element of the batch; pair with
///   Sigmoid or Identity output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossType {
    #[default]
    Mse,
}

impl LossType {
    pub fn calculate(&self, predicted: &Matrix, expected: &Matrix) -> Result<f64> {
        match self {
            LossType::Mse => MseLoss::calculate(predicted, expected),
        }
    }

    pub fn derivative(&self, predicted: &Matrix, expected: &Matrix) -> Result<Matrix> {
        match self {
            LossType::Mse => MseLoss::derivative(predicted, expected),
        }
    }
}
