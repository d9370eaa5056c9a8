use serde::{Serialize, Deserialize};
use std::f64::consts::E;

use crate::math::matrix::Matrix;

/// Element-wise activation applied after a layer's affine transform.
///
/// Variants are stateless, so one value can be copied into any number of
/// layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationFunction {
    Sigmoid,
    ReLU,
    Tanh,
    Identity,
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
            ActivationFunction::ReLU => if x > 0.0 { x } else { 0.0 },
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::Identity => x,
        }
    }

    /// Derivative evaluated at the pre-activation point `x`.
    ///
    /// ReLU uses `0` at exactly `x == 0`. Sigmoid recomputes `s = f(x)` and
    /// returns `s * (1 - s)`, so passing an already-activated value yields
    /// the slope at the wrong point.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => {
                let fx = self.function(x);
                fx * (1.0 - fx)
            },
            ActivationFunction::ReLU => if x > 0.0 { 1.0 } else { 0.0 },
            ActivationFunction::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
            ActivationFunction::Identity => 1.0,
        }
    }

    pub fn forward(&self, x: &Matrix) -> Matrix {
        x.map(|v| self.function(v))
    }

    pub fn backward(&self, x: &Matrix) -> Matrix {
        x.map(|v| self.derivative(v))
    }
}
