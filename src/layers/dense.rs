use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::{
    activation::activation::ActivationFunction,
    error::{Error, Result},
    math::matrix::Matrix,
};

/// How `Layer::backward` evaluates the activation slope and which weights it
/// propagates the error through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientRule {
    /// Slope at the cached pre-activation `z`; error propagated through the
    /// weights that produced the forward pass.
    #[default]
    Textbook,
    /// Slope at the cached post-activation output; error propagated through
    /// the freshly updated weights.
    Eager,
}

impl std::str::FromStr for GradientRule {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "textbook" => Ok(GradientRule::Textbook),
            "eager" => Ok(GradientRule::Eager),
            other => Err(format!("unknown gradient rule `{other}` (expected textbook|eager)")),
        }
    }
}

/// Fully connected layer: `activation(input · weights + biases)`.
///
/// `weights` is `input_size x output_size`, `biases` is `1 x output_size`.
/// The caches hold the state of the most recent `forward` call and are
/// consumed by the next `backward`; one batch lives in a layer at a time.
#[derive(Debug, Clone)]
pub struct Layer {
    weights: Matrix,
    biases: Matrix,
    activator: ActivationFunction,
    rule: GradientRule,
    last_input: Option<Matrix>,
    pre_neurons: Option<Matrix>,  // z = xW + b, needed for the textbook derivative
    last_output: Option<Matrix>,
    last_delta: Option<Matrix>,
}

impl Layer {
    /// Weights and biases drawn from `U[-1, 1]` via the thread-local generator.
    pub fn new(input_size: usize, output_size: usize, activation: ActivationFunction) -> Layer {
        Layer::with_rng(input_size, output_size, activation, &mut rand::thread_rng())
    }

    /// Same as `new` but draws the initial parameters from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(
        input_size: usize,
        output_size: usize,
        activation: ActivationFunction,
        rng: &mut R,
    ) -> Layer {
        let weights = Matrix::random_unit(input_size, output_size, rng);
        let biases = Matrix::random_unit(1, output_size, rng);
        Layer::assemble(weights, biases, activation)
    }

    /// Builds a layer from explicit parameters. `biases` must be
    /// `1 x weights.cols()`.
    pub fn from_parameters(
        weights: Matrix,
        biases: Matrix,
        activation: ActivationFunction,
    ) -> Result<Layer> {
        if biases.rows() != 1 || biases.cols() != weights.cols() {
            return Err(Error::ShapeMismatch {
                op: "layer parameters",
                left: weights.shape(),
                right: biases.shape(),
            });
        }
        Ok(Layer::assemble(weights, biases, activation))
    }

    pub fn with_gradient_rule(mut self, rule: GradientRule) -> Layer {
        self.rule = rule;
        self
    }

    fn assemble(weights: Matrix, biases: Matrix, activator: ActivationFunction) -> Layer {
        Layer {
            weights,
            biases,
            activator,
            rule: GradientRule::default(),
            last_input: None,
            pre_neurons: None,
            last_output: None,
            last_delta: None,
        }
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows()
    }

    pub fn output_size(&self) -> usize {
        self.weights.cols()
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    pub fn biases(&self) -> &Matrix {
        &self.biases
    }

    pub fn activation(&self) -> ActivationFunction {
        self.activator
    }

    pub fn gradient_rule(&self) -> GradientRule {
        self.rule
    }

    pub fn last_input(&self) -> Option<&Matrix> {
        self.last_input.as_ref()
    }

    pub fn last_output(&self) -> Option<&Matrix> {
        self.last_output.as_ref()
    }

    pub fn last_local_gradient(&self) -> Option<&Matrix> {
        self.last_delta.as_ref()
    }

    /// Computes `activation(input · W + b)` for a `batch x input_size` input
    /// and caches input, pre-activation and output for the next `backward`.
    pub fn forward(&mut self, input: &Matrix) -> Result<Matrix> {
        let z = input.dot(&self.weights)?.add_row_broadcast(&self.biases)?;
        let a = self.activator.forward(&z);

        self.last_input = Some(input.clone());
        self.pre_neurons = Some(z);
        self.last_output = Some(a.clone());
        Ok(a)
    }

    /// Applies one gradient-descent step from `error` (∂L/∂output, shape
    /// `batch x output_size`) and returns ∂L/∂input for the previous layer.
    ///
    /// Parameters and the local-gradient cache are only replaced once every
    /// matrix operation has succeeded.
    pub fn backward(&mut self, error: &Matrix, learning_rate: f64) -> Result<Matrix> {
        let input = self.last_input.as_ref().ok_or(Error::MissingForwardPass)?;
        let slope_at = match self.rule {
            GradientRule::Textbook => self.pre_neurons.as_ref(),
            GradientRule::Eager => self.last_output.as_ref(),
        }
        .ok_or(Error::MissingForwardPass)?;

        // δ = error ⊙ σ'(·)
        let delta = error.hadamard(&self.activator.backward(slope_at))?;

        let weights_grad = input.transpose().dot(&delta)?;
        let biases_grad = delta.sum_rows();

        let weights = self.weights.subtract(&weights_grad.scale(learning_rate))?;
        let biases = self.biases.subtract(&biases_grad.scale(learning_rate))?;

        let upstream = match self.rule {
            GradientRule::Textbook => delta.dot(&self.weights.transpose())?,
            GradientRule::Eager => delta.dot(&weights.transpose())?,
        };

        self.weights = weights;
        self.biases = biases;
        self.last_delta = Some(delta);
        Ok(upstream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_rule_parses_lowercase_names() {
        assert_eq!("textbook".parse::<GradientRule>(), Ok(GradientRule::Textbook));
        assert_eq!("eager".parse::<GradientRule>(), Ok(GradientRule::Eager));
        assert!("sideways".parse::<GradientRule>().is_err());
    }

    #[test]
    fn failed_backward_keeps_parameters() {
        let w = Matrix::from_rows(vec![vec![1.0], vec![1.0]]).unwrap();
        let b = Matrix::from_rows(vec![vec![0.0]]).unwrap();
        let mut layer = Layer::from_parameters(w.clone(), b.clone(), ActivationFunction::ReLU).unwrap();
        let input = Matrix::from_rows(vec![vec![3.0, 4.0]]).unwrap();
        layer.forward(&input).unwrap();

        let wrong = Matrix::zeros(2, 1);
        assert!(layer.backward(&wrong, 0.1).is_err());
        assert_eq!(layer.weights(), &w);
        assert_eq!(layer.biases(), &b);
        assert!(layer.last_local_gradient().is_none());
    }
}
