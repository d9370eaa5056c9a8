use tracing::{debug, trace};

use crate::{
    error::{Error, Result},
    layers::dense::Layer,
    loss::loss_type::LossType,
    math::matrix::Matrix,
};

/// Ordered stack of layers trained against one loss.
///
/// The order of `layers` is the data-flow order. `add_layer` does not check
/// that adjacent sizes chain; a mismatch surfaces from the first matrix
/// operation that meets it.
#[derive(Debug, Clone)]
pub struct Network {
    layers: Vec<Layer>,
    loss: LossType,
}

impl Network {
    pub fn new(loss: LossType) -> Network {
        Network { layers: Vec::new(), loss }
    }

    pub fn add_layer(&mut self, layer: Layer) {
        debug!(
            index = self.layers.len(),
            input_size = layer.input_size(),
            output_size = layer.output_size(),
            activation = ?layer.activation(),
            "appending layer"
        );
        self.layers.push(layer);
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn loss(&self) -> LossType {
        self.loss
    }

    /// Forward pass; every layer caches its input and activations for backprop.
    pub fn forward(&mut self, input: &Matrix) -> Result<Matrix> {
        let mut current = input.clone();
        for layer in &mut self.layers {
            current = layer.forward(&current)?;
        }
        Ok(current)
    }

    /// Backpropagates the loss gradient through every layer in reverse,
    /// updating parameters in place, and returns the loss measured on the
    /// output cached by the preceding forward pass.
    pub fn backward(&mut self, expected: &Matrix, learning_rate: f64) -> Result<f64> {
        let output = self
            .layers
            .last()
            .ok_or(Error::EmptyNetwork)?
            .last_output()
            .ok_or(Error::MissingForwardPass)?;

        let loss = self.loss.calculate(output, expected)?;
        let mut error = self.loss.derivative(output, expected)?;

        for layer in self.layers.iter_mut().rev() {
            error = layer.backward(&error, learning_rate)?;
        }

        trace!(loss, "backward pass complete");
        Ok(loss)
    }

    /// One full training step: `forward` then `backward`.
    pub fn train(&mut self, input: &Matrix, expected: &Matrix, learning_rate: f64) -> Result<f64> {
        self.forward(input)?;
        self.backward(expected, learning_rate)
    }

    /// Alias for `forward`. Layer caches are overwritten just as in training.
    pub fn predict(&mut self, input: &Matrix) -> Result<Matrix> {
        self.forward(input)
    }
}
