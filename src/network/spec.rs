use rand::Rng;
use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::activation::activation::ActivationFunction;
use crate::error::{Error, Result};
use crate::layers::dense::{GradientRule, Layer};
use crate::loss::loss_type::LossType;
use crate::network::network::Network;

/// Describes one layer in a network specification.
///
/// Fields:
/// - `input_size` — number of values feeding into this layer (the output
///                  size of the previous layer, or the raw input width for
///                  the first layer)
/// - `size`       — number of neurons in this layer
/// - `activation` — activation function applied after the affine transform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub input_size: usize,
    pub size: usize,
    pub activation: ActivationFunction,
}

/// A serializable description of a network architecture plus its loss and
/// the gradient rule every layer trains with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub name: String,
    /// Ordered list of layer descriptions (input → output).
    pub layers: Vec<LayerSpec>,
    #[serde(default)]
    pub loss: LossType,
    #[serde(default)]
    pub gradient_rule: GradientRule,
}

impl Default for NetworkSpec {
    /// 2 → 4 ReLU → 1 Sigmoid, trained with MSE.
    fn default() -> Self {
        NetworkSpec {
            name: "xor".to_string(),
            layers: vec![
                LayerSpec { input_size: 2, size: 4, activation: ActivationFunction::ReLU },
                LayerSpec { input_size: 4, size: 1, activation: ActivationFunction::Sigmoid },
            ],
            loss: LossType::Mse,
            gradient_rule: GradientRule::Textbook,
        }
    }
}

impl NetworkSpec {
    pub fn input_size(&self) -> Option<usize> {
        self.layers.first().map(|l| l.input_size)
    }

    pub fn output_size(&self) -> Option<usize> {
        self.layers.last().map(|l| l.size)
    }

    /// Checks that the spec has at least one layer, no zero-sized layer, and
    /// that every layer's `input_size` equals the previous layer's `size`.
    pub fn validate(&self) -> Result<()> {
        if self.layers.is_empty() {
            return Err(Error::InvalidConfig(format!("network `{}` has no layers", self.name)));
        }

        for (i, layer) in self.layers.iter().enumerate() {
            if layer.size == 0 || layer.input_size == 0 {
                return Err(Error::InvalidConfig(format!("layer {i} has a zero dimension")));
            }
        }

        for (i, pair) in self.layers.windows(2).enumerate() {
            if pair[0].size != pair[1].input_size {
                return Err(Error::InvalidConfig(format!(
                    "layer {} outputs {} values but layer {} expects {}",
                    i,
                    pair[0].size,
                    i + 1,
                    pair[1].input_size
                )));
            }
        }

        Ok(())
    }

    /// Validates the spec and builds a freshly initialized network,
    /// drawing every parameter from `rng`.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Network> {
        self.validate()?;
        debug!(name = %self.name, layers = self.layers.len(), "building network");

        let mut network = Network::new(self.loss);
        for spec in &self.layers {
            let layer = Layer::with_rng(spec.input_size, spec.size, spec.activation, rng)
                .with_gradient_rule(self.gradient_rule);
            network.add_layer(layer);
        }
        Ok(network)
    }
}
