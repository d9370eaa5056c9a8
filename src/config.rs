//! Run configuration for the training driver.
//!
//! A `RunConfig` bundles everything one training run needs: the synthetic
//! task, dataset sizes, an optional seed, the network architecture and the
//! training hyperparameters. Every field has a default, so a JSON file only
//! needs to name what it changes.
//!
//! # Example
//!
//! ```json
//! {
//!   "task": "xor",
//!   "seed": 7,
//!   "training": { "epochs": 2000, "learning_rate": 0.5 }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::data::binary::BinaryRule;
use crate::error::{Error, Result};
use crate::network::spec::NetworkSpec;
use crate::train::train_config::TrainConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Labeling rule for the generated datasets.
    pub task: BinaryRule,
    pub train_samples: usize,
    pub test_samples: usize,
    /// Seed for parameter initialization and data generation. `None` draws
    /// from OS entropy, so runs are not reproducible.
    pub seed: Option<u64>,
    pub network: NetworkSpec,
    pub training: TrainConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            task: BinaryRule::Xor,
            train_samples: 1000,
            test_samples: 100,
            seed: None,
            network: NetworkSpec::default(),
            training: TrainConfig::default(),
        }
    }
}

impl RunConfig {
    /// Reads and validates a `RunConfig` from a JSON file.
    pub fn load_json(path: &str) -> Result<RunConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: RunConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.train_samples == 0 {
            return Err(Error::InvalidConfig("train_samples must be at least 1".into()));
        }
        self.network.validate()?;
        if self.network.input_size() != Some(2) || self.network.output_size() != Some(1) {
            return Err(Error::InvalidConfig(format!(
                "binary tasks need a 2-input, 1-output network, `{}` is {:?} -> {:?}",
                self.network.name,
                self.network.input_size(),
                self.network.output_size()
            )));
        }
        self.training.validate()
    }
}
