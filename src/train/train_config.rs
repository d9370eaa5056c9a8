use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`        — number of full-batch training steps
/// - `learning_rate` — gradient-descent step size
/// - `log_every`     — emit a progress line every N epochs; `0` disables it
/// - `target_loss`   — stop early once an epoch's loss drops below this value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub epochs: usize,
    pub learning_rate: f64,
    pub log_every: usize,
    pub target_loss: Option<f64>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            epochs: 1000,
            learning_rate: 0.1,
            log_every: 100,
            target_loss: None,
        }
    }
}

impl TrainConfig {
    /// Creates a `TrainConfig` with the default logging cadence and no early stop.
    pub fn new(epochs: usize, learning_rate: f64) -> Self {
        TrainConfig {
            epochs,
            learning_rate,
            ..TrainConfig::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.epochs == 0 {
            return Err(Error::InvalidConfig("epochs must be at least 1".into()));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "learning_rate must be positive and finite, got {}",
                self.learning_rate
            )));
        }
        if let Some(target) = self.target_loss {
            if !(target.is_finite() && target >= 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "target_loss must be non-negative and finite, got {target}"
                )));
            }
        }
        Ok(())
    }
}
