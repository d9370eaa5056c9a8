use std::time::Instant;

use tracing::{info, warn};

use crate::error::Result;
use crate::math::matrix::Matrix;
use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

/// Trains `network` on the full batch `inputs`/`labels` for up to
/// `config.epochs` epochs and returns the per-epoch history.
///
/// Each epoch is a single `Network::train` call over every row. The loop
/// stops early once an epoch's loss falls below `config.target_loss`.
///
/// # Errors
/// Invalid configuration, or any shape error raised by the network.
pub fn train_loop(
    network: &mut Network,
    inputs: &Matrix,
    labels: &Matrix,
    config: &TrainConfig,
) -> Result<Vec<EpochStats>> {
    config.validate()?;

    let mut history = Vec::with_capacity(config.epochs);

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();
        let train_loss = network.train(inputs, labels, config.learning_rate)?;
        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        if !train_loss.is_finite() {
            warn!(epoch, train_loss, "training loss is not finite");
        }

        let reached_target = config.target_loss.map_or(false, |t| train_loss < t);
        if should_log(epoch, config) || reached_target {
            info!(epoch, total = config.epochs, loss = train_loss, "epoch complete");
        }

        history.push(EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss,
            elapsed_ms,
        });

        if reached_target {
            info!(epoch, "target loss reached, stopping early");
            break;
        }
    }

    Ok(history)
}

fn should_log(epoch: usize, config: &TrainConfig) -> bool {
    epoch == config.epochs || (config.log_every > 0 && epoch % config.log_every == 0)
}
