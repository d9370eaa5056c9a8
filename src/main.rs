use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ferrite_mlp::{
    accuracy, data, metrics::DEFAULT_THRESHOLD, train_loop, BinaryRule, GradientRule, RunConfig,
};

/// Trains a small feedforward network on a synthetic two-bit task.
#[derive(Parser, Debug)]
#[command(name = "ferrite-mlp", version, about)]
struct Args {
    /// JSON run configuration; flags below override its fields.
    #[arg(short, long)]
    config: Option<String>,

    #[arg(long)]
    epochs: Option<usize>,

    #[arg(long)]
    learning_rate: Option<f64>,

    #[arg(long)]
    train_samples: Option<usize>,

    #[arg(long)]
    test_samples: Option<usize>,

    /// Seed for initialization and data generation.
    #[arg(long)]
    seed: Option<u64>,

    /// Log progress every N epochs (0 logs only the last epoch).
    #[arg(long)]
    log_every: Option<usize>,

    /// xor | and | or
    #[arg(long)]
    task: Option<BinaryRule>,

    /// textbook | eager
    #[arg(long)]
    gradient_rule: Option<GradientRule>,

    /// Number of test predictions to print.
    #[arg(long, default_value_t = 5)]
    show: usize,
}

fn load_config(args: &Args) -> Result<RunConfig> {
    let mut config = match &args.config {
        Some(path) => RunConfig::load_json(path)
            .with_context(|| format!("failed to load config from {path}"))?,
        None => RunConfig::default(),
    };

    if let Some(epochs) = args.epochs {
        config.training.epochs = epochs;
    }
    if let Some(lr) = args.learning_rate {
        config.training.learning_rate = lr;
    }
    if let Some(n) = args.train_samples {
        config.train_samples = n;
    }
    if let Some(n) = args.test_samples {
        config.test_samples = n;
    }
    if let Some(n) = args.log_every {
        config.training.log_every = n;
    }
    if let Some(task) = args.task {
        config.task = task;
    }
    if let Some(rule) = args.gradient_rule {
        config.network.gradient_rule = rule;
    }
    config.seed = args.seed.or(config.seed);

    config.validate().context("invalid run configuration")?;
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut network = config.network.build(&mut rng)?;
    let (train_x, train_y) = data::generate(config.task, config.train_samples, &mut rng);

    info!(
        task = ?config.task,
        samples = config.train_samples,
        epochs = config.training.epochs,
        learning_rate = config.training.learning_rate,
        "training started"
    );
    let history = train_loop(&mut network, &train_x, &train_y, &config.training)?;
    if let Some(last) = history.last() {
        info!(epochs = last.epoch, loss = last.train_loss, "training finished");
    }

    if config.test_samples == 0 {
        return Ok(());
    }

    let (test_x, test_y) = data::generate(config.task, config.test_samples, &mut rng);
    let predictions = network.predict(&test_x)?;
    let acc = accuracy(&predictions, &test_y, DEFAULT_THRESHOLD)?;

    println!("\nTest Results:");
    println!("Accuracy: {:.2}%", acc * 100.0);

    println!("\nExample Predictions:");
    for i in 0..args.show.min(config.test_samples) {
        let input = test_x.row(i)?;
        println!(
            "Input: [{}, {}] Expected: {} Predicted: {:.4}",
            input[0],
            input[1],
            test_y.get(i, 0)?,
            predictions.get(i, 0)?
        );
    }

    Ok(())
}
