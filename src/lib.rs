pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod train;
pub mod data;
pub mod metrics;
pub mod config;

// Convenience re-exports
pub use error::{Error, Result};
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::dense::{GradientRule, Layer};
pub use network::network::Network;
pub use network::spec::{LayerSpec, NetworkSpec};
pub use loss::loss_type::LossType;
pub use loss::mse::MseLoss;
pub use train::{train_loop, EpochStats, TrainConfig};
pub use data::binary::BinaryRule;
pub use metrics::accuracy::accuracy;
pub use config::RunConfig;
