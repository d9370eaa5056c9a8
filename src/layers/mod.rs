pub mod dense;

pub use dense::{GradientRule, Layer};
