pub mod accuracy;

pub use accuracy::{accuracy, DEFAULT_THRESHOLD};
