pub mod binary;

pub use binary::{generate, truth_table, BinaryRule};
