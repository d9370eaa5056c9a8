use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::math::matrix::Matrix;

/// Labeling rule for the two-bit synthetic task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryRule {
    #[default]
    Xor,
    And,
    Or,
}

impl BinaryRule {
    pub fn label(&self, a: bool, b: bool) -> bool {
        match self {
            BinaryRule::Xor => a != b,
            BinaryRule::And => a && b,
            BinaryRule::Or => a || b,
        }
    }
}

impl std::str::FromStr for BinaryRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "xor" => Ok(BinaryRule::Xor),
            "and" => Ok(BinaryRule::And),
            "or" => Ok(BinaryRule::Or),
            other => Err(format!("unknown task `{other}` (expected xor|and|or)")),
        }
    }
}

fn bit(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}

fn labelled(rule: BinaryRule, pairs: &[(bool, bool)]) -> (Matrix, Matrix) {
    let inputs = Matrix::from_fn(pairs.len(), 2, |i, j| {
        let (a, b) = pairs[i];
        bit(if j == 0 { a } else { b })
    });
    let labels = Matrix::from_fn(pairs.len(), 1, |i, _| {
        let (a, b) = pairs[i];
        bit(rule.label(a, b))
    });
    (inputs, labels)
}

/// Draws `samples` random operand pairs and labels them with `rule`.
///
/// Returns `(inputs, labels)` with shapes `samples x 2` and `samples x 1`.
pub fn generate<R: Rng + ?Sized>(rule: BinaryRule, samples: usize, rng: &mut R) -> (Matrix, Matrix) {
    let pairs: Vec<(bool, bool)> = (0..samples).map(|_| (rng.gen(), rng.gen())).collect();
    labelled(rule, &pairs)
}

/// The four canonical rows (0,0), (0,1), (1,0), (1,1) and their labels.
pub fn truth_table(rule: BinaryRule) -> (Matrix, Matrix) {
    labelled(rule, &[(false, false), (false, true), (true, false), (true, true)])
}
