/// Errors raised by matrix algebra, layer/network passes and configuration.
///
/// Shape and index errors are programmer errors: the failing operation
/// aborts without producing a partial result.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("shape mismatch in {op}: {left:?} vs {right:?}")]
    ShapeMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("index ({row}, {col}) out of range for {rows}x{cols} matrix")]
    IndexOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("matrix input must contain at least one row and one column")]
    EmptyInput,

    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("backward pass requested before any forward pass")]
    MissingForwardPass,

    #[error("network has no layers")]
    EmptyNetwork,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
