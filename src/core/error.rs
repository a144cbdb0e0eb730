use thiserror::Error;

/// Error type definitions
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid axis: {0} (must be 0 or 1)")]
    InvalidAxis(usize),

    #[error("iteration along this axis is too inefficient; materialize with to_frame() first")]
    UnsupportedIterationDirection,

    #[error("partition not found: {0}")]
    PartitionNotFound(String),

    #[error("label not found: {0}")]
    LabelNotFound(String),

    #[error("position out of bounds: index {index}, size {size}")]
    PositionOutOfBounds { index: usize, size: usize },

    #[error("length mismatch: expected {expected}, actual {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("chunksize must be greater than zero")]
    InvalidChunkSize,

    #[error("empty bus: {0}")]
    EmptyBus(String),

    #[error("empty data: {0}")]
    EmptyData(String),

    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    #[error("IO error")]
    Io(#[source] std::io::Error),

    #[error("CSV error")]
    Csv(#[source] csv::Error),

    #[error("JSON error")]
    Json(#[source] serde_json::Error),

    #[error("value parse error: {0}")]
    ParseValue(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
