use thiserror::Error;

pub type Result<T> = std::result::Result<T, PercolationError>;

#[derive(Debug, Error, PartialEq)]
pub enum PercolationError {
    #[error("invalid argument: {name} must be positive, got {value}")]
    InvalidArgument { name: &'static str, value: i64 },

    /// `row` and `col` are the 1-based coordinates the caller passed in.
    #[error("site ({row}, {col}) is outside the {n}x{n} grid")]
    IndexOutOfBounds { row: usize, col: usize, n: usize },

    #[error("element {index} is outside the disjoint set of size {size}")]
    IndexOutOfRange { index: usize, size: usize },

    #[error("config: {0}")]
    Config(String),
}

impl PercolationError {
    pub fn invalid(name: &'static str, value: usize) -> PercolationError {
        PercolationError::InvalidArgument {
            name,
            value: value as i64,
        }
    }
}

impl From<std::io::Error> for PercolationError {
    fn from(err: std::io::Error) -> PercolationError {
        PercolationError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for PercolationError {
    fn from(err: serde_json::Error) -> PercolationError {
        PercolationError::Config(err.to_string())
    }
}
