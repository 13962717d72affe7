use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    /// Malformed, missing, or unexpected line while decoding a file.
    #[error("format error on line {line}: {message}")]
    Format { line: usize, message: String },

    /// Degree, offset, or index values inconsistent with the node count.
    #[error("range error: {0}")]
    Range(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl GraphError {
    pub fn format(line: usize, message: impl Into<String>) -> Self {
        GraphError::Format {
            line,
            message: message.into(),
        }
    }

    pub fn range(message: impl Into<String>) -> Self {
        GraphError::Range(message.into())
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
