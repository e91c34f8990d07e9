use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MarkerError {
    #[error("marker must not be empty")]
    Empty,
    #[error("marker must not contain whitespace: {0:?}")]
    Whitespace(String),
    #[error("marker pattern could not be compiled: {0}")]
    Pattern(String),
}

/// Failure surfaced when the input cannot be treated as an encoded sequence.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("invalid input kind: {reason}")]
    InvalidInputKind { reason: String },
}

impl DecodeError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInputKind {
            reason: reason.into(),
        }
    }
}
