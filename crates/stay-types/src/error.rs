use thiserror::Error;

/// Errors produced by model operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown class: {0}")]
    UnknownClass(String),

    #[error("missing class marker in attribute map")]
    MissingClass,

    #[error("serialization error: {0}")]
    Serialization(String),
}
