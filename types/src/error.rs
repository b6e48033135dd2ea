use thiserror::Error;

/// Errors raised while constructing fundamental types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypesError {
    #[error("assessment id space exhausted")]
    IdSpaceExhausted,
}
