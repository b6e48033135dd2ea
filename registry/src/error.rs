use crate::score::ScoreField;
use hqa_types::{AccountId, AssessmentId, TypesError};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("caller {caller} is not authorized: owner-only operation")]
    NotAuthorized { caller: AccountId },

    #[error("assessor {0} is not registered")]
    NotRegistered(AccountId),

    #[error("assessor {0} is already registered")]
    AlreadyRegistered(AccountId),

    #[error("assessor {0} is not certified")]
    NotCertified(AccountId),

    #[error("assessor {0} is already certified")]
    AlreadyCertified(AccountId),

    #[error("assessment {0} not found")]
    NotFound(AssessmentId),

    #[error("assessment {0} is not completed")]
    NotCompleted(AssessmentId),

    #[error("assessment {0} is already verified")]
    AlreadyVerified(AssessmentId),

    #[error("assessment {0} is not verified, no quality report yet")]
    NotVerified(AssessmentId),

    #[error("{field} score {value} is out of range 0..=100")]
    ScoreOutOfRange { field: ScoreField, value: u32 },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("assessment id space exhausted")]
    IdSpaceExhausted,

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<TypesError> for RegistryError {
    fn from(e: TypesError) -> Self {
        match e {
            TypesError::IdSpaceExhausted => Self::IdSpaceExhausted,
            other => Self::InvalidConfiguration(other.to_string()),
        }
    }
}
