//! Events emitted for every committed registry mutation.

use hqa_types::{AccountId, AssessmentId, Timestamp};
use serde::{Deserialize, Serialize};

/// Audit-trail events; observers receive exactly one per committed operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryEvent {
    AssessorRegistered {
        assessor: AccountId,
        at: Timestamp,
    },
    AssessorCertified {
        assessor: AccountId,
        certified_by: AccountId,
    },
    AssessmentSubmitted {
        id: AssessmentId,
        assessor: AccountId,
        at: Timestamp,
    },
    AssessmentVerified {
        id: AssessmentId,
        verified_by: AccountId,
    },
}

impl RegistryEvent {
    /// Short stable name, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AssessorRegistered { .. } => "assessor_registered",
            Self::AssessorCertified { .. } => "assessor_certified",
            Self::AssessmentSubmitted { .. } => "assessment_submitted",
            Self::AssessmentVerified { .. } => "assessment_verified",
        }
    }
}
