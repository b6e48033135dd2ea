//! Verification workflow: the single `Submitted → Verified` transition.
//!
//! There is no rejection or revocation: once verified, an assessment stays
//! verified. Owner authorization is enforced by [`crate::HousingRegistry`].

use crate::assessor::AssessorRegistry;
use crate::error::RegistryError;
use crate::ledger::AssessmentLedger;
use crate::report::QualityReport;
use hqa_types::{AccountId, AssessmentId, Timestamp};

#[derive(Clone, Copy, Debug, Default)]
pub struct VerificationWorkflow;

impl VerificationWorkflow {
    /// Mark `id` verified and credit its submitter.
    ///
    /// Returns the submitter on success. Unknown ids fail with `NotCompleted`,
    /// the same as any assessment not yet in the completed state.
    pub fn verify(
        &self,
        ledger: &mut AssessmentLedger,
        assessors: &mut AssessorRegistry,
        id: AssessmentId,
        now: Timestamp,
    ) -> Result<AccountId, RegistryError> {
        let assessment = match ledger.get_mut(id) {
            Some(a) if a.is_completed => a,
            _ => return Err(RegistryError::NotCompleted(id)),
        };
        if assessment.is_verified {
            return Err(RegistryError::AlreadyVerified(id));
        }
        assessment.is_verified = true;
        assessment.verified_at = Some(now);
        let assessor = assessment.assessor.clone();
        assessors.record_verification(&assessor);
        Ok(assessor)
    }

    /// Quality report for a verified assessment.
    pub fn quality_report(
        &self,
        ledger: &AssessmentLedger,
        id: AssessmentId,
    ) -> Result<QualityReport, RegistryError> {
        let assessment = ledger.get(id).ok_or(RegistryError::NotFound(id))?;
        QualityReport::derive(assessment).ok_or(RegistryError::NotVerified(id))
    }
}
