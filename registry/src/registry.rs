//! The registry aggregate: owner, assessor profiles, ledger, and property index
//! behind one set of methods.
//!
//! Every mutating method validates all of its preconditions before writing
//! anything, so a returned error means no state changed and no event was queued.

use crate::assessor::{AssessorProfile, AssessorRegistry};
use crate::error::RegistryError;
use crate::event::RegistryEvent;
use crate::ledger::{Assessment, AssessmentInfo, AssessmentLedger};
use crate::property_index::PropertyIndex;
use crate::report::QualityReport;
use crate::score::ScoreCard;
use crate::snapshot::{RegistrySnapshot, SNAPSHOT_VERSION};
use crate::verification::VerificationWorkflow;
use hqa_types::{AccountId, AssessmentId, PropertyToken, Timestamp};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Aggregate counters for operators.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySummary {
    pub owner: AccountId,
    pub total_assessments: u32,
    pub verified_assessments: u32,
    pub registered_assessors: usize,
    pub certified_assessors: usize,
    pub properties: usize,
}

#[derive(Clone, Debug)]
pub struct HousingRegistry {
    owner: AccountId,
    assessors: AssessorRegistry,
    ledger: AssessmentLedger,
    properties: PropertyIndex,
    verification: VerificationWorkflow,
    /// Events for committed operations, waiting to be drained.
    pending_events: Vec<RegistryEvent>,
}

impl HousingRegistry {
    /// Create an empty registry owned by `owner`.
    pub fn new(owner: AccountId) -> Result<Self, RegistryError> {
        if owner.is_zero() {
            return Err(RegistryError::InvalidConfiguration(format!(
                "owner identity {owner:?} is the zero identity"
            )));
        }
        Ok(Self {
            owner,
            assessors: AssessorRegistry::new(),
            ledger: AssessmentLedger::new(),
            properties: PropertyIndex::new(),
            verification: VerificationWorkflow,
            pending_events: Vec::new(),
        })
    }

    pub fn owner(&self) -> &AccountId {
        &self.owner
    }

    fn ensure_owner(&self, caller: &AccountId) -> Result<(), RegistryError> {
        if caller != &self.owner {
            return Err(RegistryError::NotAuthorized {
                caller: caller.clone(),
            });
        }
        Ok(())
    }

    // ── Mutations ───────────────────────────────────────────────────────

    /// Register `caller` as an assessor.
    pub fn register(&mut self, caller: &AccountId, now: Timestamp) -> Result<(), RegistryError> {
        self.assessors.register(caller, now)?;
        debug!(assessor = %caller, at = %now, "assessor registered");
        self.pending_events.push(RegistryEvent::AssessorRegistered {
            assessor: caller.clone(),
            at: now,
        });
        Ok(())
    }

    /// Certify a registered assessor (owner only).
    pub fn certify(&mut self, caller: &AccountId, target: &AccountId) -> Result<(), RegistryError> {
        self.ensure_owner(caller)?;
        self.assessors.certify(target)?;
        debug!(assessor = %target, "assessor certified");
        self.pending_events.push(RegistryEvent::AssessorCertified {
            assessor: target.clone(),
            certified_by: caller.clone(),
        });
        Ok(())
    }

    /// Submit an assessment of `property`.
    ///
    /// Checks, in order: caller registered, caller certified, scores in range.
    #[allow(clippy::too_many_arguments)]
    pub fn submit(
        &mut self,
        caller: &AccountId,
        structural: u32,
        safety: u32,
        utility: u32,
        location: u32,
        property: PropertyToken,
        now: Timestamp,
    ) -> Result<AssessmentId, RegistryError> {
        self.assessors.ensure_can_submit(caller)?;
        let scores = ScoreCard::new(structural, safety, utility, location)?;

        let id = self
            .ledger
            .append(caller.clone(), scores, property.clone(), now)?;
        self.assessors.record_submission(caller);
        self.properties.append(&property, id);

        debug!(%id, assessor = %caller, property = %property, "assessment submitted");
        self.pending_events.push(RegistryEvent::AssessmentSubmitted {
            id,
            assessor: caller.clone(),
            at: now,
        });
        Ok(id)
    }

    /// Verify a submitted assessment (owner only).
    pub fn verify(
        &mut self,
        caller: &AccountId,
        id: AssessmentId,
        now: Timestamp,
    ) -> Result<(), RegistryError> {
        self.ensure_owner(caller)?;
        let assessor =
            self.verification
                .verify(&mut self.ledger, &mut self.assessors, id, now)?;
        debug!(%id, %assessor, "assessment verified");
        self.pending_events.push(RegistryEvent::AssessmentVerified {
            id,
            verified_by: caller.clone(),
        });
        Ok(())
    }

    // ── Reads ───────────────────────────────────────────────────────────

    /// Trust profile of `id`; zero-valued for unknown identities.
    pub fn assessor_stats(&self, id: &AccountId) -> AssessorProfile {
        self.assessors.profile(id)
    }

    pub fn assessment_info(&self, id: AssessmentId) -> Result<AssessmentInfo, RegistryError> {
        self.ledger.info(id)
    }

    /// Full record including raw scores, readable regardless of verification.
    pub fn assessment(&self, id: AssessmentId) -> Result<&Assessment, RegistryError> {
        self.ledger.get(id).ok_or(RegistryError::NotFound(id))
    }

    /// Derived report; fails with `NotVerified` until the owner verifies `id`.
    pub fn quality_report(&self, id: AssessmentId) -> Result<QualityReport, RegistryError> {
        self.verification.quality_report(&self.ledger, id)
    }

    pub fn property_assessment_count(&self, property: &PropertyToken) -> usize {
        self.properties.count(property)
    }

    pub fn property_assessment_ids(&self, property: &PropertyToken) -> &[AssessmentId] {
        self.properties.ids(property)
    }

    pub fn total_assessments(&self) -> u32 {
        self.ledger.total()
    }

    pub fn next_assessment_id(&self) -> AssessmentId {
        self.ledger.next_id()
    }

    pub fn summary(&self) -> RegistrySummary {
        RegistrySummary {
            owner: self.owner.clone(),
            total_assessments: self.ledger.total(),
            verified_assessments: self.ledger.verified_count(),
            registered_assessors: self.assessors.registered_count(),
            certified_assessors: self.assessors.certified_count(),
            properties: self.properties.property_count(),
        }
    }

    /// Take all events queued since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<RegistryEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ── Persistence ─────────────────────────────────────────────────────

    /// Capture committed state. Undrained events are not part of a snapshot.
    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            version: SNAPSHOT_VERSION,
            owner: self.owner.clone(),
            next_id: self.ledger.next_id(),
            assessors: self
                .assessors
                .iter()
                .map(|(id, p)| (id.clone(), p.clone()))
                .collect(),
            assessments: self.ledger.iter().cloned().collect(),
            properties: self
                .properties
                .iter()
                .map(|(token, ids)| (token.clone(), ids.clone()))
                .collect(),
        }
    }

    /// Rebuild a registry from a snapshot, rejecting any snapshot that breaks
    /// a registry invariant.
    pub fn restore(snapshot: RegistrySnapshot) -> Result<Self, RegistryError> {
        snapshot.validate()?;
        Ok(Self {
            owner: snapshot.owner,
            assessors: AssessorRegistry::from_profiles(snapshot.assessors),
            ledger: AssessmentLedger::from_parts(snapshot.next_id, snapshot.assessments),
            properties: PropertyIndex::from_entries(snapshot.properties),
            verification: VerificationWorkflow,
            pending_events: Vec::new(),
        })
    }
}
