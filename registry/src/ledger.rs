//! Assessment ledger: append-only store of submitted assessments.

use crate::error::RegistryError;
use crate::score::ScoreCard;
use hqa_types::{AccountId, AssessmentId, PropertyToken, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One submitted assessment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: AssessmentId,
    /// The certified assessor who submitted it.
    pub assessor: AccountId,
    pub scores: ScoreCard,
    /// Opaque (typically encrypted) property identifier.
    pub property: PropertyToken,
    /// Submission time.
    pub timestamp: Timestamp,
    pub is_verified: bool,
    /// True from submission onward; there is no in-progress state.
    pub is_completed: bool,
    /// Verification time, present iff `is_verified`.
    pub verified_at: Option<Timestamp>,
}

/// Public metadata of an assessment, without its scores.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentInfo {
    pub assessor: AccountId,
    pub timestamp: Timestamp,
    pub is_verified: bool,
    pub is_completed: bool,
    pub property: PropertyToken,
}

impl From<&Assessment> for AssessmentInfo {
    fn from(a: &Assessment) -> Self {
        Self {
            assessor: a.assessor.clone(),
            timestamp: a.timestamp,
            is_verified: a.is_verified,
            is_completed: a.is_completed,
            property: a.property.clone(),
        }
    }
}

/// Owns every assessment, keyed by sequentially allocated id.
#[derive(Clone, Debug)]
pub struct AssessmentLedger {
    next_id: AssessmentId,
    entries: BTreeMap<AssessmentId, Assessment>,
}

impl Default for AssessmentLedger {
    fn default() -> Self {
        Self {
            next_id: AssessmentId::FIRST,
            entries: BTreeMap::new(),
        }
    }
}

impl AssessmentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// The id the next submission will receive.
    pub fn next_id(&self) -> AssessmentId {
        self.next_id
    }

    /// Store a new assessment and return its id.
    ///
    /// The counter is only advanced once the successor id is known to exist,
    /// so an exhausted id space leaves the ledger untouched.
    pub(crate) fn append(
        &mut self,
        assessor: AccountId,
        scores: ScoreCard,
        property: PropertyToken,
        now: Timestamp,
    ) -> Result<AssessmentId, RegistryError> {
        let id = self.next_id;
        let following = id.next()?;
        self.entries.insert(
            id,
            Assessment {
                id,
                assessor,
                scores,
                property,
                timestamp: now,
                is_verified: false,
                is_completed: true,
                verified_at: None,
            },
        );
        self.next_id = following;
        Ok(id)
    }

    pub fn get(&self, id: AssessmentId) -> Option<&Assessment> {
        self.entries.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: AssessmentId) -> Option<&mut Assessment> {
        self.entries.get_mut(&id)
    }

    /// Metadata for `id`, or `NotFound` if it was never allocated.
    pub fn info(&self, id: AssessmentId) -> Result<AssessmentInfo, RegistryError> {
        self.get(id)
            .map(AssessmentInfo::from)
            .ok_or(RegistryError::NotFound(id))
    }

    /// Number of assessments ever submitted (`next_id - 1`).
    pub fn total(&self) -> u32 {
        self.next_id.get() - 1
    }

    /// Never exceeds [`total`](Self::total), so it shares its width.
    pub fn verified_count(&self) -> u32 {
        self.entries
            .values()
            .fold(0, |n, a| if a.is_verified { n + 1 } else { n })
    }

    /// All assessments in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Assessment> {
        self.entries.values()
    }

    pub(crate) fn from_parts(next_id: AssessmentId, assessments: Vec<Assessment>) -> Self {
        Self {
            next_id,
            entries: assessments.into_iter().map(|a| (a.id, a)).collect(),
        }
    }
}
