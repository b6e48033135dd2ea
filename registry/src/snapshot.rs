//! Serializable registry state for persistence across restarts.

use crate::assessor::AssessorProfile;
use crate::error::RegistryError;
use crate::ledger::Assessment;
use hqa_types::{AccountId, AssessmentId, PropertyToken, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Bumped whenever the snapshot layout changes.
pub const SNAPSHOT_VERSION: u16 = 1;

/// Full committed state of a [`crate::HousingRegistry`].
///
/// Ordered maps keep the encoding deterministic for identical state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub version: u16,
    pub owner: AccountId,
    pub next_id: AssessmentId,
    pub assessors: BTreeMap<AccountId, AssessorProfile>,
    /// In id order.
    pub assessments: Vec<Assessment>,
    pub properties: BTreeMap<PropertyToken, Vec<AssessmentId>>,
}

fn invalid(reason: impl Into<String>) -> RegistryError {
    RegistryError::InvalidSnapshot(reason.into())
}

impl RegistrySnapshot {
    pub fn to_bytes(&self) -> Result<Vec<u8>, RegistryError> {
        bincode::serialize(self).map_err(|e| RegistryError::Serialization(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RegistryError> {
        bincode::deserialize(bytes).map_err(|e| RegistryError::Serialization(e.to_string()))
    }

    /// Check every registry invariant against this snapshot.
    pub fn validate(&self) -> Result<(), RegistryError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(invalid(format!(
                "unsupported snapshot version {} (expected {SNAPSHOT_VERSION})",
                self.version
            )));
        }
        if self.owner.is_zero() {
            return Err(invalid("owner is the zero identity"));
        }
        if self.next_id.get() == 0 {
            return Err(invalid("next assessment id is zero"));
        }
        if self.assessments.len() as u64 != u64::from(self.next_id.get() - 1) {
            return Err(invalid(format!(
                "{} assessments stored but next id is {}",
                self.assessments.len(),
                self.next_id
            )));
        }

        let mut credited: HashMap<&AccountId, (u64, u64)> = HashMap::new();
        for (position, a) in self.assessments.iter().enumerate() {
            let expected = AssessmentId::new(position as u32 + 1);
            if a.id != expected {
                return Err(invalid(format!("assessment {} stored at {expected}", a.id)));
            }
            a.scores
                .validate()
                .map_err(|e| invalid(format!("assessment {}: {e}", a.id)))?;
            if !a.is_completed {
                return Err(invalid(format!("assessment {} is not completed", a.id)));
            }
            if a.is_verified != a.verified_at.is_some() {
                return Err(invalid(format!(
                    "assessment {} verification flag disagrees with its verification time",
                    a.id
                )));
            }
            if !self
                .assessors
                .get(&a.assessor)
                .is_some_and(|p| p.is_certified)
            {
                return Err(invalid(format!(
                    "assessment {} submitted by uncertified {}",
                    a.id, a.assessor
                )));
            }
            let counts = credited.entry(&a.assessor).or_default();
            counts.0 += 1;
            if a.is_verified {
                counts.1 += 1;
            }
        }

        for (id, p) in &self.assessors {
            if p.is_certified && !p.is_registered {
                return Err(invalid(format!("{id} is certified but not registered")));
            }
            if !p.is_registered && p.registration_time != Timestamp::EPOCH {
                return Err(invalid(format!("{id} has a registration time but is not registered")));
            }
            let (total, verified) = credited.get(id).copied().unwrap_or_default();
            if p.total_assessments != total || p.verified_assessments != verified {
                return Err(invalid(format!(
                    "{id} counters ({}, {}) disagree with ledger ({total}, {verified})",
                    p.total_assessments, p.verified_assessments
                )));
            }
        }

        let mut indexed = 0usize;
        for (token, ids) in &self.properties {
            if ids.is_empty() {
                return Err(invalid(format!("empty index entry for property {token:?}")));
            }
            if !ids.windows(2).all(|w| w[0] < w[1]) {
                return Err(invalid(format!(
                    "index entry for property {token:?} is not in submission order"
                )));
            }
            for id in ids {
                let slot = (id.get() as usize).checked_sub(1);
                match slot.and_then(|i| self.assessments.get(i)) {
                    Some(a) if &a.property == token => {}
                    _ => {
                        return Err(invalid(format!(
                            "index entry for property {token:?} references {id} which is not an assessment of it"
                        )))
                    }
                }
            }
            indexed += ids.len();
        }
        if indexed != self.assessments.len() {
            return Err(invalid(format!(
                "{indexed} indexed assessments but {} stored",
                self.assessments.len()
            )));
        }

        Ok(())
    }
}
