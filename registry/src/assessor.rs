//! Assessor registry: trust profiles and the registration → certification ladder.

use crate::error::RegistryError;
use hqa_types::{AccountId, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Trust profile of one identity.
///
/// Identities that never registered read as `AssessorProfile::default()`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessorProfile {
    pub is_registered: bool,
    /// Implies `is_registered`.
    pub is_certified: bool,
    pub total_assessments: u64,
    /// Never exceeds `total_assessments`.
    pub verified_assessments: u64,
    /// Set once on registration; `Timestamp::EPOCH` until then.
    pub registration_time: Timestamp,
}

/// Mapping from identity to trust profile.
#[derive(Clone, Debug, Default)]
pub struct AssessorRegistry {
    profiles: HashMap<AccountId, AssessorProfile>,
}

impl AssessorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Profile for `id`, zero-valued if the identity was never seen.
    pub fn profile(&self, id: &AccountId) -> AssessorProfile {
        self.profiles.get(id).cloned().unwrap_or_default()
    }

    /// Register `caller` as an assessor.
    pub fn register(&mut self, caller: &AccountId, now: Timestamp) -> Result<(), RegistryError> {
        let profile = self.profiles.entry(caller.clone()).or_default();
        if profile.is_registered {
            return Err(RegistryError::AlreadyRegistered(caller.clone()));
        }
        profile.is_registered = true;
        profile.registration_time = now;
        Ok(())
    }

    /// Certify a registered assessor. Owner authorization is checked by the caller.
    pub fn certify(&mut self, target: &AccountId) -> Result<(), RegistryError> {
        let profile = match self.profiles.get_mut(target) {
            Some(p) if p.is_registered => p,
            _ => return Err(RegistryError::NotRegistered(target.clone())),
        };
        if profile.is_certified {
            return Err(RegistryError::AlreadyCertified(target.clone()));
        }
        profile.is_certified = true;
        Ok(())
    }

    /// Check that `caller` may submit: registered first, then certified.
    pub fn ensure_can_submit(&self, caller: &AccountId) -> Result<(), RegistryError> {
        let profile = self.profiles.get(caller);
        if !profile.is_some_and(|p| p.is_registered) {
            return Err(RegistryError::NotRegistered(caller.clone()));
        }
        if !profile.is_some_and(|p| p.is_certified) {
            return Err(RegistryError::NotCertified(caller.clone()));
        }
        Ok(())
    }

    pub(crate) fn record_submission(&mut self, assessor: &AccountId) {
        self.profiles
            .entry(assessor.clone())
            .or_default()
            .total_assessments += 1;
    }

    pub(crate) fn record_verification(&mut self, assessor: &AccountId) {
        self.profiles
            .entry(assessor.clone())
            .or_default()
            .verified_assessments += 1;
    }

    pub fn registered_count(&self) -> usize {
        self.profiles.values().filter(|p| p.is_registered).count()
    }

    pub fn certified_count(&self) -> usize {
        self.profiles.values().filter(|p| p.is_certified).count()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&AccountId, &AssessorProfile)> {
        self.profiles.iter()
    }

    pub(crate) fn from_profiles(
        profiles: impl IntoIterator<Item = (AccountId, AssessorProfile)>,
    ) -> Self {
        Self {
            profiles: profiles.into_iter().collect(),
        }
    }
}
