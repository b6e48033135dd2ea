//! Sequential assessment identifiers.

use crate::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a submitted assessment.
///
/// Allocated sequentially starting at [`AssessmentId::FIRST`]; zero is never
/// a valid allocated id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssessmentId(u32);

impl AssessmentId {
    /// The first id handed out by a fresh registry.
    pub const FIRST: Self = Self(1);

    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn get(&self) -> u32 {
        self.0
    }

    /// The id allocated after this one.
    pub fn next(&self) -> Result<Self, TypesError> {
        self.0
            .checked_add(1)
            .map(Self)
            .ok_or(TypesError::IdSpaceExhausted)
    }
}

impl fmt::Display for AssessmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
