//! Score model: the four validated sub-scores of an assessment.

use crate::error::RegistryError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest accepted sub-score.
pub const MIN_SCORE: u32 = 0;
/// Highest accepted sub-score.
pub const MAX_SCORE: u32 = 100;
/// A sub-score strictly below this value flags an issue.
pub const ISSUE_THRESHOLD: u32 = 50;

/// Names one of the four sub-scores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreField {
    Structural,
    Safety,
    Utility,
    Location,
}

impl ScoreField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Structural => "structural",
            Self::Safety => "safety",
            Self::Utility => "utility",
            Self::Location => "location",
        }
    }
}

impl fmt::Display for ScoreField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Four sub-scores, each in `MIN_SCORE..=MAX_SCORE`.
///
/// Only constructible through [`ScoreCard::new`], so a `ScoreCard` in hand is
/// always in range. Deserialized cards are re-checked by snapshot restore.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    structural: u32,
    safety: u32,
    utility: u32,
    location: u32,
}

impl ScoreCard {
    /// Validate and build a score card.
    ///
    /// Fields are checked in order structural, safety, utility, location; the
    /// first one out of range is reported.
    pub fn new(
        structural: u32,
        safety: u32,
        utility: u32,
        location: u32,
    ) -> Result<Self, RegistryError> {
        let card = Self {
            structural,
            safety,
            utility,
            location,
        };
        card.validate()?;
        Ok(card)
    }

    pub(crate) fn validate(&self) -> Result<(), RegistryError> {
        for (field, value) in self.fields() {
            if !(MIN_SCORE..=MAX_SCORE).contains(&value) {
                return Err(RegistryError::ScoreOutOfRange { field, value });
            }
        }
        Ok(())
    }

    pub fn structural(&self) -> u32 {
        self.structural
    }

    pub fn safety(&self) -> u32 {
        self.safety
    }

    pub fn utility(&self) -> u32 {
        self.utility
    }

    pub fn location(&self) -> u32 {
        self.location
    }

    /// The four sub-scores paired with their field names, in canonical order.
    pub fn fields(&self) -> [(ScoreField, u32); 4] {
        [
            (ScoreField::Structural, self.structural),
            (ScoreField::Safety, self.safety),
            (ScoreField::Utility, self.utility),
            (ScoreField::Location, self.location),
        ]
    }

    /// Mean of the four sub-scores, rounded to the nearest integer.
    ///
    /// Exact halves round to the even neighbour: 82.5 → 82, 88.75 → 89.
    pub fn overall(&self) -> u32 {
        let sum = self.structural + self.safety + self.utility + self.location;
        let quotient = sum / 4;
        match sum % 4 {
            0 | 1 => quotient,
            2 if quotient % 2 == 0 => quotient,
            _ => quotient + 1,
        }
    }

    pub fn has_structural_issues(&self) -> bool {
        self.structural < ISSUE_THRESHOLD
    }

    pub fn has_safety_issues(&self) -> bool {
        self.safety < ISSUE_THRESHOLD
    }

    pub fn has_utility_issues(&self) -> bool {
        self.utility < ISSUE_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        assert!(ScoreCard::new(0, 0, 0, 0).is_ok());
        assert!(ScoreCard::new(100, 100, 100, 100).is_ok());
    }

    #[test]
    fn above_max_rejected() {
        let err = ScoreCard::new(101, 50, 50, 50).unwrap_err();
        assert_eq!(
            err,
            RegistryError::ScoreOutOfRange {
                field: ScoreField::Structural,
                value: 101
            }
        );
    }

    #[test]
    fn first_offending_field_reported() {
        let err = ScoreCard::new(50, 50, 200, 300).unwrap_err();
        assert_eq!(
            err,
            RegistryError::ScoreOutOfRange {
                field: ScoreField::Utility,
                value: 200
            }
        );
    }

    #[test]
    fn overall_rounds_to_nearest() {
        // 355 / 4 = 88.75
        assert_eq!(ScoreCard::new(90, 92, 88, 85).unwrap().overall(), 89);
        // 128 / 4 = 32
        assert_eq!(ScoreCard::new(25, 28, 40, 35).unwrap().overall(), 32);
        // 281 / 4 = 70.25
        assert_eq!(ScoreCard::new(70, 75, 72, 64).unwrap().overall(), 70);
    }

    #[test]
    fn overall_ties_round_to_even() {
        // 330 / 4 = 82.5
        assert_eq!(ScoreCard::new(85, 90, 75, 80).unwrap().overall(), 82);
        // 334 / 4 = 83.5
        assert_eq!(ScoreCard::new(85, 90, 75, 84).unwrap().overall(), 84);
    }

    #[test]
    fn overall_extremes() {
        assert_eq!(ScoreCard::new(0, 0, 0, 0).unwrap().overall(), 0);
        assert_eq!(ScoreCard::new(100, 100, 100, 100).unwrap().overall(), 100);
    }

    #[test]
    fn issue_flags_use_strict_threshold() {
        let at = ScoreCard::new(50, 50, 50, 0).unwrap();
        assert!(!at.has_structural_issues());
        assert!(!at.has_safety_issues());
        assert!(!at.has_utility_issues());

        let below = ScoreCard::new(49, 49, 49, 100).unwrap();
        assert!(below.has_structural_issues());
        assert!(below.has_safety_issues());
        assert!(below.has_utility_issues());
    }

    #[test]
    fn field_display_names() {
        assert_eq!(ScoreField::Location.to_string(), "location");
    }
}
