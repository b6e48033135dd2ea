//! Quality report: derived on demand from a verified assessment, never stored.

use crate::ledger::Assessment;
use hqa_types::Timestamp;
use serde::{Deserialize, Serialize};

/// The public summary of a verified assessment.
///
/// Location has no issue flag; it only contributes to the overall score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityReport {
    pub overall_score: u32,
    pub has_structural_issues: bool,
    pub has_safety_issues: bool,
    pub has_utility_issues: bool,
    /// When the assessment was verified.
    pub report_time: Timestamp,
}

impl QualityReport {
    /// Derive the report for an assessment.
    ///
    /// Returns `None` while the assessment is unverified.
    pub fn derive(assessment: &Assessment) -> Option<Self> {
        let report_time = assessment.verified_at?;
        let scores = &assessment.scores;
        Some(Self {
            overall_score: scores.overall(),
            has_structural_issues: scores.has_structural_issues(),
            has_safety_issues: scores.has_safety_issues(),
            has_utility_issues: scores.has_utility_issues(),
            report_time,
        })
    }

    /// Whether any flagged category fell below the issue threshold.
    pub fn has_any_issue(&self) -> bool {
        self.has_structural_issues || self.has_safety_issues || self.has_utility_issues
    }
}
