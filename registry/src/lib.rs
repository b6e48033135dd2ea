//! Permissioned registry of housing quality assessments.
//!
//! Two-tier assessor trust:
//! 1. **Registration**: any identity may register itself once.
//! 2. **Certification**: the owner elevates a registered assessor to a trusted submitter.
//!
//! Certified assessors submit scored assessments of a property (identified only
//! by an opaque token). The owner then **verifies** an assessment, which
//! unlocks its derived quality report.
//!
//! All state lives in one [`HousingRegistry`] aggregate. Every operation either
//! commits completely or returns an error without touching state.

pub mod assessor;
pub mod error;
pub mod event;
pub mod ledger;
pub mod property_index;
pub mod registry;
pub mod report;
pub mod score;
pub mod snapshot;
pub mod verification;

pub use assessor::{AssessorProfile, AssessorRegistry};
pub use error::RegistryError;
pub use event::RegistryEvent;
pub use ledger::{Assessment, AssessmentInfo, AssessmentLedger};
pub use property_index::PropertyIndex;
pub use registry::{HousingRegistry, RegistrySummary};
pub use report::QualityReport;
pub use score::{ScoreCard, ScoreField, ISSUE_THRESHOLD, MAX_SCORE, MIN_SCORE};
pub use snapshot::{RegistrySnapshot, SNAPSHOT_VERSION};
pub use verification::VerificationWorkflow;
