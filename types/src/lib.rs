//! Fundamental types for the housing quality assessment registry.
//!
//! This crate defines the identifiers shared by every other crate in the
//! workspace: account identities, assessment ids, property tokens, and
//! timestamps plus the clock abstraction that produces them.

pub mod account;
pub mod assessment_id;
pub mod error;
pub mod property;
pub mod time;

pub use account::AccountId;
pub use assessment_id::AssessmentId;
pub use error::TypesError;
pub use property::PropertyToken;
pub use time::{Clock, SystemClock, Timestamp};
