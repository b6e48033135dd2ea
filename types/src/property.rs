//! Opaque property token.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Groups assessments of the same real-world property.
///
/// The token is typically an encrypted property identifier produced off-line;
/// the registry only compares tokens for equality. Empty tokens are valid.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PropertyToken(String);

impl PropertyToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PropertyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PropertyToken {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PropertyToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}
