//! Account identity type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An identity that can call into the registry: the owner, an assessor,
/// or any reader.
///
/// The registry never interprets the string beyond equality and the
/// zero-identity check; signing and address derivation happen upstream.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Create an identity from a raw string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Return the raw identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the zero/null identity.
    ///
    /// Empty strings, runs of `0`, and `0x`-prefixed runs of `0` all count.
    pub fn is_zero(&self) -> bool {
        let s = self.0.trim();
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        digits.chars().all(|c| c == '0')
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
