//! Strongly-typed identifiers for domain entities
//!
//! Claim identifiers are handed out from a persisted counter rather than
//! generated randomly, so they are plain positive integers. They travel as
//! strings of decimal digits on the wire and in storage.

use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Identifier of a claim draft
///
/// Serialises as a string. Reads also accept a bare JSON number, which is
/// how records written by the earlier form stored it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "String")]
pub struct ClaimId(u64);

impl ClaimId {
    /// Creates an identifier from a counter value
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the identifier following a counter value (`last + 1`),
    /// or `None` once the counter is exhausted
    pub fn after(last_used: u64) -> Option<Self> {
        last_used.checked_add(1).map(Self)
    }

    /// Returns the underlying counter value
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Returns the identifier prefix for display in reference numbers
    pub fn prefix() -> &'static str {
        "CLM"
    }

    /// Human-facing reference, e.g. `CLM-000042`
    pub fn reference(&self) -> String {
        format!("{}-{:06}", Self::prefix(), self.0)
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ClaimId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept the reference form as well as the bare number
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("CLM-")
            .unwrap_or(trimmed);
        digits
            .parse::<u64>()
            .map(Self)
            .map_err(|_| CoreError::validation(format!("Invalid claim id: {}", s)))
    }
}

impl TryFrom<String> for ClaimId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawClaimId {
    Number(u64),
    Text(String),
}

impl<'de> Deserialize<'de> for ClaimId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawClaimId::deserialize(deserializer)? {
            RawClaimId::Number(value) => Ok(Self(value)),
            RawClaimId::Text(text) => text.parse().map_err(de::Error::custom),
        }
    }
}

impl From<ClaimId> for String {
    fn from(id: ClaimId) -> String {
        id.to_string()
    }
}

impl From<u64> for ClaimId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_id_display() {
        assert_eq!(ClaimId::new(42).to_string(), "42");
        assert_eq!(ClaimId::new(42).reference(), "CLM-000042");
    }

    #[test]
    fn test_id_parsing() {
        let parsed: ClaimId = "17".parse().unwrap();
        assert_eq!(parsed, ClaimId::new(17));

        let from_reference: ClaimId = "CLM-000017".parse().unwrap();
        assert_eq!(from_reference, parsed);
    }

    #[test]
    fn test_after_counter() {
        assert_eq!(ClaimId::after(0), Some(ClaimId::new(1)));
        assert_eq!(ClaimId::after(9), Some(ClaimId::new(10)));
    }

    #[test]
    fn test_exhausted_counter_has_no_next_id() {
        assert_eq!(ClaimId::after(u64::MAX), None);
    }
}
