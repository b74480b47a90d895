//! Account identifiers.

use crate::error::StakedaoError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An account on the ledger: a holder, the deployer, or an engine's custody account.
///
/// Identifiers are opaque strings. The only structural rule is that they are
/// non-empty and carry no surrounding whitespace.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    /// Create an account identifier from a raw string.
    ///
    /// # Panics
    /// Panics if the string is not a valid identifier. Use [`AccountId::parse`]
    /// for untrusted input.
    pub fn new(raw: impl Into<String>) -> Self {
        match Self::parse(raw) {
            Ok(id) => id,
            Err(e) => panic!("{e}"),
        }
    }

    /// Validate and create an account identifier.
    pub fn parse(raw: impl Into<String>) -> Result<Self, StakedaoError> {
        let s = raw.into();
        if s.is_empty() || s.trim() != s {
            return Err(StakedaoError::InvalidAccount(s));
        }
        Ok(Self(s))
    }

    /// Return the raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AccountId {
    type Err = StakedaoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AccountId {
    type Error = StakedaoError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_plain_names() {
        let id = AccountId::parse("alice").unwrap();
        assert_eq!(id.as_str(), "alice");
        assert_eq!(id.to_string(), "alice");
    }

    #[test]
    fn parse_rejects_empty_and_padded() {
        assert!(AccountId::parse("").is_err());
        assert!(AccountId::parse(" bob").is_err());
        assert!(AccountId::parse("bob\n").is_err());
    }

    #[test]
    #[should_panic]
    fn new_panics_on_invalid() {
        let _ = AccountId::new("");
    }

    #[test]
    fn serde_rejects_invalid_identifier() {
        let ok: AccountId = serde_json::from_str("\"carol\"").unwrap();
        assert_eq!(ok, AccountId::new("carol"));
        assert!(serde_json::from_str::<AccountId>("\"\"").is_err());
    }
}
