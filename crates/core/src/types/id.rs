//! Opaque account identifier.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`AccountId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountIdError {
    /// The input string is empty or whitespace-only.
    #[error("account id cannot be empty")]
    Empty,
}

/// An opaque account identifier assigned by the upstream API.
///
/// The id is never inspected by this codebase; it is carried as-is into
/// request payloads and back out of responses. The only guarantee the
/// newtype provides is non-emptiness.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Parse an `AccountId` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`AccountIdError::Empty`] if the input is empty or contains
    /// only whitespace.
    pub fn parse(s: &str) -> Result<Self, AccountIdError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AccountIdError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `AccountId` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for AccountId {
    type Err = AccountIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
