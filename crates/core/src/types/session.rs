//! Session-related types.
//!
//! The minimal identity persisted for the logged-in account.

use serde::{Deserialize, Serialize};

use super::{AccountId, Role};

/// The authenticated account as the session store persists it.
///
/// Created on successful login or registration, replaced wholesale on a
/// role-changing login, destroyed on logout. This is the required input to
/// profile resolution, not a profile itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionAccount {
    /// Upstream account identifier.
    pub id: AccountId,
    /// The role this account authenticated as.
    pub role: Role,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_roundtrip() {
        let account = SessionAccount {
            id: AccountId::parse("acct_7").unwrap(),
            role: Role::ShopOwner,
        };

        let json = serde_json::to_string(&account).unwrap();
        assert_eq!(json, r#"{"id":"acct_7","role":"shop-owner"}"#);

        let parsed: SessionAccount = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, account);
    }
}
