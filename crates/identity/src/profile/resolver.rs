//! Profile resolution orchestration.

use clove_core::{Profile, Role, SessionAccount};

use crate::api::MarketplaceApi;

use super::normalize;

/// Resolves `(account, role)` pairs into canonical profiles.
///
/// One upstream call per resolution, no retry, no cache: each of the three
/// surfaces that needs a profile asks again, so none of them can go stale
/// behind another. The contract is total - `resolve` always yields a
/// [`Profile`], whatever upstream or the caller hands it.
pub struct ProfileResolver<A> {
    api: A,
}

impl<A: MarketplaceApi> ProfileResolver<A> {
    /// Create a resolver over the given API handle.
    pub const fn new(api: A) -> Self {
        Self { api }
    }

    /// Resolve a profile for an opaque account id and a role tag.
    ///
    /// An unknown role tag is not an error: it is logged and absorbed into
    /// a default profile labeled "User", so no surface can crash on a tag
    /// it does not recognize.
    pub async fn resolve(&self, account_id: &str, role_tag: &str) -> Profile {
        match Role::from_tag(role_tag) {
            Ok(role) => self.resolve_role(account_id, role).await,
            Err(err) => {
                tracing::warn!(%err, "unknown role tag; resolving to default profile");
                normalize(account_id.trim(), Role::Customer, None)
            }
        }
    }

    /// Resolve a profile for an already-authenticated session account.
    pub async fn resolve_account(&self, account: &SessionAccount) -> Profile {
        self.resolve_role(account.id.as_str(), account.role).await
    }

    async fn resolve_role(&self, account_id: &str, role: Role) -> Profile {
        let account_id = account_id.trim();
        if account_id.is_empty() {
            // Nothing meaningful to send upstream; skip the call entirely.
            tracing::warn!(%role, "empty account id; resolving to default profile");
            return normalize(account_id, role, None);
        }

        match self.api.fetch_profile(role, account_id).await {
            Ok(response) if response.success => match response.records.first() {
                Some(record) => normalize(account_id, role, Some(record)),
                None => {
                    tracing::warn!(%role, account_id, "profile lookup matched no records");
                    normalize(account_id, role, None)
                }
            },
            Ok(_) => {
                tracing::warn!(%role, account_id, "profile lookup rejected by upstream");
                normalize(account_id, role, None)
            }
            Err(err) => {
                tracing::warn!(%role, account_id, %err, "profile lookup failed");
                normalize(account_id, role, None)
            }
        }
    }
}
