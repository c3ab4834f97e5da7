//! Clove Market identity & profile resolution core.
//!
//! The marketplace UI is almost entirely presentational; the logic that
//! actually has state to track and failure modes to handle lives here:
//!
//! - [`verification`] - the password-recovery state machine
//!   (identity confirmation → OTP entry → password reset → success)
//! - [`profile`] - role-polymorphic profile resolution over three
//!   heterogeneous upstream record shapes, with deterministic fallback
//! - [`session`] - the persisted authenticated-account holder
//! - [`api`] - the boundary to the remote marketplace API
//!
//! UI surfaces (avatar menu, profile viewer, settings, the recovery
//! modals) hold no logic of their own: they render the state these types
//! expose and invoke the matching operation.
//!
//! # Example
//!
//! ```rust,ignore
//! use clove_identity::api::HttpMarketplaceApi;
//! use clove_identity::config::IdentityConfig;
//! use clove_identity::profile::ProfileResolver;
//!
//! let config = IdentityConfig::from_env()?;
//! let api = HttpMarketplaceApi::new(&config);
//! let resolver = ProfileResolver::new(api);
//!
//! // Always yields a fully populated profile, whatever upstream does.
//! let profile = resolver.resolve("acct_8f3b", "shop-owner").await;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod profile;
pub mod session;
pub mod verification;

#[cfg(test)]
pub(crate) mod testing;
