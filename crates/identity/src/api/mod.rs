//! Marketplace API boundary.
//!
//! The identity core consumes four logical upstream operations: three
//! recovery steps and one role-keyed profile fetch. [`MarketplaceApi`] is
//! the seam those operations cross; [`HttpMarketplaceApi`] is the real
//! transport, and the flow/resolver tests drive the core through scripted
//! stand-ins instead.
//!
//! Upstream speaks a `{ success, message?, data? }` envelope on every
//! endpoint. A `success: false` payload is an ordinary, expected answer
//! (wrong OTP, unknown email); only transport-level trouble surfaces as
//! [`ApiError`].

mod http;
mod records;

pub use http::HttpMarketplaceApi;
pub use records::{CustomerRecord, GalleryItem, ShopRecord, StaffRecord, UpstreamRecord};

use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use clove_core::Role;

/// Errors that can occur when talking to the marketplace API.
///
/// These cover transport only. Upstream saying "no" is not an error; it
/// arrives as `success: false` inside a well-formed response.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (connect, timeout, or body decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success HTTP status.
    #[error("unexpected status {status}: {body}")]
    Status {
        /// The HTTP status code.
        status: reqwest::StatusCode,
        /// Response body, for diagnostics.
        body: String,
    },
}

/// Result envelope for the three recovery operations.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    /// Whether the operation succeeded, as the payload declares it.
    pub success: bool,
    /// Optional human-readable message from the server.
    #[serde(default)]
    pub message: Option<String>,
}

impl StatusResponse {
    /// A plain success with no message.
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    /// A rejection carrying a server message.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// Result envelope for a profile fetch.
#[derive(Debug, Clone)]
pub struct RecordsResponse {
    /// Whether the lookup succeeded, as the payload declares it.
    pub success: bool,
    /// Matched records; the first one wins.
    pub records: Vec<UpstreamRecord>,
}

/// The four logical operations the remote marketplace API provides.
///
/// Implementations decide transport; the per-role endpoint and payload-key
/// bindings are an upstream constraint and live with the HTTP
/// implementation.
#[allow(async_fn_in_trait)] // consumed through generics, never boxed
pub trait MarketplaceApi {
    /// Begin a password-recovery attempt for `email`.
    ///
    /// Also used verbatim for OTP resends.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure.
    async fn begin_recovery(&self, email: &str, role_tag: &str)
    -> Result<StatusResponse, ApiError>;

    /// Check the OTP the user entered for `email`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure.
    async fn verify_otp(&self, email: &str, otp: &str) -> Result<StatusResponse, ApiError>;

    /// Set a new password for `email` after a verified OTP.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure.
    async fn reset_password(
        &self,
        email: &str,
        new_password: &str,
    ) -> Result<StatusResponse, ApiError>;

    /// Fetch the profile records matching `account_id` for `role`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure.
    async fn fetch_profile(
        &self,
        role: Role,
        account_id: &str,
    ) -> Result<RecordsResponse, ApiError>;
}

impl<T: MarketplaceApi> MarketplaceApi for Arc<T> {
    async fn begin_recovery(
        &self,
        email: &str,
        role_tag: &str,
    ) -> Result<StatusResponse, ApiError> {
        (**self).begin_recovery(email, role_tag).await
    }

    async fn verify_otp(&self, email: &str, otp: &str) -> Result<StatusResponse, ApiError> {
        (**self).verify_otp(email, otp).await
    }

    async fn reset_password(
        &self,
        email: &str,
        new_password: &str,
    ) -> Result<StatusResponse, ApiError> {
        (**self).reset_password(email, new_password).await
    }

    async fn fetch_profile(
        &self,
        role: Role,
        account_id: &str,
    ) -> Result<RecordsResponse, ApiError> {
        (**self).fetch_profile(role, account_id).await
    }
}
