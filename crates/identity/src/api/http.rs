//! HTTP implementation of the marketplace API.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use clove_core::Role;

use crate::config::IdentityConfig;

use super::records::{CustomerRecord, ShopRecord, StaffRecord, UpstreamRecord};
use super::{ApiError, MarketplaceApi, RecordsResponse, StatusResponse};

/// Generic wire envelope for endpoints that return matched records.
#[derive(Debug, Deserialize)]
struct RecordsEnvelope<T> {
    success: bool,
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

/// Client for the remote marketplace API.
///
/// Cheaply cloneable; the `reqwest` client and credentials live behind an
/// `Arc`.
#[derive(Clone)]
pub struct HttpMarketplaceApi {
    inner: Arc<HttpMarketplaceApiInner>,
}

struct HttpMarketplaceApiInner {
    client: reqwest::Client,
    base_url: url::Url,
    api_token: String,
}

impl HttpMarketplaceApi {
    /// Create a new marketplace API client.
    #[must_use]
    pub fn new(config: &IdentityConfig) -> Self {
        Self {
            inner: Arc::new(HttpMarketplaceApiInner {
                client: reqwest::Client::new(),
                base_url: config.api_base_url.clone(),
                api_token: config.api_token.expose_secret().to_owned(),
            }),
        }
    }

    /// POST a JSON body and deserialize the JSON response.
    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, ApiError> {
        let url = self
            .inner
            .base_url
            .join(path)
            .map_err(|_| ApiError::Status {
                status: reqwest::StatusCode::BAD_REQUEST,
                body: format!("invalid endpoint path: {path}"),
            })?;

        let response = self
            .inner
            .client
            .post(url)
            .header("X-Api-Key", &self.inner.api_token)
            .header("User-Agent", "CloveMarket/1.0")
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        Ok(response.json().await?)
    }

    async fn fetch_records<T>(
        &self,
        path: &str,
        payload_key: &str,
        account_id: &str,
        wrap: fn(T) -> UpstreamRecord,
    ) -> Result<RecordsResponse, ApiError>
    where
        T: DeserializeOwned,
    {
        let body = json!({ payload_key: account_id });
        let envelope: RecordsEnvelope<T> = self.post(path, &body).await?;
        Ok(RecordsResponse {
            success: envelope.success,
            records: envelope.data.into_iter().map(wrap).collect(),
        })
    }
}

/// Per-role profile endpoint binding: (path, payload key).
///
/// Each role has a distinct endpoint identity and a distinct request-key
/// name. Upstream imposes this; do not "simplify" it to one endpoint.
const fn profile_binding(role: Role) -> (&'static str, &'static str) {
    match role {
        Role::Customer => ("api/customer/matched-user", "userId"),
        Role::DeliveryStaff => ("api/delivery/matched-staff", "staffId"),
        Role::ShopOwner => ("api/shop/matched-shop", "shopId"),
    }
}

impl MarketplaceApi for HttpMarketplaceApi {
    async fn begin_recovery(
        &self,
        email: &str,
        role_tag: &str,
    ) -> Result<StatusResponse, ApiError> {
        let body = json!({ "email": email, "role": role_tag });
        self.post("api/auth/forgot-password", &body).await
    }

    async fn verify_otp(&self, email: &str, otp: &str) -> Result<StatusResponse, ApiError> {
        let body = json!({ "email": email, "otp": otp });
        self.post("api/auth/verify-otp", &body).await
    }

    async fn reset_password(
        &self,
        email: &str,
        new_password: &str,
    ) -> Result<StatusResponse, ApiError> {
        let body = json!({ "email": email, "password": new_password });
        self.post("api/auth/reset-password", &body).await
    }

    async fn fetch_profile(
        &self,
        role: Role,
        account_id: &str,
    ) -> Result<RecordsResponse, ApiError> {
        let (path, key) = profile_binding(role);
        match role {
            Role::Customer => {
                self.fetch_records::<CustomerRecord>(path, key, account_id, UpstreamRecord::Customer)
                    .await
            }
            Role::DeliveryStaff => {
                self.fetch_records::<StaffRecord>(path, key, account_id, UpstreamRecord::Staff)
                    .await
            }
            Role::ShopOwner => {
                self.fetch_records::<ShopRecord>(path, key, account_id, UpstreamRecord::Shop)
                    .await
            }
        }
    }
}
