//! Scripted stand-in for the marketplace API, used by unit tests.

#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use clove_core::Role;

use crate::api::{ApiError, MarketplaceApi, RecordsResponse, StatusResponse, UpstreamRecord};

/// Install a test subscriber so `RUST_LOG` surfaces core logs in test
/// output. Safe to call from every test; only the first call wins.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A [`MarketplaceApi`] whose responses are scripted ahead of time.
///
/// Responses are consumed in push order, one per call, with separate queues
/// for the recovery (status) operations and the profile fetch. An
/// unscripted call panics: tests that assert "no network call happened"
/// simply script nothing.
#[derive(Default)]
pub struct StubApi {
    status: Mutex<VecDeque<Result<StatusResponse, ApiError>>>,
    fetch: Mutex<VecDeque<Result<RecordsResponse, ApiError>>>,
    status_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
}

/// An error standing in for "the network fell over".
fn transport_error() -> ApiError {
    ApiError::Status {
        status: reqwest::StatusCode::BAD_GATEWAY,
        body: "connection reset".to_owned(),
    }
}

impl StubApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a plain `success: true` recovery response.
    pub fn push_success(&self) {
        self.status.lock().unwrap().push_back(Ok(StatusResponse::ok()));
    }

    /// Script an explicit upstream rejection with a message.
    pub fn push_rejected(&self, message: &str) {
        self.status
            .lock()
            .unwrap()
            .push_back(Ok(StatusResponse::rejected(message)));
    }

    /// Script a transport failure for the next recovery call.
    pub fn push_transport(&self) {
        self.status.lock().unwrap().push_back(Err(transport_error()));
    }

    /// Script a profile-fetch response.
    pub fn push_records(&self, success: bool, records: Vec<UpstreamRecord>) {
        self.fetch
            .lock()
            .unwrap()
            .push_back(Ok(RecordsResponse { success, records }));
    }

    /// Script a transport failure for the next profile fetch.
    pub fn push_fetch_transport(&self) {
        self.fetch.lock().unwrap().push_back(Err(transport_error()));
    }

    pub fn status_call_count(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn fetch_call_count(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    fn next_status(&self) -> Result<StatusResponse, ApiError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.status
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted status call")
    }
}

impl MarketplaceApi for StubApi {
    async fn begin_recovery(
        &self,
        _email: &str,
        _role_tag: &str,
    ) -> Result<StatusResponse, ApiError> {
        self.next_status()
    }

    async fn verify_otp(&self, _email: &str, _otp: &str) -> Result<StatusResponse, ApiError> {
        self.next_status()
    }

    async fn reset_password(
        &self,
        _email: &str,
        _new_password: &str,
    ) -> Result<StatusResponse, ApiError> {
        self.next_status()
    }

    async fn fetch_profile(
        &self,
        _role: Role,
        _account_id: &str,
    ) -> Result<RecordsResponse, ApiError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.fetch
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted fetch call")
    }
}
