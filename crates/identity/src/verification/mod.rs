//! Password-recovery verification flow.
//!
//! One [`VerificationFlow`] instance drives one recovery attempt through
//! its stages:
//!
//! ```text
//! Idle → AwaitingEmailConfirm → AwaitingOtp → AwaitingNewPassword → Succeeded
//! ```
//!
//! The stage advances only on an explicit upstream success, never
//! optimistically. Every ordinary failure - a rejected OTP, an unreachable
//! server, a typo in a form field - is state (`last_error`), left in place
//! so the user can correct input and retry the same step without losing
//! what they already entered. `Failed` is reached only by explicit
//! abandonment.
//!
//! Callers render the current [`Stage`] and invoke the matching operation;
//! no surface needs to know about its neighbors.

mod otp;

use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use clove_core::{Email, EmailError};

use crate::api::MarketplaceApi;

use otp::OtpInput;
pub use otp::{DigitOutcome, OTP_LEN};

/// Role tag carried by every begin-recovery request (upstream constraint).
const RECOVERY_ROLE_TAG: &str = "customer";

/// Shown when upstream rejects without a usable message.
const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Notice shown after a successful OTP resend without a server message.
const RESEND_NOTICE: &str = "A new verification code has been sent.";

/// Position of an in-progress recovery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// No attempt in progress.
    Idle,
    /// Waiting for the user to confirm their email address.
    AwaitingEmailConfirm,
    /// Waiting for the 4-digit code sent to the confirmed email.
    AwaitingOtp,
    /// OTP verified; waiting for the new password.
    AwaitingNewPassword,
    /// Password reset acknowledged. Terminal.
    Succeeded,
    /// Attempt abandoned by the caller. Terminal.
    Failed,
}

/// A failure surfaced as state, shown next to the current step.
#[derive(Debug, Clone, Error)]
pub enum VerificationError {
    /// The entered email did not parse; no request was made.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
    /// Fewer than four digits entered; no request was made.
    #[error("enter the full 4-digit code")]
    IncompleteOtp,
    /// A password field was left empty; no request was made.
    #[error("password fields cannot be empty")]
    EmptyPassword,
    /// The two password fields differ; no request was made.
    #[error("passwords do not match")]
    PasswordMismatch,
    /// Upstream explicitly rejected the step.
    #[error("{0}")]
    Rejected(String),
    /// The request never got a usable answer.
    #[error("could not reach the server; check your connection and try again")]
    Transport,
}

/// Programmer error: an operation invoked in a stage it does not belong
/// to. Ordinary user and network failures never surface here.
#[derive(Debug, Error)]
pub enum FlowError {
    /// The flow was never started.
    #[error("recovery flow has not been started")]
    NotStarted,
    /// The operation belongs to a different stage.
    #[error("operation not valid in the {0:?} stage")]
    WrongStage(Stage),
    /// OTP cell index out of range.
    #[error("otp cell {0} is out of range")]
    OtpIndexOutOfRange(usize),
}

/// A point-in-time view of the flow, cheap to clone and render.
#[derive(Debug, Clone)]
pub struct VerificationState {
    /// Current stage.
    pub stage: Stage,
    /// The confirmed email, once past `AwaitingEmailConfirm`.
    pub email: Option<Email>,
    /// Current OTP cell contents.
    pub otp_digits: [Option<char>; OTP_LEN],
    /// The most recent failure for the current step, if any.
    pub last_error: Option<VerificationError>,
    /// Informational status text (e.g. after a resend).
    pub notice: Option<String>,
    /// Whether a network call for the current stage is outstanding.
    pub pending: bool,
}

#[derive(Debug)]
struct FlowState {
    stage: Stage,
    email: Option<Email>,
    otp: OtpInput,
    last_error: Option<VerificationError>,
    notice: Option<String>,
    pending: bool,
    // Bumped on abandon/restart so a late response from a previous attempt
    // is discarded instead of applied to the wrong state.
    epoch: u64,
}

impl FlowState {
    fn fresh(epoch: u64) -> Self {
        Self {
            stage: Stage::Idle,
            email: None,
            otp: OtpInput::default(),
            last_error: None,
            notice: None,
            pending: false,
            epoch,
        }
    }
}

/// The password-recovery state machine.
///
/// Operations take `&self`; one instance can be shared by reference across
/// the surfaces that render it. At most one network call is outstanding
/// per instance: submitting again while `pending` is a no-op, not a queued
/// retry, so rapid double-clicks cannot fire duplicate OTP or reset
/// requests.
pub struct VerificationFlow<A> {
    api: A,
    state: Mutex<FlowState>,
}

impl<A: MarketplaceApi> VerificationFlow<A> {
    /// Create a flow over the given API handle. The flow starts `Idle`.
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: Mutex::new(FlowState::fresh(0)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FlowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn expect_stage(state: &FlowState, wanted: Stage) -> Result<(), FlowError> {
        match state.stage {
            stage if stage == wanted => Ok(()),
            Stage::Idle => Err(FlowError::NotStarted),
            other => Err(FlowError::WrongStage(other)),
        }
    }

    /// Begin a recovery attempt.
    ///
    /// Always starts over from scratch: any previous attempt's state is
    /// discarded and an in-flight call from it will be ignored on arrival.
    pub fn start(&self) {
        let mut state = self.lock();
        let epoch = state.epoch.wrapping_add(1);
        *state = FlowState::fresh(epoch);
        state.stage = Stage::AwaitingEmailConfirm;
        tracing::debug!("recovery flow started");
    }

    /// Abandon the current attempt. Terminal; a late response from an
    /// outstanding call is discarded.
    pub fn abandon(&self) {
        let mut state = self.lock();
        if matches!(state.stage, Stage::Succeeded) {
            return;
        }
        state.stage = Stage::Failed;
        state.pending = false;
        state.epoch = state.epoch.wrapping_add(1);
        tracing::debug!("recovery flow abandoned");
    }

    /// Current stage.
    pub fn stage(&self) -> Stage {
        self.lock().stage
    }

    /// Most recent failure for the current step.
    pub fn last_error(&self) -> Option<VerificationError> {
        self.lock().last_error.clone()
    }

    /// Whether a network call for the current stage is outstanding.
    pub fn pending(&self) -> bool {
        self.lock().pending
    }

    /// A full point-in-time view for rendering.
    pub fn snapshot(&self) -> VerificationState {
        let state = self.lock();
        VerificationState {
            stage: state.stage,
            email: state.email.clone(),
            otp_digits: state.otp.digits(),
            last_error: state.last_error.clone(),
            notice: state.notice.clone(),
            pending: state.pending,
        }
    }

    /// Confirm the email to recover and request an OTP for it.
    ///
    /// On upstream success the flow advances to [`Stage::AwaitingOtp`]. A
    /// rejection or transport failure keeps the stage and sets
    /// `last_error`; an unparseable email never leaves the process.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError`] if the flow is not at
    /// [`Stage::AwaitingEmailConfirm`].
    pub async fn confirm_email(&self, email: &str) -> Result<(), FlowError> {
        let (epoch, parsed) = {
            let mut state = self.lock();
            Self::expect_stage(&state, Stage::AwaitingEmailConfirm)?;
            if state.pending {
                return Ok(());
            }
            match Email::parse(email) {
                Ok(parsed) => {
                    state.pending = true;
                    state.last_error = None;
                    state.notice = None;
                    (state.epoch, parsed)
                }
                Err(err) => {
                    state.last_error = Some(VerificationError::InvalidEmail(err));
                    return Ok(());
                }
            }
        };

        let outcome = self
            .api
            .begin_recovery(parsed.as_str(), RECOVERY_ROLE_TAG)
            .await;

        let mut state = self.lock();
        if state.epoch != epoch {
            return Ok(());
        }
        state.pending = false;
        match outcome {
            Ok(response) if response.success => {
                state.email = Some(parsed);
                state.stage = Stage::AwaitingOtp;
                tracing::debug!("recovery email confirmed; awaiting otp");
            }
            Ok(response) => {
                state.last_error = Some(rejection(response.message));
            }
            Err(err) => {
                tracing::warn!(%err, "begin-recovery request failed");
                state.last_error = Some(VerificationError::Transport);
            }
        }
        Ok(())
    }

    /// Enter one character into an OTP cell. Non-digits are rejected here,
    /// at entry time; the returned [`DigitOutcome`] tells the caller where
    /// to move focus.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError`] if `pos` is out of range or the flow is not
    /// at [`Stage::AwaitingOtp`].
    pub fn enter_digit(&self, pos: usize, ch: char) -> Result<DigitOutcome, FlowError> {
        if pos >= OTP_LEN {
            return Err(FlowError::OtpIndexOutOfRange(pos));
        }
        let mut state = self.lock();
        Self::expect_stage(&state, Stage::AwaitingOtp)?;
        Ok(state.otp.enter(pos, ch))
    }

    /// Clear one OTP cell.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError`] if `pos` is out of range or the flow is not
    /// at [`Stage::AwaitingOtp`].
    pub fn clear_digit(&self, pos: usize) -> Result<(), FlowError> {
        if pos >= OTP_LEN {
            return Err(FlowError::OtpIndexOutOfRange(pos));
        }
        let mut state = self.lock();
        Self::expect_stage(&state, Stage::AwaitingOtp)?;
        state.otp.clear(pos);
        Ok(())
    }

    /// Submit the entered OTP for verification.
    ///
    /// An incomplete code is rejected locally with no network call. On a
    /// failed attempt the entered digits are kept, so the user can fix one
    /// cell instead of retyping the code.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError`] if the flow is not at [`Stage::AwaitingOtp`].
    pub async fn verify_otp(&self) -> Result<(), FlowError> {
        let (epoch, email, code) = {
            let mut state = self.lock();
            Self::expect_stage(&state, Stage::AwaitingOtp)?;
            if state.pending {
                return Ok(());
            }
            let Some(code) = state.otp.code() else {
                state.last_error = Some(VerificationError::IncompleteOtp);
                return Ok(());
            };
            let email = state.email.clone().ok_or(FlowError::NotStarted)?;
            state.pending = true;
            state.last_error = None;
            state.notice = None;
            (state.epoch, email, code)
        };

        let outcome = self.api.verify_otp(email.as_str(), &code).await;

        let mut state = self.lock();
        if state.epoch != epoch {
            return Ok(());
        }
        state.pending = false;
        match outcome {
            Ok(response) if response.success => {
                state.stage = Stage::AwaitingNewPassword;
                tracing::debug!("otp verified; awaiting new password");
            }
            Ok(response) => {
                state.last_error = Some(rejection(response.message));
            }
            Err(err) => {
                tracing::warn!(%err, "verify-otp request failed");
                state.last_error = Some(VerificationError::Transport);
            }
        }
        Ok(())
    }

    /// Request a fresh OTP for the confirmed email.
    ///
    /// Re-issues the same begin-recovery request; the stage never changes.
    /// No cooldown is enforced here - a surface may throttle its button,
    /// but the flow itself imposes none.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError`] if the flow is not at [`Stage::AwaitingOtp`].
    pub async fn resend_otp(&self) -> Result<(), FlowError> {
        let (epoch, email) = {
            let mut state = self.lock();
            Self::expect_stage(&state, Stage::AwaitingOtp)?;
            if state.pending {
                return Ok(());
            }
            let email = state.email.clone().ok_or(FlowError::NotStarted)?;
            state.pending = true;
            state.last_error = None;
            state.notice = None;
            (state.epoch, email)
        };

        let outcome = self
            .api
            .begin_recovery(email.as_str(), RECOVERY_ROLE_TAG)
            .await;

        let mut state = self.lock();
        if state.epoch != epoch {
            return Ok(());
        }
        state.pending = false;
        match outcome {
            Ok(response) if response.success => {
                state.notice = Some(
                    response
                        .message
                        .filter(|m| !m.trim().is_empty())
                        .unwrap_or_else(|| RESEND_NOTICE.to_owned()),
                );
            }
            Ok(response) => {
                state.last_error = Some(rejection(response.message));
            }
            Err(err) => {
                tracing::warn!(%err, "otp resend failed");
                state.last_error = Some(VerificationError::Transport);
            }
        }
        Ok(())
    }

    /// Submit the new password.
    ///
    /// Empty fields and mismatched values are rejected locally with no
    /// network call. Success is judged by the payload's result flag; on
    /// acknowledgement the flow reaches [`Stage::Succeeded`] and the
    /// caller returns the user to the login surface.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError`] if the flow is not at
    /// [`Stage::AwaitingNewPassword`].
    pub async fn set_new_password(
        &self,
        password: &str,
        confirm_password: &str,
    ) -> Result<(), FlowError> {
        let (epoch, email) = {
            let mut state = self.lock();
            Self::expect_stage(&state, Stage::AwaitingNewPassword)?;
            if state.pending {
                return Ok(());
            }
            if password.is_empty() || confirm_password.is_empty() {
                state.last_error = Some(VerificationError::EmptyPassword);
                return Ok(());
            }
            if password != confirm_password {
                state.last_error = Some(VerificationError::PasswordMismatch);
                return Ok(());
            }
            let email = state.email.clone().ok_or(FlowError::NotStarted)?;
            state.pending = true;
            state.last_error = None;
            state.notice = None;
            (state.epoch, email)
        };

        let outcome = self.api.reset_password(email.as_str(), password).await;

        let mut state = self.lock();
        if state.epoch != epoch {
            return Ok(());
        }
        state.pending = false;
        match outcome {
            Ok(response) if response.success => {
                state.stage = Stage::Succeeded;
                tracing::debug!("password reset acknowledged");
            }
            Ok(response) => {
                state.last_error = Some(rejection(response.message));
            }
            Err(err) => {
                tracing::warn!(%err, "password reset request failed");
                state.last_error = Some(VerificationError::Transport);
            }
        }
        Ok(())
    }
}

/// Upstream said no: use its message when present, a generic one otherwise.
fn rejection(message: Option<String>) -> VerificationError {
    VerificationError::Rejected(
        message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_FAILURE.to_owned()),
    )
}
