//! # Identity Bridge
//!
//! Lets the hosted page trigger the OS sign-in flow and receive the
//! resulting ID token through its `window.onGoogleSignIn` hook.
//!
//! ## State machine
//!
//! ```text
//!          begin_sign_in            on_launch_outcome(Ok)
//!   Idle ───────────────> Requesting ─────────────────────> AwaitingResult
//!    ^                        │                                   │
//!    │  on_launch_outcome(Err)│                                   │ on_result
//!    └────────────────────────┴───────────────────────────────────┘
//! ```
//!
//! - A trigger while `Requesting` is ignored: one outstanding attempt.
//! - A trigger while `AwaitingResult` abandons the stale attempt and starts
//!   a new one (the provider UI was dismissed without a result).
//! - Failures are logged and never reported to the page; the page owns its
//!   own timeout.
//!
//! The bridge holds no attempt state itself: the shell owns the
//! [`SignInAttempt`] slot and passes it into every call.

use crate::error::{AuthError, Result};
use crate::types::{AttemptId, IdentityState, PendingSignIn, SignInAttempt};
use bridge_traits::{
    IdentityProvider, RequestCode, ResultCode, ResultPayload, SignInRequest, WebPage,
};
use core_runtime::events::{EventBus, IdentityEvent, ShellEvent};
use core_runtime::logging::redact_if_sensitive;
use core_view::script::{guarded_hook_call, js_string_literal, Script};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Page hook receiving the ID token.
pub const SIGN_IN_HOOK: &str = "onGoogleSignIn";

/// Result of asking the provider to start its flow.
pub type LaunchOutcome = Result<()>;

pub struct IdentityBridge {
    provider: Arc<dyn IdentityProvider>,
    request: SignInRequest,
    event_bus: EventBus,
}

impl IdentityBridge {
    /// `server_client_id` is the backend client the ID token is minted for.
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        server_client_id: impl Into<String>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            provider,
            request: SignInRequest::new(server_client_id),
            event_bus,
        }
    }

    /// Page asked to sign in.
    ///
    /// Returns the attempt the shell must launch with [`launch`](Self::launch),
    /// or `None` if an attempt is already being requested.
    #[instrument(skip(self, attempt), fields(state = attempt.state.as_str()))]
    pub fn begin_sign_in(&self, attempt: &mut SignInAttempt) -> Option<PendingSignIn> {
        match attempt.state {
            IdentityState::Requesting(current) => {
                debug!(attempt = %current, "Sign-in already being requested");
                self.emit(IdentityEvent::SignInIgnored {
                    attempt_id: current.to_string(),
                });
                return None;
            }
            IdentityState::AwaitingResult(stale) => {
                info!(attempt = %stale, "Abandoning sign-in that never returned");
                self.emit(IdentityEvent::AttemptAbandoned {
                    attempt_id: stale.to_string(),
                });
            }
            IdentityState::Idle => {}
        }

        let id = AttemptId::new();
        attempt.state = IdentityState::Requesting(id);
        info!(attempt = %id, "Requesting sign-in");
        self.emit(IdentityEvent::SignInRequested {
            attempt_id: id.to_string(),
        });

        Some(PendingSignIn {
            attempt: id,
            request: self.request.clone(),
        })
    }

    /// Future that asks the provider to start the flow.
    ///
    /// Owns everything it needs so the shell can spawn it off the UI task;
    /// the outcome must be fed back through
    /// [`on_launch_outcome`](Self::on_launch_outcome).
    pub fn launch(
        &self,
        pending: PendingSignIn,
    ) -> impl Future<Output = (AttemptId, LaunchOutcome)> + Send + 'static {
        let provider = Arc::clone(&self.provider);
        async move {
            let outcome = provider
                .begin_sign_in(&pending.request, RequestCode::SIGN_IN)
                .await
                .map_err(AuthError::LaunchFailed);
            (pending.attempt, outcome)
        }
    }

    /// The provider reported whether its UI came up.
    ///
    /// Outcomes for an attempt that is no longer current are dropped.
    #[instrument(skip(self, attempt, outcome), fields(attempt = %id))]
    pub fn on_launch_outcome(
        &self,
        attempt: &mut SignInAttempt,
        id: AttemptId,
        outcome: LaunchOutcome,
    ) {
        if attempt.state != IdentityState::Requesting(id) {
            debug!(state = attempt.state.as_str(), "Dropping launch outcome for stale attempt");
            return;
        }

        match outcome {
            Ok(()) => {
                attempt.state = IdentityState::AwaitingResult(id);
                debug!("Sign-in UI launched");
                self.emit(IdentityEvent::AwaitingResult {
                    attempt_id: id.to_string(),
                });
            }
            Err(e) => {
                attempt.state = IdentityState::Idle;
                warn!(error = %e, "Sign-in could not start");
                self.emit(IdentityEvent::LaunchFailed {
                    attempt_id: id.to_string(),
                    message: e.to_string(),
                });
            }
        }
    }

    /// An external result arrived.
    ///
    /// Returns `false` (and leaves the slot untouched) when `request_code`
    /// is not the sign-in code. Any matching result returns the slot to
    /// `Idle`; the token reaches the page only if one was decoded.
    #[instrument(skip(self, attempt, payload, page), fields(state = attempt.state.as_str()))]
    pub fn on_result(
        &self,
        attempt: &mut SignInAttempt,
        request_code: RequestCode,
        result_code: ResultCode,
        payload: &ResultPayload,
        page: &dyn WebPage,
    ) -> bool {
        if request_code != RequestCode::SIGN_IN {
            return false;
        }

        let current = attempt.state.attempt();
        attempt.state = IdentityState::Idle;
        if current.is_none() {
            debug!("Sign-in result without an outstanding attempt");
        }

        let delivered = self
            .extract_token(result_code, payload)
            .and_then(|token| deliver_token(page, &token));

        match delivered {
            Ok(()) => {
                info!("Sign-in token delivered to page");
                self.emit(IdentityEvent::TokenDelivered {
                    attempt_id: current.map(|id| id.to_string()).unwrap_or_default(),
                });
            }
            Err(e) => {
                match e {
                    AuthError::Cancelled => info!("Sign-in cancelled"),
                    _ => warn!(error = %e, "Sign-in result not delivered"),
                }
                self.emit(IdentityEvent::SignInFailed {
                    attempt_id: current.map(|id| id.to_string()),
                    message: e.to_string(),
                });
            }
        }

        true
    }

    fn extract_token(&self, result_code: ResultCode, payload: &ResultPayload) -> Result<String> {
        if !result_code.is_ok() {
            return Err(AuthError::Cancelled);
        }

        let credential = self
            .provider
            .credential_from_payload(payload)
            .map_err(AuthError::Decode)?;

        let token = credential
            .id_token
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingToken)?;

        debug!(
            id_token = %redact_if_sensitive("id_token", &token),
            account = %credential
                .id
                .as_deref()
                .map(|id| redact_if_sensitive("account", id))
                .unwrap_or_default(),
            "Decoded sign-in credential"
        );
        Ok(token)
    }

    fn emit(&self, event: IdentityEvent) {
        let _ = self.event_bus.emit(ShellEvent::Identity(event));
    }
}

impl fmt::Debug for IdentityBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityBridge")
            .field("request", &self.request)
            .finish_non_exhaustive()
    }
}

/// `if (window.onGoogleSignIn) { window.onGoogleSignIn("<token>"); }`
pub fn token_delivery_script(token: &str) -> Script {
    guarded_hook_call(SIGN_IN_HOOK, &[js_string_literal(token)])
}

fn deliver_token(page: &dyn WebPage, token: &str) -> Result<()> {
    page.evaluate_script(token_delivery_script(token).as_str())
        .map_err(AuthError::Delivery)
}
