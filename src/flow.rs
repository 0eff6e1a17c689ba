// ABOUTME: The linking state machine: loading -> signing -> success | error.
// ABOUTME: Drives wallet connect, message signing, backend verification and terminal handling.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use url::Url;

use crate::config::LinkConfig;
use crate::environment::HostEnvironment;
use crate::error::LinkError;
use crate::message::binding_message;
use crate::params::LinkRequest;
use crate::redirect::RedirectHandle;
use crate::sanitize;
use crate::verifier::{LinkSubmission, Verifier};
use crate::wallet::WalletConnector;

/// The four flow states. `Loading` is initial; `Success` and `Error` are
/// terminal for the flow's lifetime (only the explicit reset restarts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowState {
    Loading,
    Signing,
    Success,
    Error,
}

impl FlowState {
    pub fn is_terminal(self) -> bool {
        matches!(self, FlowState::Success | FlowState::Error)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FlowState::Loading => "loading",
            FlowState::Signing => "signing",
            FlowState::Success => "success",
            FlowState::Error => "error",
        }
    }
}

type TransitionHook = Box<dyn Fn(FlowState) + Send + Sync>;

/// One wallet-to-account linking attempt.
///
/// Single-flight by construction: the signing trigger fires at most once per
/// `(address, userId)` pair and never from a terminal state, and the verifier
/// is only entered after a signature resolved. Nothing here retries
/// automatically; a failure is immediately user-visible.
pub struct LinkFlow<C, V, E> {
    config: LinkConfig,
    request: Option<LinkRequest>,
    connector: C,
    verifier: V,
    environment: Arc<E>,
    state: FlowState,
    error: Option<LinkError>,
    connect_attempted: bool,
    signing_attempts: HashSet<(String, String)>,
    redirect: Option<RedirectHandle>,
    transition_hook: Option<TransitionHook>,
}

impl<C, V, E> LinkFlow<C, V, E>
where
    C: WalletConnector,
    V: Verifier,
    E: HostEnvironment + 'static,
{
    /// Resolve inputs from the entry URL and build the flow.
    ///
    /// Input resolution happens exactly once, here. A missing or empty
    /// `userId` puts the flow straight into `Error`; `run` will then never
    /// touch the wallet.
    pub fn new(
        config: LinkConfig,
        entry_url: &Url,
        connector: C,
        verifier: V,
        environment: Arc<E>,
    ) -> Self {
        let (request, state, error) = match LinkRequest::from_url(entry_url) {
            Ok(request) => (Some(request), FlowState::Loading, None),
            Err(e) => {
                log::error!("[flow] Input resolution failed ({}): {}", e.kind(), e);
                (None, FlowState::Error, Some(e))
            }
        };

        Self {
            config,
            request,
            connector,
            verifier,
            environment,
            state,
            error,
            connect_attempted: false,
            signing_attempts: HashSet::new(),
            redirect: None,
            transition_hook: None,
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn error(&self) -> Option<&LinkError> {
        self.error.as_ref()
    }

    /// Display-ready error text, already normalized.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }

    /// Observe state transitions (the page re-renders on these).
    pub fn on_transition(&mut self, hook: impl Fn(FlowState) + Send + Sync + 'static) {
        self.transition_hook = Some(Box::new(hook));
    }

    /// Drive the flow: connect the wallet, then react to the address.
    ///
    /// Idempotent per flow: the connection is initiated at most once, no
    /// matter how often this is called.
    pub async fn run(&mut self) -> FlowState {
        if self.state.is_terminal() {
            return self.state;
        }
        if self.connect_attempted {
            return self.state;
        }
        self.connect_attempted = true;

        if let Err(e) = self.connector.login().await {
            log::error!("[flow] Wallet connection failed: {}", e);
            self.fail(LinkError::ConnectionFailed(e));
            return self.state;
        }

        if let Some(address) = self.connector.address() {
            self.on_address_available(&address).await;
        } else {
            log::debug!("[flow] Connected but no address observable yet");
        }

        self.state
    }

    /// Address-available event: sign the binding message and submit it.
    ///
    /// Guarded twice: never from a terminal state (no duplicate signing after
    /// success, no signing over an error), and at most once per distinct
    /// `(address, userId)` pair.
    pub async fn on_address_available(&mut self, address: &str) {
        if self.state.is_terminal() {
            log::debug!("[flow] Ignoring address in {} state", self.state.as_str());
            return;
        }
        let Some(request) = self.request.clone() else {
            return;
        };
        let pair = (address.to_string(), request.user_id.clone());
        if !self.signing_attempts.insert(pair) {
            log::debug!("[flow] Signing already attempted for this address/user pair");
            return;
        }

        self.set_state(FlowState::Signing);
        let message = binding_message(address, &request.user_id);

        let signature = match self.connector.sign_message(&message).await {
            Ok(signature) => signature,
            Err(e) => {
                log::error!("[flow] Failed to sign message: {}", e);
                self.fail(LinkError::SigningFailed(e));
                // Leave no half-open session behind for a later retry.
                self.connector.logout().await;
                return;
            }
        };

        let submission = LinkSubmission {
            user_id: request.user_id,
            address: address.to_string(),
            signature,
            message,
        };
        self.submit(submission, request.auth_token.as_deref()).await;
    }

    async fn submit(&mut self, submission: LinkSubmission, auth_token: Option<&str>) {
        match self.verifier.verify(&submission, auth_token).await {
            Ok(()) => self.enter_success(),
            Err(e) => {
                log::error!("[flow] Verification failed: {}", e);
                self.fail(LinkError::VerificationFailed(sanitize::normalize_error(&e)));
                self.connector.logout().await;
            }
        }
    }

    fn enter_success(&mut self) {
        self.set_state(FlowState::Success);
        // Armed exactly once per entry into Success.
        if self.redirect.is_none() {
            self.redirect = Some(RedirectHandle::schedule(
                self.environment.clone(),
                self.config.return_url(),
                self.config.redirect_delay,
            ));
        }
    }

    /// Navigate to the return URL immediately, superseding the timer.
    pub fn return_now(&mut self) {
        if let Some(handle) = self.redirect.take() {
            handle.cancel();
        }
        self.environment.navigate(&self.config.return_url());
    }

    /// Take ownership of the pending success redirect, if any.
    pub fn take_redirect(&mut self) -> Option<RedirectHandle> {
        self.redirect.take()
    }

    /// User-initiated hard reset from the `Error` state.
    ///
    /// Clears all persisted host state, then triggers a reload; the flow is
    /// restarted from input resolution by the next load, not resumed.
    pub fn retry(&mut self) {
        if self.state != FlowState::Error {
            log::warn!("[flow] Retry requested outside Error state, ignoring");
            return;
        }
        if let Err(e) = self.environment.reset_persisted_state() {
            log::error!("[flow] {}", e);
        }
        self.environment.reload();
    }

    fn fail(&mut self, error: LinkError) {
        log::warn!("[flow] Terminal error ({}): {}", error.kind(), error);
        self.error = Some(error);
        self.set_state(FlowState::Error);
    }

    fn set_state(&mut self, state: FlowState) {
        self.state = state;
        if let Some(hook) = &self.transition_hook {
            hook(state);
        }
    }
}
