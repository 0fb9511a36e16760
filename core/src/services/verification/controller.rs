//! Verification flow controller
//!
//! Owns one [`VerificationSession`] for the lifetime of the screen, the
//! per-second countdown that gates resend, and the liveness token every
//! async completion checks before touching the session.

use serde_json::json;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use uuid::Uuid;

use crate::domain::entities::analytics::{actions, AnalyticsEvent};
use crate::domain::entities::verification_session::{
    SessionSnapshot, TickOutcome, VerificationSession,
};
use crate::domain::value_objects::{Notification, Route};
use crate::errors::{DomainResult, VerificationError};
use crate::i18n::{self, keys};
use crate::services::analytics::{AnalyticsService, AnalyticsSink};

use super::config::{self, VerificationConfig};
use super::liveness::LivenessToken;
use super::traits::{Navigator, Notifier, VerificationBackend};
use super::types::{ResendOutcome, SubmitOutcome};

/// State shared between the controller and its countdown task
struct FlowState<B, N, T, A>
where
    B: VerificationBackend + ?Sized + 'static,
    N: Navigator + 'static,
    T: Notifier + 'static,
    A: AnalyticsSink + 'static,
{
    session_id: Uuid,
    session: Mutex<VerificationSession>,
    liveness: LivenessToken,
    snapshots: watch::Sender<SessionSnapshot>,
    backend: Arc<B>,
    navigator: Arc<N>,
    notifier: Arc<T>,
    analytics: AnalyticsService<A>,
    config: VerificationConfig,
}

impl<B, N, T, A> FlowState<B, N, T, A>
where
    B: VerificationBackend + ?Sized + 'static,
    N: Navigator + 'static,
    T: Notifier + 'static,
    A: AnalyticsSink + 'static,
{
    fn publish(&self, session: &VerificationSession) {
        self.snapshots.send_replace(session.snapshot());
    }

    fn event(&self, action: &str) -> AnalyticsEvent {
        AnalyticsEvent::new(self.session_id, action)
    }

    fn message(&self, key: &str) -> String {
        i18n::message(key, self.config.language)
    }

    /// One countdown step; `None` once the session is gone
    fn apply_tick(&self) -> Option<TickOutcome> {
        let mut session = lock(&self.session);
        if !self.liveness.is_alive() {
            return None;
        }
        let outcome = session.tick();
        match outcome {
            TickOutcome::Counting(_) => self.publish(&session),
            TickOutcome::BecameReady => {
                self.publish(&session);
                tracing::debug!(
                    session_id = %self.session_id,
                    event = "resend_ready",
                    "Resend cooldown finished"
                );
            }
            TickOutcome::Idle => {}
        }
        Some(outcome)
    }
}

/// Controller for the "verify your email" screen
///
/// Must be started inside a tokio runtime; the countdown runs as a spawned
/// task that is aborted by [`dispose`](Self::dispose) or on drop.
pub struct VerificationFlowController<B, N, T, A>
where
    B: VerificationBackend + ?Sized + 'static,
    N: Navigator + 'static,
    T: Notifier + 'static,
    A: AnalyticsSink + 'static,
{
    state: Arc<FlowState<B, N, T, A>>,
    countdown: Mutex<Option<JoinHandle<()>>>,
}

impl<B, N, T, A> VerificationFlowController<B, N, T, A>
where
    B: VerificationBackend + ?Sized + 'static,
    N: Navigator + 'static,
    T: Notifier + 'static,
    A: AnalyticsSink + 'static,
{
    /// Open a new verification session and start the resend countdown
    ///
    /// # Arguments
    ///
    /// * `config` - Code length, cooldown, tick interval and language
    /// * `backend` - Verify/resend operations bound to the account's email
    /// * `navigator` - Router used to leave the screen on success
    /// * `notifier` - Toast surface
    /// * `analytics` - Event logging
    pub fn start(
        config: VerificationConfig,
        backend: Arc<B>,
        navigator: Arc<N>,
        notifier: Arc<T>,
        analytics: AnalyticsService<A>,
    ) -> DomainResult<Self> {
        config::validate(&config)?;

        let session = VerificationSession::with_cooldown(config.resend_cooldown_seconds);
        let session_id = session.id;
        let (snapshots, _) = watch::channel(session.snapshot());

        tracing::info!(
            session_id = %session_id,
            cooldown_seconds = config.resend_cooldown_seconds,
            event = "verification_session_started",
            "Verification session started"
        );

        let controller = Self {
            state: Arc::new(FlowState {
                session_id,
                session: Mutex::new(session),
                liveness: LivenessToken::new(),
                snapshots,
                backend,
                navigator,
                notifier,
                analytics,
                config,
            }),
            countdown: Mutex::new(None),
        };
        controller.restart_countdown();
        Ok(controller)
    }

    pub fn session_id(&self) -> Uuid {
        self.state.session_id
    }

    pub fn is_alive(&self) -> bool {
        self.state.liveness.is_alive()
    }

    /// Current state of the session
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.snapshots.borrow().clone()
    }

    /// Receiver notified on every session change
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.snapshots.subscribe()
    }

    /// Replace the entered code; ignored once the session has ended
    pub fn set_code(&self, value: impl Into<String>) {
        let mut session = lock(&self.state.session);
        if !self.state.liveness.is_alive() {
            return;
        }
        session.set_code(value);
        self.state.publish(&session);
    }

    /// Submit the entered code to the backend
    ///
    /// # Returns
    ///
    /// * `Ok(SubmitOutcome::Verified)` - Code accepted, user sent to login
    /// * `Ok(SubmitOutcome::Rejected)` - Backend refused; user may retry at once
    /// * `Ok(SubmitOutcome::Discarded)` - Screen closed while the call was out
    /// * `Err(DomainError)` - Blocked locally (wrong length, already
    ///   submitting, session ended); no backend call was made
    pub async fn submit(&self) -> DomainResult<SubmitOutcome> {
        let state = &self.state;

        let prepared = {
            let mut session = lock(&state.session);
            if !state.liveness.is_alive() {
                return Err(VerificationError::SessionDisposed.into());
            }
            match session.check_submittable(state.config.code_length) {
                Ok(()) => {
                    let code = session.begin_submit();
                    state.publish(&session);
                    Ok(code)
                }
                Err(err) => {
                    if matches!(err, VerificationError::InvalidCodeLength { .. }) {
                        session.set_validation_message(err.localized(state.config.language));
                        state.publish(&session);
                    }
                    Err(err)
                }
            }
        };

        let code = match prepared {
            Ok(code) => code,
            Err(err) => {
                tracing::debug!(
                    session_id = %state.session_id,
                    error_code = err.code(),
                    event = "verification_blocked",
                    "Submit blocked before reaching the backend"
                );
                state
                    .analytics
                    .record(
                        state
                            .event(actions::VERIFICATION_BLOCKED)
                            .with_error(err.code(), err.to_string()),
                    )
                    .await;
                return Err(err.into());
            }
        };

        let in_flight = InFlightSubmit::new(&**state);

        tracing::info!(
            session_id = %state.session_id,
            event = "verification_submitted",
            "Submitting verification code"
        );
        state
            .analytics
            .record(state.event(actions::VERIFICATION_SUBMITTED))
            .await;

        let result = state.backend.verify_code(&code).await;
        in_flight.disarm();

        {
            let mut session = lock(&state.session);
            if !state.liveness.is_alive() {
                tracing::debug!(
                    session_id = %state.session_id,
                    event = "verification_result_discarded",
                    "Verify call completed after the screen closed"
                );
                return Ok(SubmitOutcome::Discarded);
            }
            session.finish_submit();
            state.publish(&session);
        }

        match result {
            Ok(()) => {
                tracing::info!(
                    session_id = %state.session_id,
                    event = "verification_succeeded",
                    "Email verified"
                );
                state.notifier.notify(Notification::success(
                    state.message(keys::VERIFY_SUCCESS_TITLE),
                    state.message(keys::VERIFY_SUCCESS_BODY),
                ));
                state.navigator.navigate(Route::Login);
                state
                    .analytics
                    .record(state.event(actions::VERIFICATION_SUCCEEDED))
                    .await;
                // Leaving the screen discards the session
                self.end_session("verified");
                Ok(SubmitOutcome::Verified)
            }
            Err(failure) => {
                let err = VerificationError::VerifyRejected {
                    message: failure.message.clone(),
                };
                tracing::warn!(
                    session_id = %state.session_id,
                    status = ?failure.status,
                    error = %failure,
                    event = "verification_failed",
                    "Backend rejected verification code"
                );
                state.notifier.notify(Notification::error(
                    state.message(keys::VERIFY_FAILED_TITLE),
                    failure.message.clone(),
                ));
                state
                    .analytics
                    .record(
                        state
                            .event(actions::VERIFICATION_FAILED)
                            .with_error(err.code(), failure.message.clone()),
                    )
                    .await;
                Ok(SubmitOutcome::Rejected {
                    message: failure.message,
                })
            }
        }
    }

    /// Request a new code if the cooldown has finished
    ///
    /// While cooling down this is a no-op returning `NotReady`. Otherwise
    /// the counter is reset before the backend is called, so a failed
    /// request still waits out a full cooldown.
    pub async fn resend(&self) -> DomainResult<ResendOutcome> {
        let state = &self.state;

        {
            let mut session = lock(&state.session);
            if !state.liveness.is_alive() {
                return Err(VerificationError::SessionDisposed.into());
            }
            if !session.try_begin_resend() {
                return Ok(ResendOutcome::NotReady {
                    seconds_remaining: session.seconds_until_resend_allowed(),
                });
            }
            state.publish(&session);
        }
        self.restart_countdown();

        tracing::info!(
            session_id = %state.session_id,
            event = "code_resend_requested",
            "Requesting a new verification code"
        );
        let result = state.backend.resend_code().await;

        if !state.liveness.is_alive() {
            return Ok(ResendOutcome::Discarded);
        }

        match result {
            Ok(()) => {
                state.notifier.notify(Notification::info(
                    state.message(keys::CODE_RESENT_TITLE),
                    state.message(keys::CODE_RESENT_BODY),
                ));
                state.analytics.record(state.event(actions::CODE_RESENT)).await;
                Ok(ResendOutcome::Dispatched)
            }
            Err(failure) => {
                let err = VerificationError::ResendFailed {
                    message: failure.message.clone(),
                };
                tracing::warn!(
                    session_id = %state.session_id,
                    status = ?failure.status,
                    error = %failure,
                    event = "code_resend_failed",
                    "Failed to resend verification code"
                );
                if state.config.surface_resend_failures {
                    state.notifier.notify(Notification::error(
                        state.message(keys::RESEND_FAILED_TITLE),
                        failure.message.clone(),
                    ));
                }
                state
                    .analytics
                    .record(
                        state
                            .event(actions::CODE_RESEND_FAILED)
                            .with_error(err.code(), failure.message.clone()),
                    )
                    .await;
                Ok(ResendOutcome::Failed {
                    message: failure.message,
                })
            }
        }
    }

    /// End the session: stop the countdown and ignore late completions
    ///
    /// Safe to call more than once.
    pub fn dispose(&self) {
        self.end_session("disposed");
    }

    fn end_session(&self, reason: &'static str) {
        let was_alive = {
            // Flip under the session lock so no completion is mid-mutation
            let _session = lock(&self.state.session);
            self.state.liveness.revoke()
        };

        if let Some(handle) = lock(&self.countdown).take() {
            handle.abort();
        }

        if was_alive {
            tracing::info!(
                session_id = %self.state.session_id,
                reason = reason,
                event = "verification_session_ended",
                "Verification session ended"
            );
            self.state.analytics.record_detached(
                self.state
                    .event(actions::SESSION_ENDED)
                    .with_properties(json!({ "reason": reason })),
            );
        }
    }

    fn restart_countdown(&self) {
        let mut slot = lock(&self.countdown);
        if let Some(handle) = slot.take() {
            handle.abort();
        }
        if !self.state.liveness.is_alive() || lock(&self.state.session).resend_allowed() {
            return;
        }

        let state = Arc::clone(&self.state);
        let period = self.state.config.tick_interval();
        // First deadline is fixed here, not when the task is first polled
        let first_tick = Instant::now() + period;
        *slot = Some(tokio::spawn(run_countdown(state, first_tick, period)));
    }
}

impl<B, N, T, A> Drop for VerificationFlowController<B, N, T, A>
where
    B: VerificationBackend + ?Sized + 'static,
    N: Navigator + 'static,
    T: Notifier + 'static,
    A: AnalyticsSink + 'static,
{
    fn drop(&mut self) {
        self.end_session("dropped");
    }
}

/// Clears `submitting` if a submit future is dropped before the verify
/// call returns
struct InFlightSubmit<'a> {
    session: &'a Mutex<VerificationSession>,
    liveness: &'a LivenessToken,
    snapshots: &'a watch::Sender<SessionSnapshot>,
    armed: bool,
}

impl<'a> InFlightSubmit<'a> {
    fn new<B, N, T, A>(state: &'a FlowState<B, N, T, A>) -> Self
    where
        B: VerificationBackend + ?Sized + 'static,
        N: Navigator + 'static,
        T: Notifier + 'static,
        A: AnalyticsSink + 'static,
    {
        Self {
            session: &state.session,
            liveness: &state.liveness,
            snapshots: &state.snapshots,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlightSubmit<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut session = lock(self.session);
        if self.liveness.is_alive() {
            session.finish_submit();
            self.snapshots.send_replace(session.snapshot());
        }
    }
}

/// Tick once per `period` until the counter reaches zero or the session ends
async fn run_countdown<B, N, T, A>(
    state: Arc<FlowState<B, N, T, A>>,
    first_tick: Instant,
    period: Duration,
) where
    B: VerificationBackend + ?Sized + 'static,
    N: Navigator + 'static,
    T: Notifier + 'static,
    A: AnalyticsSink + 'static,
{
    let mut ticker = time::interval_at(first_tick, period);
    loop {
        ticker.tick().await;
        match state.apply_tick() {
            Some(TickOutcome::Counting(_)) => {}
            _ => break,
        }
    }
}

fn lock<V>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
