//! Enrollment Session Controller
//!
//! Drives one session through permission, token acquisition, capture,
//! submission and classification, looping back into capture only when the
//! retry policy grants a liveness retry:
//!
//! ```text
//! Idle → AwaitingPermission → AwaitingToken → CaptureInProgress → Submitting
//!      → Classifying → { Retrying → CaptureInProgress | Finalized }
//! ```
//!
//! Every path ends in `Finalized` with exactly one notification to the
//! session's [`ProcessingDelegate`]. Errors raised by collaborators are folded
//! into a [`Termination`]; none reach the caller of [`EnrollmentController::enroll`].

use crate::classifier::{ClassificationCategory, ErrorClassifier};
use crate::effects::EnrollmentEffects;
use crate::holder::SessionResultHolder;
use crate::progress::{ProgressEmission, ProgressTranslator};
use crate::retry::{RetryBound, RetryDecision};
use crate::session::{EnrollmentSession, SessionOutcome, SessionSummary, Termination};
use facescan_core::effects::{
    CaptureEffects, PermissionGrant, ProcessingDelegate, SubmissionResponse, UploadProgress,
    UploadProgressReporter, UxEvent,
};
use facescan_core::{EnrollmentConfig, EnrollmentError, EnrollmentRequest, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::Instrument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControllerState {
    Idle,
    AwaitingPermission,
    AwaitingToken,
    CaptureInProgress,
    Submitting,
    Classifying,
    Retrying,
    Finalized,
}

impl ControllerState {
    pub fn is_terminal(self) -> bool {
        self == ControllerState::Finalized
    }

    /// Check if this state can transition to `next`
    ///
    /// Allowed transitions:
    /// - the forward chain `Idle → … → Classifying`
    /// - `Classifying → Retrying → CaptureInProgress`
    /// - any non-terminal state → `Finalized`
    pub fn can_transition_to(self, next: ControllerState) -> bool {
        use ControllerState::*;

        match (self, next) {
            (Finalized, _) => false,
            (_, Finalized) => true,

            (Idle, AwaitingPermission) => true,
            (AwaitingPermission, AwaitingToken) => true,
            (AwaitingToken, CaptureInProgress) => true,
            (CaptureInProgress, Submitting) => true,
            (Submitting, Classifying) => true,
            (Classifying, Retrying) => true,
            (Retrying, CaptureInProgress) => true,

            _ => false,
        }
    }
}

/// Controller for a single enrollment session. Consumed by [`Self::enroll`].
pub struct EnrollmentController<E: EnrollmentEffects> {
    effects: Arc<E>,
    delegate: Arc<dyn ProcessingDelegate>,
    state: ControllerState,
    holder: SessionResultHolder,
    progress: ProgressTranslator,
    classifier: ErrorClassifier,
    capture_started: bool,
}

impl<E: EnrollmentEffects> EnrollmentController<E> {
    pub fn new(
        effects: Arc<E>,
        delegate: Arc<dyn ProcessingDelegate>,
        config: &EnrollmentConfig,
    ) -> Self {
        Self {
            effects,
            delegate,
            state: ControllerState::Idle,
            holder: SessionResultHolder::new(),
            progress: ProgressTranslator::new(config.messages.processing.as_str()),
            classifier: ErrorClassifier::new(config.messages.clone()),
            capture_started: false,
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Run a session for `identifier` to completion and notify the delegate.
    pub async fn enroll(mut self, identifier: impl Into<String>, bound: RetryBound) -> SessionSummary {
        let mut session = EnrollmentSession::new(identifier, bound);
        let span = tracing::info_span!("enrollment", identifier = %session.identifier());

        async {
            let termination = match self.drive(&mut session).await {
                Ok(termination) => termination,
                Err(error) => {
                    tracing::warn!(%error, state = ?self.state, "enrollment session failed");
                    if self.capture_started {
                        self.effects.cancel_in_flight_requests();
                        self.effects.report_cancel();
                    }
                    Termination::Internal {
                        message: error.to_string(),
                    }
                }
            };

            self.finalize(&mut session, &termination);
            self.notify(&session, &termination).await;

            SessionSummary {
                identifier: session.identifier().to_string(),
                outcome: session.outcome(),
                termination,
                last_message: session.last_message().map(str::to_string),
                retry_attempts: session.retry_attempt(),
            }
        }
        .instrument(span)
        .await
    }

    async fn drive(&mut self, session: &mut EnrollmentSession) -> Result<Termination> {
        self.transition_to(ControllerState::AwaitingPermission)?;
        if self.effects.check_or_request_camera_permission().await == PermissionGrant::Denied {
            tracing::warn!("camera access denied");
            return Ok(Termination::PermissionDenied);
        }

        self.transition_to(ControllerState::AwaitingToken)?;
        let token = match self.effects.get_session_token().await {
            Ok(Some(token)) if token.is_usable() => token,
            Ok(_) => {
                tracing::warn!("session token unavailable");
                return Ok(Termination::TokenError);
            }
            Err(error) => {
                tracing::warn!(%error, "session token request failed");
                return Ok(Termination::TokenError);
            }
        };

        self.transition_to(ControllerState::CaptureInProgress)?;
        self.effects.begin_capture(&token).await?;
        self.capture_started = true;
        self.effects.dispatch(UxEvent::UiReady);

        loop {
            let result = self.effects.next_capture_result().await;
            let status = self.holder.record(result).status;
            if !status.is_success() {
                tracing::warn!(%status, "capture ended without a face scan");
                self.effects.cancel_in_flight_requests();
                self.effects.report_cancel();
                return Ok(Termination::CaptureAborted { status });
            }

            let attempt_number = session.retry_attempt();
            let request = match self.holder.accept(attempt_number) {
                Ok(attempt) => attempt.to_request(session.identifier()),
                Err(error) => {
                    tracing::warn!(%error, attempt_number, "capture result rejected");
                    self.effects.cancel_in_flight_requests();
                    self.effects.report_cancel();
                    return Ok(Termination::InvalidCapture);
                }
            };
            self.effects.dispatch(UxEvent::CaptureDone);

            self.transition_to(ControllerState::Submitting)?;
            let response = self
                .submit(session.identifier(), &request, attempt_number)
                .await;

            self.transition_to(ControllerState::Classifying)?;
            let classification = self.classifier.classify(&response);
            session.set_last_message(classification.message.as_str());

            if classification.category.is_success() {
                self.effects.override_success_message(&classification.message);
                self.effects.report_succeed();
                return Ok(Termination::Succeeded);
            }

            match session.apply_retry_policy(&classification) {
                RetryDecision::Retry(event) => {
                    tracing::info!(
                        retry_attempt = session.retry_attempt(),
                        reason = %event.reason,
                        "liveness check failed, retrying capture"
                    );
                    self.transition_to(ControllerState::Retrying)?;
                    self.effects.report_message_override(&event.reason);
                    self.effects.report_retry();
                    self.effects.dispatch(UxEvent::FvRetry(event));
                    self.holder.discard_attempt();
                    self.transition_to(ControllerState::CaptureInProgress)?;
                }
                RetryDecision::Finalize => {
                    tracing::warn!(
                        category = ?classification.category,
                        message = %classification.message,
                        retry_attempt = session.retry_attempt(),
                        "enrollment rejected"
                    );
                    self.effects.report_cancel();
                    return Ok(match classification.category {
                        ClassificationCategory::HardFail => Termination::HardFail,
                        ClassificationCategory::LivenessFail => Termination::LivenessExhausted,
                        ClassificationCategory::Success | ClassificationCategory::UnknownFail => {
                            Termination::UnknownFailure
                        }
                    });
                }
            }
        }
    }

    /// Submit one attempt, relaying upload progress until the verdict arrives.
    async fn submit(
        &mut self,
        identifier: &str,
        request: &EnrollmentRequest,
        attempt_number: u32,
    ) -> SubmissionResponse {
        let reset = self.progress.begin_attempt(attempt_number);
        deliver(self.effects.as_ref(), reset);

        let effects = Arc::clone(&self.effects);
        let (reporter, mut samples) = UploadProgressReporter::channel();
        let submission = effects.submit_enrollment(identifier, request, reporter);
        tokio::pin!(submission);

        let response = loop {
            tokio::select! {
                biased;
                Some(sample) = samples.recv() => self.on_upload_progress(sample),
                response = &mut submission => break response,
            }
        };
        while let Ok(sample) = samples.try_recv() {
            self.on_upload_progress(sample);
        }

        let complete = self.progress.finish();
        deliver(self.effects.as_ref(), complete);
        response
    }

    fn on_upload_progress(&mut self, sample: UploadProgress) {
        for emission in self.progress.translate(sample.fraction()) {
            deliver(self.effects.as_ref(), emission);
        }
    }

    fn transition_to(&mut self, next: ControllerState) -> Result<()> {
        if !self.state.can_transition_to(next) {
            return Err(EnrollmentError::internal(format!(
                "invalid controller transition: {:?} -> {:?}",
                self.state, next
            )));
        }
        tracing::debug!(from = ?self.state, to = ?next, "controller transition");
        self.state = next;
        Ok(())
    }

    fn finalize(&mut self, session: &mut EnrollmentSession, termination: &Termination) {
        if let Err(error) = self.transition_to(ControllerState::Finalized) {
            tracing::warn!(%error, "finalizing from unexpected state");
            self.state = ControllerState::Finalized;
        }
        if let Err(error) = session.finalize(termination.outcome()) {
            tracing::warn!(%error, "session outcome already fixed");
        }
    }

    async fn notify(&self, session: &EnrollmentSession, termination: &Termination) {
        match termination {
            Termination::PermissionDenied => self.delegate.on_camera_access_error(),
            Termination::TokenError => self.delegate.on_session_token_error(),
            _ => {
                if self.capture_started {
                    self.effects.wait_until_done().await;
                }
                self.delegate.on_processing_complete(
                    session.outcome() == SessionOutcome::Success,
                    self.holder.last_result(),
                    session.last_message(),
                );
            }
        }
    }
}

fn deliver<C: CaptureEffects + ?Sized>(effects: &C, emission: ProgressEmission) {
    match emission {
        ProgressEmission::Progress(progress) => effects.report_upload_progress(progress),
        ProgressEmission::MessageOverride(message) => effects.report_message_override(&message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ControllerState::*;

    #[test]
    fn forward_chain_is_allowed() {
        let chain = [
            Idle,
            AwaitingPermission,
            AwaitingToken,
            CaptureInProgress,
            Submitting,
            Classifying,
            Retrying,
            CaptureInProgress,
        ];
        for pair in chain.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{:?} -> {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn finalized_is_terminal() {
        for next in [Idle, AwaitingPermission, CaptureInProgress, Retrying, Finalized] {
            assert!(!Finalized.can_transition_to(next));
        }
        assert!(Finalized.is_terminal());
    }

    #[test]
    fn every_live_state_can_finalize() {
        for state in [
            Idle,
            AwaitingPermission,
            AwaitingToken,
            CaptureInProgress,
            Submitting,
            Classifying,
            Retrying,
        ] {
            assert!(state.can_transition_to(Finalized));
        }
    }

    #[test]
    fn skipping_steps_is_rejected() {
        assert!(!Idle.can_transition_to(CaptureInProgress));
        assert!(!CaptureInProgress.can_transition_to(Classifying));
        assert!(!Submitting.can_transition_to(Retrying));
        assert!(!Classifying.can_transition_to(CaptureInProgress));
    }
}
