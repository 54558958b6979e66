//! Enrollment session state owned by the controller.

use crate::classifier::Classification;
use crate::retry::{RetryBound, RetryCounter, RetryDecision, RetryPolicy};
use facescan_core::{EnrollmentError, Result, SessionStatus};
use serde::{Deserialize, Serialize};

/// Session outcome. Moves only from `Pending` to a terminal value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionOutcome {
    #[default]
    Pending,
    Success,
    Canceled,
}

impl SessionOutcome {
    pub fn is_terminal(self) -> bool {
        self != SessionOutcome::Pending
    }
}

/// Why a session ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    Succeeded,
    /// Camera access refused
    PermissionDenied,
    /// Token acquisition failed or returned nothing usable
    TokenError,
    /// Capture subsystem reported a non-success status
    CaptureAborted { status: SessionStatus },
    /// Capture completed without a usable payload
    InvalidCapture,
    /// Duplicate identity or 3D mismatch
    HardFail,
    /// Liveness failed and no retries are left
    LivenessExhausted,
    /// Network failure or verdict without actionable flags
    UnknownFailure,
    /// The controller could not proceed
    Internal { message: String },
}

impl Termination {
    pub fn outcome(&self) -> SessionOutcome {
        match self {
            Termination::Succeeded => SessionOutcome::Success,
            _ => SessionOutcome::Canceled,
        }
    }
}

/// One enrollment run.
#[derive(Debug)]
pub struct EnrollmentSession {
    identifier: String,
    retry_policy: RetryPolicy,
    retry_counter: RetryCounter,
    outcome: SessionOutcome,
    last_message: Option<String>,
}

impl EnrollmentSession {
    pub fn new(identifier: impl Into<String>, bound: RetryBound) -> Self {
        Self {
            identifier: identifier.into(),
            retry_policy: RetryPolicy::new(bound),
            retry_counter: RetryCounter::default(),
            outcome: SessionOutcome::Pending,
            last_message: None,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn retry_bound(&self) -> RetryBound {
        self.retry_policy.bound()
    }

    pub fn retry_attempt(&self) -> u32 {
        self.retry_counter.get()
    }

    pub fn outcome(&self) -> SessionOutcome {
        self.outcome
    }

    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    /// Record the message produced by the latest attempt.
    pub fn set_last_message(&mut self, message: impl Into<String>) {
        self.last_message = Some(message.into());
    }

    /// Consult the retry policy for the latest classification.
    pub fn apply_retry_policy(&mut self, classification: &Classification) -> RetryDecision {
        self.retry_policy
            .evaluate(classification, &mut self.retry_counter)
    }

    /// Fix the outcome. Fails if already finalized or if `outcome` is `Pending`.
    pub fn finalize(&mut self, outcome: SessionOutcome) -> Result<()> {
        if self.outcome.is_terminal() {
            return Err(EnrollmentError::internal(format!(
                "session {} already finalized as {:?}",
                self.identifier, self.outcome
            )));
        }
        if !outcome.is_terminal() {
            return Err(EnrollmentError::internal(
                "session cannot be finalized as pending",
            ));
        }
        self.outcome = outcome;
        Ok(())
    }
}

/// What a finished session reports back to its caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub identifier: String,
    pub outcome: SessionOutcome,
    pub termination: Termination,
    pub last_message: Option<String>,
    pub retry_attempts: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn outcome_is_set_exactly_once() {
        let mut session = EnrollmentSession::new("user-1", RetryBound::Unlimited);
        assert_eq!(session.outcome(), SessionOutcome::Pending);

        session.finalize(SessionOutcome::Canceled).unwrap();
        assert_eq!(session.outcome(), SessionOutcome::Canceled);

        assert_matches!(
            session.finalize(SessionOutcome::Success),
            Err(EnrollmentError::Internal { .. })
        );
        assert_eq!(session.outcome(), SessionOutcome::Canceled);
    }

    #[test]
    fn cannot_finalize_as_pending() {
        let mut session = EnrollmentSession::new("user-1", RetryBound::Unlimited);
        assert!(session.finalize(SessionOutcome::Pending).is_err());
        assert_eq!(session.outcome(), SessionOutcome::Pending);
    }

    #[test]
    fn last_message_is_overwritten() {
        let mut session = EnrollmentSession::new("user-1", RetryBound::Bounded(1));
        assert_eq!(session.last_message(), None);
        session.set_last_message("first");
        session.set_last_message("second");
        assert_eq!(session.last_message(), Some("second"));
        assert_eq!(session.retry_bound(), RetryBound::Bounded(1));
    }

    #[test]
    fn only_success_termination_succeeds() {
        assert_eq!(Termination::Succeeded.outcome(), SessionOutcome::Success);
        assert_eq!(
            Termination::CaptureAborted {
                status: SessionStatus::Timeout
            }
            .outcome(),
            SessionOutcome::Canceled
        );
        assert_eq!(Termination::LivenessExhausted.outcome(), SessionOutcome::Canceled);
    }
}
