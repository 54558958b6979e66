//! Retry Policy
//!
//! Only [`ClassificationCategory::LivenessFail`] may loop the session back
//! into capture, and only while the retry bound allows it. Every other
//! category, and liveness once retries are exhausted, ends the session.

use crate::classifier::{Classification, ClassificationCategory};
use facescan_core::effects::RetryEvent;
use serde::{Deserialize, Serialize};

/// Upper bound on capture retries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetryBound {
    #[default]
    Unlimited,
    Bounded(u32),
}

impl RetryBound {
    /// Interpret a caller-supplied bound: absent or negative means unlimited.
    pub fn from_max_retries(max_retries: Option<i64>) -> Self {
        match max_retries {
            None => RetryBound::Unlimited,
            Some(n) if n < 0 => RetryBound::Unlimited,
            Some(n) => RetryBound::Bounded(u32::try_from(n).unwrap_or(u32::MAX)),
        }
    }

    /// Whether a retry is allowed after `retry_attempt` retries.
    pub fn allows(self, retry_attempt: u32) -> bool {
        match self {
            RetryBound::Unlimited => true,
            RetryBound::Bounded(max) => retry_attempt < max,
        }
    }
}

/// Retries granted so far. Only [`RetryPolicy::evaluate`] increments it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryCounter(u32);

impl RetryCounter {
    pub fn get(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision {
    /// Capture again; the event is reported to UX listeners
    Retry(RetryEvent),
    /// End the session with the classification's outcome
    Finalize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryPolicy {
    bound: RetryBound,
}

impl RetryPolicy {
    pub fn new(bound: RetryBound) -> Self {
        Self { bound }
    }

    pub fn bound(&self) -> RetryBound {
        self.bound
    }

    /// Decide whether `classification` earns another capture attempt.
    ///
    /// A granted retry increments `counter`, so the bound invariant
    /// `counter <= max` holds by construction.
    pub fn evaluate(
        &self,
        classification: &Classification,
        counter: &mut RetryCounter,
    ) -> RetryDecision {
        if classification.category != ClassificationCategory::LivenessFail {
            return RetryDecision::Finalize;
        }
        if !self.bound.allows(counter.0) {
            tracing::debug!(
                retry_attempt = counter.0,
                bound = ?self.bound,
                "liveness retries exhausted"
            );
            return RetryDecision::Finalize;
        }

        counter.0 = counter.0.saturating_add(1);
        let flags = classification.flags;
        RetryDecision::Retry(RetryEvent {
            reason: classification.message.clone(),
            match3d: !flags.match3d_issue,
            liveness: !flags.liveness_issue,
            duplicate: flags.duplicate_issue,
            enrolled: flags.enrolled,
        })
    }
}
