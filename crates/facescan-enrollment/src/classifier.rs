//! Error Classifier
//!
//! Turns a submission response into an outcome category and the message the
//! user should see. Precedence is strict:
//!
//! 1. duplicate identity or failed 3D match → [`ClassificationCategory::HardFail`]
//! 2. otherwise failed liveness → [`ClassificationCategory::LivenessFail`]
//! 3. otherwise success if the submission succeeded, else
//!    [`ClassificationCategory::UnknownFail`]
//!
//! Identity-level failures are checked first so that a liveness retry can
//! never mask them.

use facescan_core::effects::{SubmissionFailure, SubmissionResponse};
use facescan_core::{CustomizationMessages, ServerVerdict};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassificationCategory {
    /// Enrolled without disqualifying flags
    Success,
    /// Duplicate identity or 3D mismatch, never retryable
    HardFail,
    /// Liveness failed with identity checks clean, retryable
    LivenessFail,
    /// Network failure or verdict without actionable flags, terminal
    UnknownFail,
}

impl ClassificationCategory {
    pub fn is_success(self) -> bool {
        self == ClassificationCategory::Success
    }
}

/// Server flags reduced to issue booleans. Absent flags are not issues.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictFlags {
    pub duplicate_issue: bool,
    pub match3d_issue: bool,
    pub liveness_issue: bool,
    pub enrolled: bool,
}

impl VerdictFlags {
    pub fn from_verdict(verdict: &ServerVerdict) -> Self {
        Self {
            duplicate_issue: verdict.is_duplicate_issue(),
            match3d_issue: verdict.is_match3d_issue(),
            liveness_issue: verdict.is_liveness_issue(),
            enrolled: verdict.is_enrolled(),
        }
    }

    pub fn is_identity_issue(&self) -> bool {
        self.duplicate_issue || self.match3d_issue
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub category: ClassificationCategory,
    /// Best available message: the server's, else the category default
    pub message: String,
    pub flags: VerdictFlags,
}

#[derive(Debug, Clone)]
pub struct ErrorClassifier {
    messages: CustomizationMessages,
}

impl ErrorClassifier {
    pub fn new(messages: CustomizationMessages) -> Self {
        Self { messages }
    }

    /// Classify a submission response.
    pub fn classify(&self, response: &SubmissionResponse) -> Classification {
        match response {
            Ok(verdict) => self.classify_verdict(verdict, true),
            Err(SubmissionFailure {
                verdict: Some(verdict),
                ..
            }) => self.classify_verdict(verdict, false),
            Err(SubmissionFailure {
                error,
                verdict: None,
            }) => {
                tracing::debug!(%error, "submission failed without a verdict");
                let category = ClassificationCategory::UnknownFail;
                Classification {
                    category,
                    message: self.category_default(category).to_string(),
                    flags: VerdictFlags::default(),
                }
            }
        }
    }

    fn classify_verdict(&self, verdict: &ServerVerdict, submitted: bool) -> Classification {
        let flags = VerdictFlags::from_verdict(verdict);

        let category = if flags.is_identity_issue() {
            ClassificationCategory::HardFail
        } else if flags.liveness_issue {
            ClassificationCategory::LivenessFail
        } else if submitted {
            ClassificationCategory::Success
        } else {
            ClassificationCategory::UnknownFail
        };

        let message = verdict
            .message()
            .unwrap_or_else(|| self.category_default(category))
            .to_string();

        Classification {
            category,
            message,
            flags,
        }
    }

    /// Default message associated with a category.
    pub fn category_default(&self, category: ClassificationCategory) -> &str {
        match category {
            ClassificationCategory::Success => &self.messages.success,
            ClassificationCategory::HardFail => &self.messages.hard_failure,
            ClassificationCategory::LivenessFail => &self.messages.liveness_failure,
            ClassificationCategory::UnknownFail => &self.messages.unknown_failure,
        }
    }
}
