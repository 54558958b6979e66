//! Server verdict for a submitted enrollment attempt.
//!
//! Wire shape:
//!
//! ```text
//! { error?: string,
//!   enrollmentResult?: { isDuplicate?: bool, isNotMatch?: bool, isLive?: bool, isEnrolled?: bool } }
//! ```
//!
//! Every flag is tri-state. An absent flag is neutral: it never triggers an
//! issue, so a missing `isLive` is not a liveness problem and a missing
//! `isDuplicate` is not a duplicate.

use crate::errors::Result;
use serde::{Deserialize, Serialize};

/// Per-check results reported by the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentResultFlags {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_duplicate: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_not_match: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_live: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_enrolled: Option<bool>,
}

/// Parsed server response to a submitted attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerVerdict {
    /// Message overriding the default for whatever category the verdict lands in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrollment_result: Option<EnrollmentResultFlags>,
}

impl ServerVerdict {
    /// Parse a verdict from a JSON response body.
    pub fn from_json(body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Verdict carrying only flags.
    pub fn with_flags(flags: EnrollmentResultFlags) -> Self {
        Self {
            error: None,
            enrollment_result: Some(flags),
        }
    }

    /// Attach a server message.
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    /// Server-supplied message, if any.
    pub fn message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn flags(&self) -> EnrollmentResultFlags {
        self.enrollment_result.unwrap_or_default()
    }

    /// Duplicate identity detected (flag strictly `true`).
    pub fn is_duplicate_issue(&self) -> bool {
        self.flags().is_duplicate == Some(true)
    }

    /// 3D match failed (flag strictly `true`).
    pub fn is_match3d_issue(&self) -> bool {
        self.flags().is_not_match == Some(true)
    }

    /// Liveness failed (flag strictly `false`).
    pub fn is_liveness_issue(&self) -> bool {
        self.flags().is_live == Some(false)
    }

    /// Identity already enrolled (flag strictly `true`).
    pub fn is_enrolled(&self) -> bool {
        self.flags().is_enrolled == Some(true)
    }
}
