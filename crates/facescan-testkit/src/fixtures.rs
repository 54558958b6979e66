//! Capture results and verdicts used across scenarios.

use facescan_core::{CaptureResult, EnrollmentResultFlags, ServerVerdict, SessionStatus};

pub const FACE_SCAN: &[u8] = b"face-scan";
pub const AUDIT_TRAIL_IMAGE: &[u8] = b"audit-trail";
pub const LOW_QUALITY_AUDIT_TRAIL_IMAGE: &[u8] = b"low-quality-audit-trail";

pub fn completed_capture(session_id: &str) -> CaptureResult {
    CaptureResult::completed(
        session_id,
        FACE_SCAN.to_vec(),
        AUDIT_TRAIL_IMAGE.to_vec(),
        LOW_QUALITY_AUDIT_TRAIL_IMAGE.to_vec(),
    )
}

pub fn aborted_capture(status: SessionStatus) -> CaptureResult {
    CaptureResult::aborted(status)
}

/// Enrolled, live, no identity issues.
pub fn clean_verdict() -> ServerVerdict {
    ServerVerdict::with_flags(EnrollmentResultFlags {
        is_duplicate: Some(false),
        is_not_match: Some(false),
        is_live: Some(true),
        is_enrolled: Some(true),
    })
}

/// Liveness failed, identity checks passed.
pub fn liveness_failure_verdict() -> ServerVerdict {
    ServerVerdict::with_flags(EnrollmentResultFlags {
        is_duplicate: Some(false),
        is_not_match: Some(false),
        is_live: Some(false),
        is_enrolled: Some(false),
    })
}

/// Duplicate identity that also failed liveness.
pub fn duplicate_verdict() -> ServerVerdict {
    ServerVerdict::with_flags(EnrollmentResultFlags {
        is_duplicate: Some(true),
        is_not_match: None,
        is_live: Some(false),
        is_enrolled: Some(false),
    })
}
