//! Raw output of one capture attempt as handed over by the capture subsystem.

use crate::status::SessionStatus;
use serde::{Deserialize, Serialize};

/// Result of a single capture attempt.
///
/// Aborted attempts carry only a status; completed attempts carry the face
/// scan and the compressed audit trail images. The controller treats this
/// value as immutable once received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureResult {
    /// Identifier of the capture session, unique per attempt
    pub session_id: Option<String>,
    /// Terminal status of the attempt
    pub status: SessionStatus,
    /// Encoded face scan
    pub face_scan: Option<Vec<u8>>,
    /// Compressed audit trail images, best first
    pub audit_trail: Vec<Vec<u8>>,
    /// Low quality compressed audit trail images, best first
    pub low_quality_audit_trail: Vec<Vec<u8>>,
}

impl CaptureResult {
    /// A completed capture with all blobs present.
    pub fn completed(
        session_id: impl Into<String>,
        face_scan: Vec<u8>,
        audit_trail_image: Vec<u8>,
        low_quality_audit_trail_image: Vec<u8>,
    ) -> Self {
        Self {
            session_id: Some(session_id.into()),
            status: SessionStatus::SessionCompletedSuccessfully,
            face_scan: Some(face_scan),
            audit_trail: vec![audit_trail_image],
            low_quality_audit_trail: vec![low_quality_audit_trail_image],
        }
    }

    /// An attempt that ended without producing a capture.
    pub fn aborted(status: SessionStatus) -> Self {
        Self {
            session_id: None,
            status,
            face_scan: None,
            audit_trail: Vec::new(),
            low_quality_audit_trail: Vec::new(),
        }
    }

    /// First (best) audit trail image, if any.
    pub fn audit_trail_image(&self) -> Option<&[u8]> {
        self.audit_trail.first().map(Vec::as_slice)
    }

    /// First (best) low quality audit trail image, if any.
    pub fn low_quality_audit_trail_image(&self) -> Option<&[u8]> {
        self.low_quality_audit_trail.first().map(Vec::as_slice)
    }
}
