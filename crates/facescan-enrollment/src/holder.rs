//! Session Result Holder
//!
//! Keeps the most recent capture result and, when it is usable, the accepted
//! attempt built from it. The controller reads both; nothing else writes them.

use facescan_core::{CaptureResult, EnrollmentError, EnrollmentRequest, Result};

/// One accepted capture cycle, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentAttempt {
    session_id: String,
    face_scan: Vec<u8>,
    audit_trail_image: Vec<u8>,
    low_quality_audit_trail_image: Vec<u8>,
    attempt_number: u32,
}

impl EnrollmentAttempt {
    /// Build an attempt from a completed capture.
    ///
    /// Rejects results without a session id or with any missing or empty
    /// payload blob.
    pub fn from_capture(result: &CaptureResult, attempt_number: u32) -> Result<Self> {
        let session_id = result
            .session_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| EnrollmentError::invalid("capture result has no session id"))?;

        let face_scan = non_empty_blob(result.face_scan.as_deref(), "face scan")?;
        let audit_trail_image = non_empty_blob(result.audit_trail_image(), "audit trail image")?;
        let low_quality_audit_trail_image = non_empty_blob(
            result.low_quality_audit_trail_image(),
            "low quality audit trail image",
        )?;

        Ok(Self {
            session_id: session_id.to_string(),
            face_scan: face_scan.to_vec(),
            audit_trail_image: audit_trail_image.to_vec(),
            low_quality_audit_trail_image: low_quality_audit_trail_image.to_vec(),
            attempt_number,
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn attempt_number(&self) -> u32 {
        self.attempt_number
    }

    pub fn face_scan(&self) -> &[u8] {
        &self.face_scan
    }

    /// Submission payload for `identifier`.
    pub fn to_request(&self, identifier: &str) -> EnrollmentRequest {
        EnrollmentRequest::from_blobs(
            identifier,
            self.session_id.as_str(),
            &self.face_scan,
            &self.audit_trail_image,
            &self.low_quality_audit_trail_image,
        )
    }
}

fn non_empty_blob<'a>(blob: Option<&'a [u8]>, what: &str) -> Result<&'a [u8]> {
    match blob {
        Some(bytes) if !bytes.is_empty() => Ok(bytes),
        _ => Err(EnrollmentError::invalid(format!(
            "capture result has no {what}"
        ))),
    }
}

#[derive(Debug, Default)]
pub struct SessionResultHolder {
    last_result: Option<CaptureResult>,
    current: Option<EnrollmentAttempt>,
}

impl SessionResultHolder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a fresh capture result, superseding the previous attempt.
    pub fn record(&mut self, result: CaptureResult) -> &CaptureResult {
        self.current = None;
        self.last_result.insert(result)
    }

    /// Accept the recorded result as attempt `attempt_number`.
    pub fn accept(&mut self, attempt_number: u32) -> Result<&EnrollmentAttempt> {
        let result = self
            .last_result
            .as_ref()
            .ok_or_else(|| EnrollmentError::internal("no capture result recorded"))?;
        let attempt = EnrollmentAttempt::from_capture(result, attempt_number)?;
        Ok(&*self.current.insert(attempt))
    }

    /// Most recent capture result, accepted or not.
    pub fn last_result(&self) -> Option<&CaptureResult> {
        self.last_result.as_ref()
    }

    /// Accepted attempt awaiting its verdict.
    pub fn current(&self) -> Option<&EnrollmentAttempt> {
        self.current.as_ref()
    }

    /// Drop the accepted attempt after a retry was granted.
    pub fn discard_attempt(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use facescan_core::SessionStatus;

    fn completed() -> CaptureResult {
        CaptureResult::completed("session-1", b"scan".to_vec(), b"audit".to_vec(), b"lq".to_vec())
    }

    #[test]
    fn accepts_complete_capture() {
        let mut holder = SessionResultHolder::new();
        holder.record(completed());
        let attempt = holder.accept(2).unwrap();

        assert_eq!(attempt.session_id(), "session-1");
        assert_eq!(attempt.attempt_number(), 2);
        assert_eq!(attempt.face_scan(), b"scan");

        let request = attempt.to_request("user-7");
        assert_eq!(request.external_database_ref_id, "user-7");
        assert_eq!(request.session_id, "session-1");
    }

    #[test]
    fn rejects_missing_session_id_or_payload() {
        let mut no_id = completed();
        no_id.session_id = Some(String::new());
        assert_matches!(
            EnrollmentAttempt::from_capture(&no_id, 0),
            Err(EnrollmentError::Invalid { .. })
        );

        let mut empty_scan = completed();
        empty_scan.face_scan = Some(Vec::new());
        assert_matches!(
            EnrollmentAttempt::from_capture(&empty_scan, 0),
            Err(EnrollmentError::Invalid { .. })
        );

        let mut no_audit = completed();
        no_audit.audit_trail.clear();
        assert_matches!(
            EnrollmentAttempt::from_capture(&no_audit, 0),
            Err(EnrollmentError::Invalid { .. })
        );

        let aborted = CaptureResult::aborted(SessionStatus::UserCancelled);
        assert!(EnrollmentAttempt::from_capture(&aborted, 0).is_err());
    }

    #[test]
    fn recording_supersedes_current_attempt() {
        let mut holder = SessionResultHolder::new();
        holder.record(completed());
        holder.accept(0).unwrap();
        assert!(holder.current().is_some());

        holder.record(CaptureResult::aborted(SessionStatus::Timeout));
        assert!(holder.current().is_none());
        assert_eq!(
            holder.last_result().map(|r| r.status),
            Some(SessionStatus::Timeout)
        );
    }

    #[test]
    fn accept_without_record_is_internal_error() {
        let mut holder = SessionResultHolder::new();
        assert_matches!(holder.accept(0), Err(EnrollmentError::Internal { .. }));
    }
}
