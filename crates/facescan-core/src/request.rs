//! Enrollment submission payload.

use crate::errors::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Body posted to the enrollment endpoint. Blobs are base64 encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentRequest {
    pub face_scan: String,
    pub audit_trail_image: String,
    pub low_quality_audit_trail_image: String,
    #[serde(rename = "externalDatabaseRefID")]
    pub external_database_ref_id: String,
    pub session_id: String,
}

impl EnrollmentRequest {
    /// Build a request from raw capture blobs.
    pub fn from_blobs(
        external_database_ref_id: impl Into<String>,
        session_id: impl Into<String>,
        face_scan: &[u8],
        audit_trail_image: &[u8],
        low_quality_audit_trail_image: &[u8],
    ) -> Self {
        Self {
            face_scan: STANDARD.encode(face_scan),
            audit_trail_image: STANDARD.encode(audit_trail_image),
            low_quality_audit_trail_image: STANDARD.encode(low_quality_audit_trail_image),
            external_database_ref_id: external_database_ref_id.into(),
            session_id: session_id.into(),
        }
    }

    /// JSON body as sent over the wire.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}
