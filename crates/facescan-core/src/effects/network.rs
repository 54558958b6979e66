//! Enrollment network client interface.
//!
//! Upload progress travels over a channel instead of a callback so that the
//! controller consumes it on its own step: the network client only sends
//! `(bytes_sent, total_bytes)` samples, and the receiver is dropped when the
//! attempt ends, which discards any sample that arrives late.

use crate::errors::EnrollmentError;
use crate::request::EnrollmentRequest;
use crate::verdict::ServerVerdict;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// One upload progress sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadProgress {
    pub bytes_sent: u64,
    pub total_bytes: u64,
}

impl UploadProgress {
    pub fn new(bytes_sent: u64, total_bytes: u64) -> Self {
        Self {
            bytes_sent,
            total_bytes,
        }
    }

    /// Fraction of the body sent, clamped to `[0, 1]`.
    ///
    /// An empty body (`total_bytes == 0`) counts as fully sent.
    pub fn fraction(&self) -> f32 {
        if self.total_bytes == 0 {
            return 1.0;
        }
        (self.bytes_sent as f64 / self.total_bytes as f64).clamp(0.0, 1.0) as f32
    }
}

/// Sending half of an attempt's progress channel, handed to the network client.
#[derive(Debug, Clone)]
pub struct UploadProgressReporter {
    tx: mpsc::UnboundedSender<UploadProgress>,
}

impl UploadProgressReporter {
    /// Create a reporter and the receiver the controller drains.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<UploadProgress>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Report bytes sent so far. Samples for a finished attempt are dropped.
    pub fn report(&self, bytes_sent: u64, total_bytes: u64) {
        if self
            .tx
            .send(UploadProgress::new(bytes_sent, total_bytes))
            .is_err()
        {
            tracing::trace!(bytes_sent, total_bytes, "upload progress after attempt ended");
        }
    }
}

/// Failed submission. The server may still have answered with a verdict body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{error}")]
pub struct SubmissionFailure {
    pub error: EnrollmentError,
    pub verdict: Option<ServerVerdict>,
}

impl SubmissionFailure {
    /// Transport-level failure without any parsed response.
    pub fn transport(error: EnrollmentError) -> Self {
        Self {
            error,
            verdict: None,
        }
    }

    /// The server rejected the attempt and explained why.
    pub fn rejected(error: EnrollmentError, verdict: ServerVerdict) -> Self {
        Self {
            error,
            verdict: Some(verdict),
        }
    }
}

/// What a submission yields: the verdict, or a failure with an optional verdict.
pub type SubmissionResponse = std::result::Result<ServerVerdict, SubmissionFailure>;

#[async_trait]
pub trait EnrollmentNetworkEffects: Send + Sync {
    /// Submit an attempt for `identifier`, reporting upload progress as the
    /// body is sent.
    async fn submit_enrollment(
        &self,
        identifier: &str,
        request: &EnrollmentRequest,
        progress: UploadProgressReporter,
    ) -> SubmissionResponse;

    /// Abort every submission still in flight.
    fn cancel_in_flight_requests(&self);
}
