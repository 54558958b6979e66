//! Completion consumer that records every notification.

#![allow(clippy::disallowed_types)]

use facescan_core::effects::ProcessingDelegate;
use facescan_core::{CaptureResult, SessionStatus};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DelegateCall {
    ProcessingComplete {
        is_success: bool,
        status: Option<SessionStatus>,
        message: Option<String>,
    },
    SessionTokenError,
    CameraAccessError,
    SessionContextSwitch,
}

/// Unlike the production adapters this keeps every call, so tests can assert
/// that a session notified exactly once.
#[derive(Debug, Default)]
pub struct RecordingDelegate {
    calls: Mutex<Vec<DelegateCall>>,
}

impl RecordingDelegate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<DelegateCall> {
        self.calls.lock().unwrap().clone()
    }

    /// The single recorded call. Panics if there were zero or several.
    pub fn only_call(&self) -> DelegateCall {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one notification, got {calls:?}");
        calls[0].clone()
    }

    fn push(&self, call: DelegateCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl ProcessingDelegate for RecordingDelegate {
    fn on_processing_complete(
        &self,
        is_success: bool,
        last_result: Option<&CaptureResult>,
        message: Option<&str>,
    ) {
        self.push(DelegateCall::ProcessingComplete {
            is_success,
            status: last_result.map(|result| result.status),
            message: message.map(str::to_string),
        });
    }

    fn on_session_token_error(&self) {
        self.push(DelegateCall::SessionTokenError);
    }

    fn on_camera_access_error(&self) {
        self.push(DelegateCall::CameraAccessError);
    }

    fn on_session_context_switch(&self) {
        self.push(DelegateCall::SessionContextSwitch);
    }
}
