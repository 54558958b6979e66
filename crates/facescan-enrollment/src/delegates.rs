//! Completion consumer adapters.
//!
//! Both adapters settle at most once: the first terminal notification wins and
//! later ones are dropped. A session superseded by a newer one can therefore
//! be told about the context switch without racing its own completion.

use facescan_core::effects::ProcessingDelegate;
use facescan_core::{CaptureResult, CustomizationMessages, SessionStatus};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{mpsc, oneshot};

/// Rejection delivered to a promise-style consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("enrollment rejected with {status} ({code})")]
pub struct EnrollmentRejection {
    pub status: SessionStatus,
    pub code: u32,
    pub message: Option<String>,
}

impl EnrollmentRejection {
    pub fn new(status: SessionStatus, message: Option<String>) -> Self {
        Self {
            status,
            code: status.code(),
            message,
        }
    }
}

/// Resolved with the final message, or rejected.
pub type PromiseOutcome = std::result::Result<Option<String>, EnrollmentRejection>;

/// Settles a oneshot channel the way a JS promise would be settled.
pub struct PromiseProcessingDelegate {
    sender: Mutex<Option<oneshot::Sender<PromiseOutcome>>>,
    session_token_error: String,
    camera_access_error: String,
    context_switch: String,
}

impl PromiseProcessingDelegate {
    pub fn new(messages: &CustomizationMessages) -> (Self, oneshot::Receiver<PromiseOutcome>) {
        let (tx, rx) = oneshot::channel();
        let delegate = Self {
            sender: Mutex::new(Some(tx)),
            session_token_error: messages.session_token_error.clone(),
            camera_access_error: messages.camera_access_error.clone(),
            context_switch: messages.context_switch.clone(),
        };
        (delegate, rx)
    }

    pub fn is_settled(&self) -> bool {
        self.sender.lock().is_none()
    }

    fn settle(&self, outcome: PromiseOutcome) {
        let Some(tx) = self.sender.lock().take() else {
            tracing::debug!(?outcome, "promise already settled");
            return;
        };
        if tx.send(outcome).is_err() {
            tracing::trace!("promise receiver dropped before settlement");
        }
    }

    fn reject(&self, status: SessionStatus, message: Option<String>) {
        self.settle(Err(EnrollmentRejection::new(status, message)));
    }
}

impl ProcessingDelegate for PromiseProcessingDelegate {
    fn on_processing_complete(
        &self,
        is_success: bool,
        last_result: Option<&CaptureResult>,
        message: Option<&str>,
    ) {
        if is_success {
            self.settle(Ok(message.map(str::to_string)));
            return;
        }
        match last_result {
            Some(result) => self.reject(result.status, message.map(str::to_string)),
            // Nothing was ever captured, so the session never really started
            None => self.on_session_token_error(),
        }
    }

    fn on_session_token_error(&self) {
        self.reject(
            SessionStatus::UnknownInternalError,
            Some(self.session_token_error.clone()),
        );
    }

    fn on_camera_access_error(&self) {
        self.reject(
            SessionStatus::CameraPermissionDenied,
            Some(self.camera_access_error.clone()),
        );
    }

    fn on_session_context_switch(&self) {
        self.reject(SessionStatus::ContextSwitch, Some(self.context_switch.clone()));
    }
}

/// Terminal notification emitted by [`EventProcessingDelegate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProcessingEvent {
    Completed {
        is_success: bool,
        status: Option<SessionStatus>,
        session_id: Option<String>,
        message: Option<String>,
    },
    SessionTokenError,
    CameraAccessError,
    ContextSwitch,
}

/// Publishes the terminal notification on an unbounded channel.
pub struct EventProcessingDelegate {
    tx: mpsc::UnboundedSender<ProcessingEvent>,
    emitted: AtomicBool,
}

impl EventProcessingDelegate {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ProcessingEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let delegate = Self {
            tx,
            emitted: AtomicBool::new(false),
        };
        (delegate, rx)
    }

    fn emit(&self, event: ProcessingEvent) {
        if self.emitted.swap(true, Ordering::AcqRel) {
            tracing::debug!(?event, "terminal event already emitted");
            return;
        }
        if self.tx.send(event).is_err() {
            tracing::trace!("event receiver dropped");
        }
    }
}

impl ProcessingDelegate for EventProcessingDelegate {
    fn on_processing_complete(
        &self,
        is_success: bool,
        last_result: Option<&CaptureResult>,
        message: Option<&str>,
    ) {
        self.emit(ProcessingEvent::Completed {
            is_success,
            status: last_result.map(|result| result.status),
            session_id: last_result.and_then(|result| result.session_id.clone()),
            message: message.map(str::to_string),
        });
    }

    fn on_session_token_error(&self) {
        self.emit(ProcessingEvent::SessionTokenError);
    }

    fn on_camera_access_error(&self) {
        self.emit(ProcessingEvent::CameraAccessError);
    }

    fn on_session_context_switch(&self) {
        self.emit(ProcessingEvent::ContextSwitch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn messages() -> CustomizationMessages {
        CustomizationMessages::default()
    }

    fn completed() -> CaptureResult {
        CaptureResult::completed("session-9", b"scan".to_vec(), b"a".to_vec(), b"b".to_vec())
    }

    #[tokio::test]
    async fn success_resolves_with_message() {
        let (delegate, rx) = PromiseProcessingDelegate::new(&messages());
        delegate.on_processing_complete(true, Some(&completed()), Some("Verified"));
        assert_eq!(rx.await.unwrap(), Ok(Some("Verified".to_string())));
    }

    #[tokio::test]
    async fn failure_rejects_with_capture_status() {
        let (delegate, rx) = PromiseProcessingDelegate::new(&messages());
        let aborted = CaptureResult::aborted(SessionStatus::Timeout);
        delegate.on_processing_complete(false, Some(&aborted), None);

        let rejection = rx.await.unwrap().unwrap_err();
        assert_eq!(rejection.status, SessionStatus::Timeout);
        assert_eq!(rejection.code, SessionStatus::Timeout.code());
        assert_eq!(rejection.message, None);
    }

    #[tokio::test]
    async fn failure_without_capture_is_token_error() {
        let (delegate, rx) = PromiseProcessingDelegate::new(&messages());
        delegate.on_processing_complete(false, None, Some("ignored"));

        let rejection = rx.await.unwrap().unwrap_err();
        assert_eq!(rejection.status, SessionStatus::UnknownInternalError);
        assert_eq!(rejection.message, Some(messages().session_token_error));
    }

    #[tokio::test]
    async fn camera_error_rejects_with_configured_message() {
        let mut custom = messages();
        custom.camera_access_error = "Enable the camera in Settings".to_string();
        let (delegate, rx) = PromiseProcessingDelegate::new(&custom);
        delegate.on_camera_access_error();
        assert_matches!(
            rx.await.unwrap(),
            Err(EnrollmentRejection {
                status: SessionStatus::CameraPermissionDenied,
                message: Some(ref message),
                ..
            }) if message == "Enable the camera in Settings"
        );
    }

    #[tokio::test]
    async fn first_settlement_wins() {
        let (delegate, rx) = PromiseProcessingDelegate::new(&messages());
        delegate.on_session_context_switch();
        assert!(delegate.is_settled());
        delegate.on_processing_complete(true, Some(&completed()), Some("late"));

        let rejection = rx.await.unwrap().unwrap_err();
        assert_eq!(rejection.status, SessionStatus::ContextSwitch);
        assert_eq!(rejection.message, Some(messages().context_switch));
    }

    #[tokio::test]
    async fn event_delegate_emits_once() {
        let (delegate, mut rx) = EventProcessingDelegate::new();
        delegate.on_processing_complete(false, Some(&completed()), Some("Rejected"));
        delegate.on_session_token_error();
        drop(delegate);

        assert_eq!(
            rx.recv().await,
            Some(ProcessingEvent::Completed {
                is_success: false,
                status: Some(SessionStatus::SessionCompletedSuccessfully),
                session_id: Some("session-9".to_string()),
                message: Some("Rejected".to_string()),
            })
        );
        assert_eq!(rx.recv().await, None);
    }

    #[test]
    fn event_wire_shape() {
        let value = serde_json::to_value(ProcessingEvent::CameraAccessError).unwrap();
        assert_eq!(value["type"], "camera_access_error");
    }
}
