//! Mock collaborators for enrollment scenarios
//!
//! `MockEnrollmentEffects` implements every collaborator trait the controller
//! needs. Capture results and submission responses are scripted up front;
//! everything the controller tells the collaborators is recorded for
//! assertions.
//!
//! # Blocking Lock Usage
//!
//! Uses `std::sync::Mutex` for recorded state. Guards are never held across
//! an `.await`; the capture queue uses an async mutex because a held capture
//! waits on it.

#![allow(clippy::disallowed_types)]

use async_trait::async_trait;
use facescan_core::effects::{
    CameraAuthorization, CaptureEffects, EnrollmentNetworkEffects, PermissionEffects,
    SessionToken, SessionTokenEffects, SubmissionFailure, SubmissionResponse,
    UploadProgressReporter, UxEvent, UxEventEffects,
};
use facescan_core::{
    CaptureResult, EnrollmentError, EnrollmentRequest, Result, ServerVerdict, SessionStatus,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Callback received by the capture subsystem.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureReport {
    Progress(f32),
    MessageOverride(String),
    SuccessMessage(String),
    Succeed,
    Retry,
    Cancel,
}

/// One submission as seen by the network collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedSubmission {
    pub identifier: String,
    pub request: EnrollmentRequest,
}

/// Upload samples to report, then the response to return.
#[derive(Debug, Clone)]
pub struct ScriptedSubmission {
    pub progress: Vec<(u64, u64)>,
    pub response: SubmissionResponse,
}

impl ScriptedSubmission {
    pub fn accepted(verdict: ServerVerdict) -> Self {
        Self {
            progress: Vec::new(),
            response: Ok(verdict),
        }
    }

    /// Server answered with an error status and a verdict body.
    pub fn rejected(verdict: ServerVerdict) -> Self {
        Self {
            progress: Vec::new(),
            response: Err(SubmissionFailure::rejected(
                EnrollmentError::network("enrollment rejected by server"),
                verdict,
            )),
        }
    }

    pub fn network_error(message: &str) -> Self {
        Self {
            progress: Vec::new(),
            response: Err(SubmissionFailure::transport(EnrollmentError::network(
                message,
            ))),
        }
    }

    pub fn with_progress(mut self, samples: Vec<(u64, u64)>) -> Self {
        self.progress = samples;
        self
    }
}

#[derive(Debug)]
struct MockState {
    authorization: CameraAuthorization,
    grant_on_request: bool,
    access_requests: usize,
    token: Result<Option<SessionToken>>,
    begin_capture_calls: usize,
    begin_capture_error: Option<EnrollmentError>,
    hold_captures: bool,
    reports: Vec<CaptureReport>,
    submissions: Vec<RecordedSubmission>,
    responses: VecDeque<ScriptedSubmission>,
    cancellations: usize,
    ux_events: Vec<UxEvent>,
    done_calls: usize,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            authorization: CameraAuthorization::Authorized,
            grant_on_request: true,
            access_requests: 0,
            token: Ok(Some(SessionToken::new("test-session-token"))),
            begin_capture_calls: 0,
            begin_capture_error: None,
            hold_captures: false,
            reports: Vec::new(),
            submissions: Vec::new(),
            responses: VecDeque::new(),
            cancellations: 0,
            ux_events: Vec::new(),
            done_calls: 0,
        }
    }
}

/// Scriptable implementation of every enrollment collaborator.
#[derive(Debug, Clone)]
pub struct MockEnrollmentEffects {
    state: Arc<Mutex<MockState>>,
    captures_tx: mpsc::UnboundedSender<CaptureResult>,
    captures_rx: Arc<tokio::sync::Mutex<mpsc::UnboundedReceiver<CaptureResult>>>,
}

impl Default for MockEnrollmentEffects {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEnrollmentEffects {
    pub fn new() -> Self {
        let (captures_tx, captures_rx) = mpsc::unbounded_channel();
        Self {
            state: Arc::new(Mutex::new(MockState::default())),
            captures_tx,
            captures_rx: Arc::new(tokio::sync::Mutex::new(captures_rx)),
        }
    }

    // Scripting

    pub fn set_camera_authorization(&self, authorization: CameraAuthorization) {
        self.state.lock().unwrap().authorization = authorization;
    }

    pub fn set_grant_on_request(&self, grant: bool) {
        self.state.lock().unwrap().grant_on_request = grant;
    }

    pub fn set_session_token(&self, token: Result<Option<SessionToken>>) {
        self.state.lock().unwrap().token = token;
    }

    /// Make `begin_capture` fail with `error`.
    pub fn fail_begin_capture(&self, error: EnrollmentError) {
        self.state.lock().unwrap().begin_capture_error = Some(error);
    }

    /// When set, an empty capture queue waits for the next pushed result
    /// instead of ending the capture as user-cancelled.
    pub fn hold_captures(&self, hold: bool) {
        self.state.lock().unwrap().hold_captures = hold;
    }

    pub fn push_capture(&self, result: CaptureResult) {
        self.captures_tx.send(result).unwrap();
    }

    pub fn script_submission(&self, submission: ScriptedSubmission) {
        self.state.lock().unwrap().responses.push_back(submission);
    }

    // Observation

    pub fn reports(&self) -> Vec<CaptureReport> {
        self.state.lock().unwrap().reports.clone()
    }

    /// Progress values in delivery order.
    pub fn progress_reports(&self) -> Vec<f32> {
        self.reports()
            .into_iter()
            .filter_map(|report| match report {
                CaptureReport::Progress(value) => Some(value),
                _ => None,
            })
            .collect()
    }

    pub fn submissions(&self) -> Vec<RecordedSubmission> {
        self.state.lock().unwrap().submissions.clone()
    }

    pub fn cancellations(&self) -> usize {
        self.state.lock().unwrap().cancellations
    }

    pub fn ux_events(&self) -> Vec<UxEvent> {
        self.state.lock().unwrap().ux_events.clone()
    }

    pub fn access_requests(&self) -> usize {
        self.state.lock().unwrap().access_requests
    }

    pub fn begin_capture_calls(&self) -> usize {
        self.state.lock().unwrap().begin_capture_calls
    }

    pub fn done_calls(&self) -> usize {
        self.state.lock().unwrap().done_calls
    }

    /// Yield until `begin_capture` has been called at least `count` times.
    pub async fn wait_for_capture_start(&self, count: usize) {
        while self.begin_capture_calls() < count {
            tokio::task::yield_now().await;
        }
    }

    fn record(&self, report: CaptureReport) {
        self.state.lock().unwrap().reports.push(report);
    }
}

#[async_trait]
impl PermissionEffects for MockEnrollmentEffects {
    async fn camera_authorization(&self) -> CameraAuthorization {
        self.state.lock().unwrap().authorization
    }

    async fn request_camera_access(&self) -> bool {
        let mut state = self.state.lock().unwrap();
        state.access_requests += 1;
        state.grant_on_request
    }
}

#[async_trait]
impl SessionTokenEffects for MockEnrollmentEffects {
    async fn get_session_token(&self) -> Result<Option<SessionToken>> {
        self.state.lock().unwrap().token.clone()
    }
}

#[async_trait]
impl CaptureEffects for MockEnrollmentEffects {
    async fn begin_capture(&self, _token: &SessionToken) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.begin_capture_calls += 1;
        match state.begin_capture_error.clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    async fn next_capture_result(&self) -> CaptureResult {
        let hold = self.state.lock().unwrap().hold_captures;
        let mut captures = self.captures_rx.lock().await;
        if hold {
            captures
                .recv()
                .await
                .unwrap_or_else(|| CaptureResult::aborted(SessionStatus::UserCancelled))
        } else {
            captures
                .try_recv()
                .unwrap_or_else(|_| CaptureResult::aborted(SessionStatus::UserCancelled))
        }
    }

    fn report_upload_progress(&self, progress: f32) {
        self.record(CaptureReport::Progress(progress));
    }

    fn report_message_override(&self, message: &str) {
        self.record(CaptureReport::MessageOverride(message.to_string()));
    }

    fn override_success_message(&self, message: &str) {
        self.record(CaptureReport::SuccessMessage(message.to_string()));
    }

    fn report_succeed(&self) {
        self.record(CaptureReport::Succeed);
    }

    fn report_retry(&self) {
        self.record(CaptureReport::Retry);
    }

    fn report_cancel(&self) {
        self.record(CaptureReport::Cancel);
    }

    async fn wait_until_done(&self) {
        self.state.lock().unwrap().done_calls += 1;
    }
}

#[async_trait]
impl EnrollmentNetworkEffects for MockEnrollmentEffects {
    async fn submit_enrollment(
        &self,
        identifier: &str,
        request: &EnrollmentRequest,
        progress: UploadProgressReporter,
    ) -> SubmissionResponse {
        let scripted = {
            let mut state = self.state.lock().unwrap();
            state.submissions.push(RecordedSubmission {
                identifier: identifier.to_string(),
                request: request.clone(),
            });
            state.responses.pop_front()
        };
        let Some(scripted) = scripted else {
            return Err(SubmissionFailure::transport(EnrollmentError::network(
                "no scripted submission response",
            )));
        };

        for (bytes_sent, total_bytes) in scripted.progress {
            progress.report(bytes_sent, total_bytes);
            tokio::task::yield_now().await;
        }
        scripted.response
    }

    fn cancel_in_flight_requests(&self) {
        self.state.lock().unwrap().cancellations += 1;
    }
}

impl UxEventEffects for MockEnrollmentEffects {
    fn dispatch(&self, event: UxEvent) {
        tracing::debug!(event = event.name(), "ux event");
        self.state.lock().unwrap().ux_events.push(event);
    }
}
