//! Completion consumer interface.

use crate::capture::CaptureResult;

/// Receives the terminal outcome of an enrollment session.
///
/// Exactly one of the first three methods is called per session.
/// [`on_session_context_switch`](Self::on_session_context_switch) may arrive
/// earlier when a newer session supersedes this one; adapters settle on the
/// first terminal call and ignore the rest.
pub trait ProcessingDelegate: Send + Sync {
    /// Session finished after reaching capture.
    ///
    /// `last_result` is the most recent capture attempt, `None` when the
    /// capture UI never produced one.
    fn on_processing_complete(
        &self,
        is_success: bool,
        last_result: Option<&CaptureResult>,
        message: Option<&str>,
    );

    /// Session token could not be obtained.
    fn on_session_token_error(&self);

    /// Camera access refused.
    fn on_camera_access_error(&self);

    /// A newer session replaced this one.
    fn on_session_context_switch(&self);
}
