//! Capture subsystem interface.

use crate::capture::CaptureResult;
use crate::effects::token::SessionToken;
use crate::errors::Result;
use async_trait::async_trait;

/// Camera-driven capture subsystem.
///
/// The subsystem presents its own UI, produces one [`CaptureResult`] per
/// attempt and then waits for the controller to answer through the
/// result-reporting callbacks. For every attempt the controller ends with
/// exactly one of [`report_succeed`](Self::report_succeed),
/// [`report_retry`](Self::report_retry) or
/// [`report_cancel`](Self::report_cancel); progress and message overrides may
/// precede it.
#[async_trait]
pub trait CaptureEffects: Send + Sync {
    /// Present the capture UI for a session authorized by `token`.
    async fn begin_capture(&self, token: &SessionToken) -> Result<()>;

    /// Wait for the next completed (or aborted) capture attempt.
    async fn next_capture_result(&self) -> CaptureResult;

    /// Upload progress in `[0, 1]` for the capture UI's progress bar.
    fn report_upload_progress(&self, progress: f32);

    /// Replace the status text shown while the attempt is processed.
    fn report_message_override(&self, message: &str);

    /// Set the message shown on the success result screen.
    fn override_success_message(&self, message: &str);

    /// The attempt enrolled successfully.
    fn report_succeed(&self);

    /// Ask the subsystem to capture again.
    fn report_retry(&self);

    /// End the capture session without success.
    fn report_cancel(&self);

    /// Wait until the capture UI has been completely dismissed.
    async fn wait_until_done(&self);
}
