//! Collaborator interfaces consumed by the enrollment session controller.
//!
//! Each trait isolates one external subsystem so the controller can be driven
//! by platform integrations in production and by scripted mocks in tests
//! (`facescan-testkit`). Implementations supply inputs through these
//! signatures only; they never reach into session state.

pub mod capture;
pub mod network;
pub mod permission;
pub mod processing;
pub mod token;
pub mod ux;

pub use capture::CaptureEffects;
pub use network::{
    EnrollmentNetworkEffects, SubmissionFailure, SubmissionResponse, UploadProgress,
    UploadProgressReporter,
};
pub use permission::{CameraAuthorization, PermissionEffects, PermissionGrant};
pub use processing::ProcessingDelegate;
pub use token::{SessionToken, SessionTokenEffects};
pub use ux::{RetryEvent, UxEvent, UxEventEffects};
