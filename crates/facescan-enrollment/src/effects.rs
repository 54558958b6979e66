//! Effect composition for enrollment sessions.
//!
//! The controller needs every collaborator except the completion consumer,
//! which is passed separately so each session can report to its own caller.

use facescan_core::effects::{
    CaptureEffects, EnrollmentNetworkEffects, PermissionEffects, SessionTokenEffects,
    UxEventEffects,
};

/// Composed collaborators required by the enrollment controller.
pub trait EnrollmentEffects:
    CaptureEffects
    + PermissionEffects
    + SessionTokenEffects
    + EnrollmentNetworkEffects
    + UxEventEffects
    + Send
    + Sync
{
}

/// Blanket implementation for any type that implements all required traits.
impl<T> EnrollmentEffects for T where
    T: CaptureEffects
        + PermissionEffects
        + SessionTokenEffects
        + EnrollmentNetworkEffects
        + UxEventEffects
        + Send
        + Sync
{
}
