//! Facescan Core - Enrollment Session Foundation
//!
//! This crate provides the foundational types and collaborator interfaces for
//! driving a face enrollment session. It contains no orchestration logic; the
//! session state machine lives in `facescan-enrollment`.
//!
//! # Architecture Layers
//!
//! ## Value Types
//! - `CaptureResult`: raw output of one capture attempt (status + blobs)
//! - `ServerVerdict`: the server's judgment of a submitted attempt
//! - `EnrollmentRequest`: wire payload sent to the enrollment endpoint
//! - `SessionStatus`: capture statuses with stable numeric codes
//!
//! ## Effect Interfaces (Pure Signatures)
//! - `CaptureEffects`: begin capture, receive attempts, result callbacks
//! - `PermissionEffects`: camera authorization
//! - `SessionTokenEffects`: session token acquisition
//! - `EnrollmentNetworkEffects`: submission with upload progress, cancellation
//! - `UxEventEffects`: UX event stream (`UI_READY`, `CAPTURE_DONE`, `FV_RETRY`)
//! - `ProcessingDelegate`: completion consumer
//!
//! Collaborators only hand immutable values to the session controller; they
//! never own or mutate session state.

#![allow(missing_docs)]
#![forbid(unsafe_code)]

/// Raw capture attempt output
pub mod capture;

/// Customization strings and retry defaults
pub mod config;

/// Pure collaborator interfaces (no implementations)
pub mod effects;

/// Unified error handling
pub mod errors;

/// Enrollment submission payload
pub mod request;

/// Capture session statuses
pub mod status;

/// Server verdict parsing
pub mod verdict;

pub use capture::CaptureResult;
pub use config::{CustomizationMessages, EnrollmentConfig};
pub use errors::{EnrollmentError, Result};
pub use request::EnrollmentRequest;
pub use status::SessionStatus;
pub use verdict::{EnrollmentResultFlags, ServerVerdict};
