//! # Facescan Enrollment - Session Orchestration
//!
//! This crate drives one face enrollment session to completion: it receives
//! capture attempts, submits them, classifies the server's verdict and decides
//! per attempt whether to retry capture, fail or succeed.
//!
//! ## Components (leaves first)
//!
//! - **Session Result Holder** (`holder`): snapshot of the latest attempt
//! - **Progress Translator** (`progress`): upload fraction → UI progress band
//! - **Error Classifier** (`classifier`): verdict → outcome category + message
//! - **Retry Policy** (`retry`): whether another capture is permitted
//! - **Enrollment Session Controller** (`controller`): the state machine
//!
//! Around the core:
//!
//! - `delegates`: promise-style and event-stream completion consumers
//! - `module`: entry point that tracks the active session and notifies a
//!   superseded session's consumer
//!
//! ## Design Principles
//!
//! - Session state is owned by the controller and mutated only on its own steps
//! - Collaborators hand in immutable values (capture results, verdicts,
//!   progress samples) through the `facescan_core::effects` traits
//! - Every failure path ends in a classified, finalized outcome; nothing
//!   escapes the controller

#![allow(missing_docs)]
#![forbid(unsafe_code)]

/// Error classification of server verdicts
pub mod classifier;

/// Enrollment session state machine
pub mod controller;

/// Completion consumer adapters
pub mod delegates;

/// Composed collaborator bounds
pub mod effects;

/// Latest capture attempt snapshot
pub mod holder;

/// Session tracking across enrollment calls
pub mod module;

/// Upload progress translation
pub mod progress;

/// Retry bound and policy
pub mod retry;

/// Session state and outcome
pub mod session;

pub use facescan_core::{EnrollmentError, Result};

pub use classifier::{Classification, ClassificationCategory, ErrorClassifier, VerdictFlags};
pub use controller::{ControllerState, EnrollmentController};
pub use delegates::{
    EnrollmentRejection, EventProcessingDelegate, ProcessingEvent, PromiseOutcome,
    PromiseProcessingDelegate,
};
pub use effects::EnrollmentEffects;
pub use holder::{EnrollmentAttempt, SessionResultHolder};
pub use module::EnrollmentModule;
pub use progress::{ProgressEmission, ProgressTranslator};
pub use retry::{RetryBound, RetryCounter, RetryDecision, RetryPolicy};
pub use session::{EnrollmentSession, SessionOutcome, SessionSummary, Termination};
